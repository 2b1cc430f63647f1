//! Static editor settings and their TOML surface.
//!
//! `Settings` is the validated configuration consumed by the editor core:
//! the soft-tab width used by indent/unindent and Tab insertion, and the
//! fixed number of viewport rows. `SettingsFile` is the tolerant serde layer
//! parsed from an `etch.toml` fragment: every field defaults, unknown fields
//! are ignored so hosts can carry their own keys in the same file.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;
use tracing::info;

pub const DEFAULT_SPACES: usize = 4;
pub const DEFAULT_VIEWPORT_ROWS: usize = 24;

/// Validation failures for host-supplied settings values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("spaces must be at least 1 (got {0})")]
    InvalidSpaces(usize),
    #[error("viewport_rows must be at least 1 (got {0})")]
    InvalidViewportRows(usize),
}

/// Validated editor settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Soft-tab width: spaces inserted by Tab and removed per line by unindent.
    pub spaces: usize,
    /// Number of rows the viewport renders.
    pub viewport_rows: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spaces: DEFAULT_SPACES,
            viewport_rows: DEFAULT_VIEWPORT_ROWS,
        }
    }
}

impl Settings {
    pub fn new(spaces: usize, viewport_rows: usize) -> Result<Self, SettingsError> {
        let s = Self {
            spaces,
            viewport_rows,
        };
        s.validate()?;
        Ok(s)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.spaces == 0 {
            return Err(SettingsError::InvalidSpaces(self.spaces));
        }
        if self.viewport_rows == 0 {
            return Err(SettingsError::InvalidViewportRows(self.viewport_rows));
        }
        Ok(())
    }
}

/// Raw TOML shape. Missing keys fall back to defaults; unknown keys are
/// tolerated for forward evolution.
#[derive(Debug, Deserialize, Clone)]
pub struct SettingsFile {
    #[serde(default = "SettingsFile::default_spaces")]
    pub spaces: usize,
    #[serde(default = "SettingsFile::default_viewport_rows")]
    pub viewport_rows: usize,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            spaces: Self::default_spaces(),
            viewport_rows: Self::default_viewport_rows(),
        }
    }
}

impl SettingsFile {
    const fn default_spaces() -> usize {
        DEFAULT_SPACES
    }
    const fn default_viewport_rows() -> usize {
        DEFAULT_VIEWPORT_ROWS
    }

    pub fn into_settings(self) -> Result<Settings, SettingsError> {
        Settings::new(self.spaces, self.viewport_rows)
    }
}

/// Parse settings from a TOML string, validating the result.
pub fn from_toml(content: &str) -> Result<Settings> {
    let file: SettingsFile = toml::from_str(content).context("parsing settings TOML")?;
    let settings = file.into_settings()?;
    info!(target: "config.load", spaces = settings.spaces, viewport_rows = settings.viewport_rows, "settings_parsed");
    Ok(settings)
}

/// Load settings from a file path. A missing file yields the defaults; a
/// present but invalid file is an error surfaced to the embedder.
pub fn load_from(path: &Path) -> Result<Settings> {
    match fs::read_to_string(path) {
        Ok(content) => from_toml(&content)
            .with_context(|| format!("loading settings from {}", path.display())),
        Err(_) => {
            info!(target: "config.load", path = %path.display(), "settings_file_absent_using_defaults");
            Ok(Settings::default())
        }
    }
}
