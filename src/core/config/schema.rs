//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Global Config
//!
//! Located at (in order of precedence):
//! 1. `--config <PATH>` on the command line
//! 2. `$SYLLABUS_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/syllabus/config.toml`
//! 4. `~/.syllabus/config.toml` (canonical write location)
//!
//! # Project Config
//!
//! `syllabus.toml`, found by walking up from the working directory.
//!
//! # Validation
//!
//! Config values are validated after parsing; unknown keys are rejected
//! during parsing.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::matrix::InputFormat;

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Machine-readable JSON
    Json,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Text => write!(f, "text"),
            ReportFormat::Json => write!(f, "json"),
        }
    }
}

/// Global configuration (user scope).
///
/// # Example
///
/// ```toml
/// strict = false
/// format = "text"
/// require_connected = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Treat warnings as failures
    pub strict: Option<bool>,

    /// Default report format
    pub format: Option<ReportFormat>,

    /// Flag sections with no prerequisites and no dependents
    pub require_connected: Option<bool>,
}

/// Project configuration.
///
/// # Example
///
/// ```toml
/// matrix = "docs/dependencies.md"
/// input_format = "markdown"
/// strict = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Matrix source, relative to the directory holding `syllabus.toml`
    pub matrix: Option<PathBuf>,

    /// Force a matrix input format instead of guessing from the extension
    pub input_format: Option<InputFormat>,

    /// Treat warnings as failures
    pub strict: Option<bool>,

    /// Default report format
    pub format: Option<ReportFormat>,

    /// Flag sections with no prerequisites and no dependents
    pub require_connected: Option<bool>,
}

impl ProjectConfig {
    /// Validate the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `matrix` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(matrix) = &self.matrix {
            if matrix.as_os_str().is_empty() {
                return Err(ConfigError::InvalidValue(
                    "matrix path cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
