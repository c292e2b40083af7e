//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! Syllabus has two configuration scopes:
//! - **Global**: User-level defaults
//! - **Project**: `syllabus.toml` next to the curriculum
//!
//! # Precedence
//!
//! Configuration values are resolved in this order (later overrides earlier):
//! 1. Default values
//! 2. Global config file
//! 3. Project config file
//! 4. CLI flags (not handled here)
//!
//! # Global Config Locations
//!
//! Searched in order:
//! 1. Explicit path passed to [`Config::load`] (from `--config`)
//! 2. `$SYLLABUS_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/syllabus/config.toml`
//! 4. `~/.syllabus/config.toml`
//!
//! # Project Config Location
//!
//! `syllabus.toml` in the starting directory or the nearest ancestor.
//!
//! # Example
//!
//! ```no_run
//! use syllabus::core::config::Config;
//! use std::path::Path;
//!
//! let config = Config::load(Some(Path::new("/path/to/book")), None).unwrap();
//! if let Some(matrix) = config.matrix() {
//!     println!("Matrix: {}", matrix.display());
//! }
//! println!("Strict: {}", config.strict());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, ProjectConfig, ReportFormat};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::matrix::InputFormat;

/// File name of the project config.
pub const PROJECT_CONFIG_FILE: &str = "syllabus.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("config file already exists: {0}")]
    AlreadyExists(PathBuf),
}

/// Merged configuration from all sources.
///
/// Accessor methods apply precedence rules: project config overrides global
/// config, which overrides built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Global configuration
    pub global: GlobalConfig,
    /// Project configuration (if a `syllabus.toml` was found)
    pub project: Option<ProjectConfig>,
    global_path: Option<PathBuf>,
    project_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// `start_dir` is where the project config search begins;
    /// `global_override` replaces the global lookup entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be parsed, or if
    /// `global_override` points at a missing file. Missing default files are
    /// not an error.
    pub fn load(
        start_dir: Option<&Path>,
        global_override: Option<&Path>,
    ) -> Result<Config, ConfigError> {
        let (global, global_path) = match global_override {
            Some(path) => (Self::read_toml::<GlobalConfig>(path)?, Some(path.to_path_buf())),
            None => Self::load_global()?,
        };

        let (project, project_path) = match start_dir.and_then(Self::find_project) {
            Some(path) => (Some(Self::read_toml::<ProjectConfig>(&path)?), Some(path)),
            None => (None, None),
        };

        if let Some(ref p) = project {
            p.validate()?;
        }

        tracing::debug!(
            global = ?global_path,
            project = ?project_path,
            "configuration loaded"
        );

        Ok(Config {
            global,
            project,
            global_path,
            project_path,
        })
    }

    fn load_global() -> Result<(GlobalConfig, Option<PathBuf>), ConfigError> {
        if let Ok(path) = std::env::var("SYLLABUS_CONFIG") {
            let path = PathBuf::from(path);
            if path.exists() {
                let config = Self::read_toml(&path)?;
                return Ok((config, Some(path)));
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("syllabus/config.toml");
            if path.exists() {
                let config = Self::read_toml(&path)?;
                return Ok((config, Some(path)));
            }
        }

        if let Some(home) = dirs::home_dir() {
            let path = home.join(".syllabus/config.toml");
            if path.exists() {
                let config = Self::read_toml(&path)?;
                return Ok((config, Some(path)));
            }
        }

        Ok((GlobalConfig::default(), None))
    }

    /// Find `syllabus.toml` in `start` or its nearest ancestor.
    pub fn find_project(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(PROJECT_CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Write a new project config into `dir`.
    ///
    /// Refuses to overwrite an existing `syllabus.toml`. Uses atomic write
    /// (write to temp file, then rename).
    pub fn write_project(dir: &Path, config: &ProjectConfig) -> Result<PathBuf, ConfigError> {
        config.validate()?;
        let path = dir.join(PROJECT_CONFIG_FILE);
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path));
        }
        Self::write_config_atomic(&path, config)?;
        Ok(path)
    }

    fn write_config_atomic<T: serde::Serialize>(
        path: &Path,
        config: &T,
    ) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(contents.as_bytes())
            .map_err(|e| ConfigError::WriteError {
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    /// Check if warnings should fail the run.
    ///
    /// Defaults to `false` if not configured.
    pub fn strict(&self) -> bool {
        self.project
            .as_ref()
            .and_then(|p| p.strict)
            .or(self.global.strict)
            .unwrap_or(false)
    }

    /// Get the report format.
    ///
    /// Defaults to text if not configured.
    pub fn format(&self) -> ReportFormat {
        self.project
            .as_ref()
            .and_then(|p| p.format)
            .or(self.global.format)
            .unwrap_or_default()
    }

    /// Check if isolated sections should be flagged.
    ///
    /// Defaults to `true` if not configured.
    pub fn require_connected(&self) -> bool {
        self.project
            .as_ref()
            .and_then(|p| p.require_connected)
            .or(self.global.require_connected)
            .unwrap_or(true)
    }

    /// Get the configured matrix path, resolved against the project directory.
    pub fn matrix(&self) -> Option<PathBuf> {
        let matrix = self.project.as_ref()?.matrix.as_ref()?;
        let base = self
            .project_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or_else(|| Path::new("."));
        Some(base.join(matrix))
    }

    /// Get the forced matrix input format, if any.
    pub fn input_format(&self) -> Option<InputFormat> {
        self.project.as_ref().and_then(|p| p.input_format)
    }

    /// Get the path to the loaded global config file.
    pub fn global_config_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Get the path to the loaded project config file.
    pub fn project_config_loaded_from(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
}
