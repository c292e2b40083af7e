//! matrix
//!
//! Loading the declared section dependency matrix.
//!
//! # Formats
//!
//! - **TOML**: `[[section]]` tables
//! - **JSON**: `{"sections": [...]}`
//! - **Markdown**: the first GFM table with a section column and a
//!   depends-on or enables column (see [`markdown`])
//!
//! Every format produces the same [`Matrix`] value. Turning it into a
//! [`DependencyGraph`] is where identifiers, ordinals and references get
//! validated; the first structural problem aborts the load.

pub mod markdown;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::edges::Declaration;
use crate::core::graph::{DependencyGraph, GraphError};
use crate::core::types::{LessonId, Ordinal, TypeError};

/// Errors from loading a matrix.
///
/// All of these mean the input is malformed and cannot be analyzed.
#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("failed to read matrix '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {format} matrix: {message}")]
    Parse { format: InputFormat, message: String },

    #[error("cannot tell the matrix format of '{0}'; pass --input-format")]
    UnknownFormat(PathBuf),

    #[error("no dependency table found (need a 'Section' column and a 'Depends On' or 'Enables' column)")]
    NoTable,

    #[error("section #{position}: {source}")]
    InvalidEntry { position: usize, source: TypeError },

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Matrix source format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Toml,
    Json,
    Markdown,
}

impl InputFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(InputFormat::Toml),
            "json" => Some(InputFormat::Json),
            "md" | "markdown" => Some(InputFormat::Markdown),
            _ => None,
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormat::Toml => write!(f, "toml"),
            InputFormat::Json => write!(f, "json"),
            InputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// One declared section row.
///
/// Fields stay as raw strings until [`Matrix::build_graph`] so errors can
/// point at the offending section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatrixEntry {
    /// Section identifier
    pub id: String,
    /// Title; defaults to the id
    #[serde(default)]
    pub title: Option<String>,
    /// Declared position; defaults to the row position (1-based)
    #[serde(default)]
    pub ordinal: Option<u32>,
    /// Sections that must be taught first
    #[serde(default)]
    pub depends_on: Vec<String>,
    /// Sections this one prepares for
    #[serde(default)]
    pub enables: Vec<String>,
}

/// The declared dependency matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Matrix {
    #[serde(rename = "sections", alias = "section", default)]
    pub entries: Vec<MatrixEntry>,
}

impl Matrix {
    /// Read and parse a matrix file.
    ///
    /// Uses `format` if given, otherwise guesses from the extension.
    pub fn load(path: &Path, format: Option<InputFormat>) -> Result<Self, MatrixError> {
        let format = format
            .or_else(|| InputFormat::from_path(path))
            .ok_or_else(|| MatrixError::UnknownFormat(path.to_path_buf()))?;

        let contents = fs::read_to_string(path).map_err(|e| MatrixError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let matrix = Self::parse(&contents, format)?;
        tracing::debug!(
            path = %path.display(),
            %format,
            sections = matrix.entries.len(),
            "matrix loaded"
        );
        Ok(matrix)
    }

    /// Parse matrix text in the given format.
    ///
    /// # Example
    ///
    /// ```
    /// use syllabus::matrix::{InputFormat, Matrix};
    ///
    /// let matrix = Matrix::parse(
    ///     r#"
    ///     [[section]]
    ///     id = "net"
    ///     enables = ["auth"]
    ///
    ///     [[section]]
    ///     id = "auth"
    ///     depends_on = ["net"]
    ///     "#,
    ///     InputFormat::Toml,
    /// )
    /// .unwrap();
    /// assert_eq!(matrix.entries.len(), 2);
    /// ```
    pub fn parse(text: &str, format: InputFormat) -> Result<Self, MatrixError> {
        match format {
            InputFormat::Toml => toml::from_str(text).map_err(|e| MatrixError::Parse {
                format,
                message: e.to_string(),
            }),
            InputFormat::Json => serde_json::from_str(text).map_err(|e| MatrixError::Parse {
                format,
                message: e.to_string(),
            }),
            InputFormat::Markdown => markdown::parse(text),
        }
    }

    /// Build the dependency graph.
    ///
    /// All sections are registered first, then every `depends_on` and
    /// `enables` entry is recorded as a declaration on its edge.
    ///
    /// # Errors
    ///
    /// - `MatrixError::InvalidEntry` for a bad id, reference or ordinal
    /// - `MatrixError::Graph` for duplicate ids or ordinals, unknown
    ///   references and self loops
    pub fn build_graph(&self) -> Result<DependencyGraph, MatrixError> {
        let mut graph = DependencyGraph::new();
        let mut ids = Vec::with_capacity(self.entries.len());

        for (index, entry) in self.entries.iter().enumerate() {
            let position = index + 1;
            let invalid = |source| MatrixError::InvalidEntry { position, source };

            let id = LessonId::new(entry.id.trim()).map_err(invalid)?;
            let ordinal = Ordinal::new(entry.ordinal.unwrap_or(position as u32)).map_err(invalid)?;
            let title = entry
                .title
                .clone()
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| id.to_string());

            graph.register(id.clone(), title, ordinal)?;
            ids.push(id);
        }

        for (index, (entry, id)) in self.entries.iter().zip(&ids).enumerate() {
            let position = index + 1;
            let reference = |raw: &String| {
                LessonId::new(raw.trim()).map_err(|source| MatrixError::InvalidEntry { position, source })
            };

            for raw in &entry.depends_on {
                graph.declare(&reference(raw)?, id, Declaration::DependsOn)?;
            }
            for raw in &entry.enables {
                graph.declare(id, &reference(raw)?, Declaration::Enables)?;
            }
        }

        tracing::debug!(
            sections = graph.node_count(),
            edges = graph.edge_count(),
            "graph built"
        );
        Ok(graph)
    }
}
