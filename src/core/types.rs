//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`LessonId`] - Validated lesson section identifier
//! - [`Ordinal`] - Declared teaching position (1-based)
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, so the graph layer never sees an empty id or a
//! zero ordinal.
//!
//! # Examples
//!
//! ```
//! use syllabus::core::types::{LessonId, Ordinal};
//!
//! let id = LessonId::new("networking").unwrap();
//! let ordinal = Ordinal::new(1).unwrap();
//! assert_eq!(id.as_str(), "networking");
//! assert_eq!(ordinal.get(), 1);
//!
//! assert!(LessonId::new("has space").is_err());
//! assert!(Ordinal::new(0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid lesson id: {0}")]
    InvalidLessonId(String),

    #[error("invalid ordinal: {0}")]
    InvalidOrdinal(String),
}

/// A validated lesson section identifier.
///
/// Identifiers are short machine names such as `networking` or
/// `auth.jwt`:
/// - Cannot be empty
/// - Must start with an ASCII letter or digit
/// - May contain ASCII letters, digits, `-`, `_` and `.`
///
/// # Example
///
/// ```
/// use syllabus::core::types::LessonId;
///
/// let id = LessonId::new("distributed-systems").unwrap();
/// assert_eq!(id.as_str(), "distributed-systems");
///
/// assert!(LessonId::new("").is_err());
/// assert!(LessonId::new("-caching").is_err());
/// assert!(LessonId::new("auth/jwt").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LessonId(String);

impl LessonId {
    /// Create a new validated lesson id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidLessonId` if the id is empty or contains
    /// characters outside the allowed set.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    fn validate(id: &str) -> Result<(), TypeError> {
        let Some(first) = id.chars().next() else {
            return Err(TypeError::InvalidLessonId(
                "lesson id cannot be empty".into(),
            ));
        };

        if !first.is_ascii_alphanumeric() {
            return Err(TypeError::InvalidLessonId(format!(
                "lesson id '{id}' must start with a letter or digit"
            )));
        }

        if let Some(bad) = id
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(TypeError::InvalidLessonId(format!(
                "lesson id '{id}' cannot contain '{}'",
                bad.escape_default()
            )));
        }

        Ok(())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LessonId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl TryFrom<&str> for LessonId {
    type Error = TypeError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<LessonId> for String {
    fn from(id: LessonId) -> Self {
        id.0
    }
}

impl AsRef<str> for LessonId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LessonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Declared teaching position of a lesson section.
///
/// Ordinals are 1-based; a well-formed curriculum uses exactly `1..=N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Ordinal(u32);

impl Ordinal {
    /// Create a new ordinal.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidOrdinal` for zero.
    pub fn new(value: u32) -> Result<Self, TypeError> {
        if value == 0 {
            return Err(TypeError::InvalidOrdinal(
                "ordinals start at 1".into(),
            ));
        }
        Ok(Self(value))
    }

    /// Get the raw position.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Ordinal {
    type Error = TypeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Ordinal> for u32 {
    fn from(ordinal: Ordinal) -> Self {
        ordinal.0
    }
}

impl std::fmt::Display for Ordinal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
