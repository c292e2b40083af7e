//! check::issues
//!
//! Inconsistency types reported by the consistency checks.
//!
//! # Architecture
//!
//! Each [`Inconsistency`] has a kind, optional endpoints and a severity
//! derived from the kind. Issue IDs are computed from the kind and the
//! involved sections, so the same problem gets the same ID on every run and
//! can be referenced from CI logs or review comments.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::core::types::LessonId;

/// Severity of an inconsistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Fails the check.
    Error,

    /// Reported, fails the check only in strict mode.
    Warning,
}

impl Severity {
    /// Check if this severity fails a check.
    pub fn is_blocking(&self, strict: bool) -> bool {
        match self {
            Severity::Error => true,
            Severity::Warning => strict,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A stable, deterministic issue identifier.
///
/// # Example
///
/// ```
/// use syllabus::check::issues::IssueId;
///
/// let id = IssueId::new("missing-enables", "net->auth");
/// assert!(id.as_str().starts_with("missing-enables:"));
/// assert_eq!(id, IssueId::new("missing-enables", "net->auth"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IssueId(String);

impl IssueId {
    /// Create an issue ID from a type and key.
    ///
    /// The ID is formatted as `type:hash(key)` where hash is
    /// a truncated SHA-256 of the key.
    pub fn new(issue_type: &str, key: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        let hash = hasher.finalize();
        let short_hash = hex::encode(&hash[..4]);
        Self(format!("{}:{}", issue_type, short_hash))
    }

    /// Get the string representation of the ID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IssueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kinds of inconsistency between matrix declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InconsistencyKind {
    /// Edge declared only by the prerequisite's `enables`.
    MissingDependsOn,
    /// Edge declared only by the dependent's `depends_on`.
    MissingEnables,
    /// Prerequisite is taught after its dependent.
    ForwardReference,
    /// Ordinals are not exactly `1..=N`.
    OrdinalGap,
    /// The same section is listed twice in one list.
    DuplicateDeclaration,
    /// Section with no prerequisites and no dependents.
    OrphanNode,
}

impl InconsistencyKind {
    /// Stable kebab-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            InconsistencyKind::MissingDependsOn => "missing-depends-on",
            InconsistencyKind::MissingEnables => "missing-enables",
            InconsistencyKind::ForwardReference => "forward-reference",
            InconsistencyKind::OrdinalGap => "ordinal-gap",
            InconsistencyKind::DuplicateDeclaration => "duplicate-declaration",
            InconsistencyKind::OrphanNode => "orphan-node",
        }
    }

    /// Severity of this kind.
    pub fn severity(&self) -> Severity {
        match self {
            InconsistencyKind::MissingDependsOn
            | InconsistencyKind::MissingEnables
            | InconsistencyKind::ForwardReference
            | InconsistencyKind::OrdinalGap => Severity::Error,
            InconsistencyKind::DuplicateDeclaration | InconsistencyKind::OrphanNode => {
                Severity::Warning
            }
        }
    }
}

impl std::fmt::Display for InconsistencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A detected mismatch in the declared matrix.
///
/// Collected, never raised: the consistency checks report every one they
/// find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inconsistency {
    /// What went wrong
    pub kind: InconsistencyKind,
    /// Prerequisite side, or the section for node-level kinds
    pub from: Option<LessonId>,
    /// Dependent side of an edge
    pub to: Option<LessonId>,
    /// Extra detail (missing ordinals, which list repeats an entry)
    pub detail: Option<String>,
}

impl Inconsistency {
    /// An edge-level inconsistency.
    pub fn edge(kind: InconsistencyKind, from: &LessonId, to: &LessonId) -> Self {
        Self {
            kind,
            from: Some(from.clone()),
            to: Some(to.clone()),
            detail: None,
        }
    }

    /// A node-level inconsistency.
    pub fn node(kind: InconsistencyKind, id: &LessonId) -> Self {
        Self {
            kind,
            from: Some(id.clone()),
            to: None,
            detail: None,
        }
    }

    /// A graph-level inconsistency.
    pub fn graph(kind: InconsistencyKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            from: None,
            to: None,
            detail: Some(detail.into()),
        }
    }

    /// Attach detail text.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Severity, derived from the kind.
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// Stable issue ID.
    pub fn issue_id(&self) -> IssueId {
        let key = match (&self.from, &self.to) {
            (Some(from), Some(to)) => format!("{from}->{to}"),
            (Some(node), None) => node.to_string(),
            _ => self.detail.clone().unwrap_or_default(),
        };
        let key = match (&self.detail, self.kind) {
            (Some(detail), InconsistencyKind::DuplicateDeclaration) => format!("{key}:{detail}"),
            _ => key,
        };
        IssueId::new(self.kind.as_str(), &key)
    }
}

impl std::fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let from = self.from.as_ref().map(LessonId::as_str).unwrap_or("?");
        let to = self.to.as_ref().map(LessonId::as_str).unwrap_or("?");
        match self.kind {
            InconsistencyKind::MissingDependsOn => write!(
                f,
                "'{from}' enables '{to}', but '{to}' does not list '{from}' under depends_on"
            ),
            InconsistencyKind::MissingEnables => write!(
                f,
                "'{to}' depends on '{from}', but '{from}' does not list '{to}' under enables"
            ),
            InconsistencyKind::ForwardReference => write!(
                f,
                "'{to}' depends on '{from}', which is taught later"
            ),
            InconsistencyKind::OrdinalGap => write!(
                f,
                "ordinals are not contiguous from 1"
            ),
            InconsistencyKind::DuplicateDeclaration => {
                write!(f, "edge '{from}' -> '{to}' is declared more than once")
            }
            InconsistencyKind::OrphanNode => {
                write!(f, "'{from}' has no prerequisites and enables nothing")
            }
        }?;
        if let Some(detail) = &self.detail {
            write!(f, " ({detail})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> LessonId {
        LessonId::new(s).unwrap()
    }

    #[test]
    fn severities() {
        assert_eq!(InconsistencyKind::MissingEnables.severity(), Severity::Error);
        assert_eq!(InconsistencyKind::ForwardReference.severity(), Severity::Error);
        assert_eq!(InconsistencyKind::OrphanNode.severity(), Severity::Warning);
        assert_eq!(
            InconsistencyKind::DuplicateDeclaration.severity(),
            Severity::Warning
        );
    }

    #[test]
    fn warnings_block_only_when_strict() {
        assert!(Severity::Error.is_blocking(false));
        assert!(!Severity::Warning.is_blocking(false));
        assert!(Severity::Warning.is_blocking(true));
    }

    #[test]
    fn issue_id_is_stable_and_distinct() {
        let a = Inconsistency::edge(InconsistencyKind::MissingEnables, &id("net"), &id("auth"));
        let b = Inconsistency::edge(InconsistencyKind::MissingEnables, &id("net"), &id("auth"));
        let c = Inconsistency::edge(InconsistencyKind::MissingEnables, &id("auth"), &id("net"));

        assert_eq!(a.issue_id(), b.issue_id());
        assert_ne!(a.issue_id(), c.issue_id());
        assert!(a.issue_id().as_str().starts_with("missing-enables:"));
        assert_eq!(a.issue_id().as_str().len(), "missing-enables:".len() + 8);
    }

    #[test]
    fn messages_name_both_sections() {
        let issue = Inconsistency::edge(InconsistencyKind::MissingEnables, &id("net"), &id("auth"));
        assert_eq!(
            issue.to_string(),
            "'auth' depends on 'net', but 'net' does not list 'auth' under enables"
        );

        let orphan = Inconsistency::node(InconsistencyKind::OrphanNode, &id("appendix"));
        assert_eq!(
            orphan.to_string(),
            "'appendix' has no prerequisites and enables nothing"
        );
    }

    #[test]
    fn detail_is_appended() {
        let gap = Inconsistency::graph(InconsistencyKind::OrdinalGap, "missing 2");
        assert_eq!(gap.to_string(), "ordinals are not contiguous from 1 (missing 2)");
        assert!(gap.issue_id().as_str().starts_with("ordinal-gap:"));
    }

    #[test]
    fn kind_serializes_kebab_case() {
        let json = serde_json::to_string(&InconsistencyKind::MissingDependsOn).unwrap();
        assert_eq!(json, "\"missing-depends-on\"");
    }
}
