//! core::registry
//!
//! Node registry for lesson sections.
//!
//! # Invariants
//!
//! - Identifiers are unique
//! - Ordinals are unique
//! - Nodes are immutable once registered
//!
//! Iteration is always in ordinal order so every downstream traversal is
//! reproducible across runs.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::graph::GraphError;
use super::types::{LessonId, Ordinal};

/// A registered lesson section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LessonNode {
    /// Unique identifier
    pub id: LessonId,
    /// Human-readable title
    pub title: String,
    /// Declared teaching position
    pub ordinal: Ordinal,
}

/// Registry of lesson sections keyed by id and by ordinal.
#[derive(Debug, Default, Clone)]
pub struct NodeRegistry {
    by_ordinal: BTreeMap<Ordinal, LessonNode>,
    by_id: HashMap<LessonId, Ordinal>,
}

impl NodeRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a lesson section.
    ///
    /// # Errors
    ///
    /// - `GraphError::DuplicateId` if the id is already registered
    /// - `GraphError::DuplicateOrdinal` if another section holds the ordinal
    ///
    /// # Example
    ///
    /// ```
    /// use syllabus::core::registry::NodeRegistry;
    /// use syllabus::core::types::{LessonId, Ordinal};
    ///
    /// let mut registry = NodeRegistry::new();
    /// let net = LessonId::new("networking").unwrap();
    /// registry.register(net.clone(), "Networking", Ordinal::new(1).unwrap()).unwrap();
    ///
    /// let auth = LessonId::new("auth").unwrap();
    /// assert!(registry.register(auth, "Auth", Ordinal::new(1).unwrap()).is_err());
    /// assert_eq!(registry.lookup(&net).unwrap().title, "Networking");
    /// ```
    pub fn register(
        &mut self,
        id: LessonId,
        title: impl Into<String>,
        ordinal: Ordinal,
    ) -> Result<(), GraphError> {
        if self.by_id.contains_key(&id) {
            return Err(GraphError::DuplicateId(id));
        }
        if let Some(existing) = self.by_ordinal.get(&ordinal) {
            return Err(GraphError::DuplicateOrdinal {
                ordinal,
                existing: existing.id.clone(),
                rejected: id,
            });
        }

        self.by_id.insert(id.clone(), ordinal);
        self.by_ordinal.insert(
            ordinal,
            LessonNode {
                id,
                title: title.into(),
                ordinal,
            },
        );
        Ok(())
    }

    /// Look up a section by id.
    pub fn lookup(&self, id: &LessonId) -> Option<&LessonNode> {
        self.by_id
            .get(id)
            .and_then(|ordinal| self.by_ordinal.get(ordinal))
    }

    /// Look up a section by ordinal.
    pub fn at(&self, ordinal: Ordinal) -> Option<&LessonNode> {
        self.by_ordinal.get(&ordinal)
    }

    /// Ordinal of a registered id.
    pub fn ordinal_of(&self, id: &LessonId) -> Option<Ordinal> {
        self.by_id.get(id).copied()
    }

    /// Check whether an id is registered.
    pub fn contains(&self, id: &LessonId) -> bool {
        self.by_id.contains_key(id)
    }

    /// All sections in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = &LessonNode> {
        self.by_ordinal.values()
    }

    /// Number of registered sections.
    pub fn len(&self) -> usize {
        self.by_ordinal.len()
    }

    /// Check whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.by_ordinal.is_empty()
    }
}
