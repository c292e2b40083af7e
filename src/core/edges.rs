//! core::edges
//!
//! Edge store for prerequisite relationships.
//!
//! An edge `prerequisite -> dependent` can be declared from either side of
//! the matrix: the dependent lists the prerequisite under `depends_on`, or the
//! prerequisite lists the dependent under `enables`. Both declarations land on
//! the same edge; the store counts how often each side declared it so the
//! consistency checks can spot one-sided or repeated declarations.
//!
//! # Invariants
//!
//! - Both endpoints are registered
//! - No self-loops
//! - At most one edge per ordered pair
//!
//! Cycles are NOT rejected here; the cycle detector runs once the whole
//! matrix is loaded.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::graph::GraphError;
use super::registry::NodeRegistry;
use super::types::{LessonId, Ordinal};

/// Which side of the matrix declared an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration {
    /// Listed in the dependent's `depends_on`
    DependsOn,
    /// Listed in the prerequisite's `enables`
    Enables,
}

/// A directed prerequisite edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyEdge {
    /// Section that must be taught first
    pub prerequisite: LessonId,
    /// Section that builds on the prerequisite
    pub dependent: LessonId,
    /// Number of `depends_on` declarations for this edge
    pub depends_on_count: u32,
    /// Number of `enables` declarations for this edge
    pub enables_count: u32,
}

impl DependencyEdge {
    /// The dependent lists the prerequisite in `depends_on`.
    pub fn declared_by_dependent(&self) -> bool {
        self.depends_on_count > 0
    }

    /// The prerequisite lists the dependent in `enables`.
    pub fn declared_by_prerequisite(&self) -> bool {
        self.enables_count > 0
    }
}

/// Store of prerequisite edges, keyed by endpoint ordinals.
#[derive(Debug, Default, Clone)]
pub struct EdgeStore {
    edges: BTreeMap<(Ordinal, Ordinal), DependencyEdge>,
    outgoing: BTreeMap<Ordinal, BTreeSet<Ordinal>>,
    incoming: BTreeMap<Ordinal, BTreeSet<Ordinal>>,
}

impl EdgeStore {
    /// Create an empty edge store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fully declared edge (both sides agree).
    ///
    /// # Errors
    ///
    /// - `GraphError::UnknownNode` if either endpoint is not registered
    /// - `GraphError::SelfLoop` if `from == to`
    pub fn add_edge(
        &mut self,
        registry: &NodeRegistry,
        from: &LessonId,
        to: &LessonId,
    ) -> Result<(), GraphError> {
        self.declare(registry, from, to, Declaration::DependsOn)?;
        self.declare(registry, from, to, Declaration::Enables)
    }

    /// Record one declaration of the edge `from -> to`.
    ///
    /// Repeated declarations of the same pair merge into the existing edge.
    ///
    /// # Errors
    ///
    /// Same as [`EdgeStore::add_edge`].
    pub fn declare(
        &mut self,
        registry: &NodeRegistry,
        from: &LessonId,
        to: &LessonId,
        declaration: Declaration,
    ) -> Result<(), GraphError> {
        let from_ordinal = registry
            .ordinal_of(from)
            .ok_or_else(|| GraphError::UnknownNode {
                id: from.clone(),
                referenced_by: to.clone(),
            })?;
        let to_ordinal = registry
            .ordinal_of(to)
            .ok_or_else(|| GraphError::UnknownNode {
                id: to.clone(),
                referenced_by: from.clone(),
            })?;

        if from_ordinal == to_ordinal {
            return Err(GraphError::SelfLoop(from.clone()));
        }

        let edge = self
            .edges
            .entry((from_ordinal, to_ordinal))
            .or_insert_with(|| DependencyEdge {
                prerequisite: from.clone(),
                dependent: to.clone(),
                depends_on_count: 0,
                enables_count: 0,
            });
        match declaration {
            Declaration::DependsOn => edge.depends_on_count += 1,
            Declaration::Enables => edge.enables_count += 1,
        }

        self.outgoing
            .entry(from_ordinal)
            .or_default()
            .insert(to_ordinal);
        self.incoming
            .entry(to_ordinal)
            .or_default()
            .insert(from_ordinal);
        Ok(())
    }

    /// All edges, ordered by prerequisite ordinal then dependent ordinal.
    pub fn iter(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.edges.values()
    }

    /// Ordinals of direct dependents, ascending.
    pub fn dependents(&self, ordinal: Ordinal) -> impl Iterator<Item = Ordinal> + '_ {
        self.outgoing
            .get(&ordinal)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Ordinals of direct prerequisites, ascending.
    pub fn prerequisites(&self, ordinal: Ordinal) -> impl Iterator<Item = Ordinal> + '_ {
        self.incoming
            .get(&ordinal)
            .into_iter()
            .flat_map(|set| set.iter().copied())
    }

    /// Number of prerequisites of a node.
    pub fn in_degree(&self, ordinal: Ordinal) -> usize {
        self.incoming.get(&ordinal).map_or(0, BTreeSet::len)
    }

    /// Number of dependents of a node.
    pub fn out_degree(&self, ordinal: Ordinal) -> usize {
        self.outgoing.get(&ordinal).map_or(0, BTreeSet::len)
    }

    /// Number of distinct edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Check whether the store holds no edges.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}
