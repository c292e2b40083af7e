//! core::graph
//!
//! Lesson dependency graph representation and operations.
//!
//! # Architecture
//!
//! The dependency graph is expected to be a DAG where:
//! - Nodes are lesson sections (held by the [`NodeRegistry`])
//! - Edges point from prerequisite to dependent (held by the [`EdgeStore`])
//! - Traversals visit nodes in ordinal order
//!
//! # Invariants
//!
//! - Graph must be acyclic (checked by [`crate::core::cycle`], not enforced here)
//! - Every edge endpoint is registered
//! - The graph is built once per run and only read afterwards

use std::collections::{BTreeSet, VecDeque};

use thiserror::Error;

use super::edges::{Declaration, DependencyEdge, EdgeStore};
use super::registry::{LessonNode, NodeRegistry};
use super::types::{LessonId, Ordinal};

/// Structural errors while building the graph.
///
/// Any of these aborts loading: a graph with unknown references or clashing
/// identities cannot be analyzed meaningfully.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("duplicate lesson id: {0}")]
    DuplicateId(LessonId),

    #[error("duplicate ordinal {ordinal}: held by '{existing}', also claimed by '{rejected}'")]
    DuplicateOrdinal {
        ordinal: Ordinal,
        existing: LessonId,
        rejected: LessonId,
    },

    #[error("unknown lesson '{id}' (referenced by '{referenced_by}')")]
    UnknownNode { id: LessonId, referenced_by: LessonId },

    #[error("lesson '{0}' cannot depend on itself")]
    SelfLoop(LessonId),
}

/// The lesson dependency graph: registered sections plus prerequisite edges.
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    registry: NodeRegistry,
    edges: EdgeStore,
}

impl DependencyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a lesson section.
    ///
    /// See [`NodeRegistry::register`].
    pub fn register(
        &mut self,
        id: LessonId,
        title: impl Into<String>,
        ordinal: Ordinal,
    ) -> Result<(), GraphError> {
        self.registry.register(id, title, ordinal)
    }

    /// Add an edge declared consistently on both sides.
    ///
    /// See [`EdgeStore::add_edge`].
    pub fn add_edge(&mut self, from: &LessonId, to: &LessonId) -> Result<(), GraphError> {
        self.edges.add_edge(&self.registry, from, to)
    }

    /// Record a single-sided declaration of `from -> to`.
    pub fn declare(
        &mut self,
        from: &LessonId,
        to: &LessonId,
        declaration: Declaration,
    ) -> Result<(), GraphError> {
        self.edges.declare(&self.registry, from, to, declaration)
    }

    /// Look up a section by id.
    pub fn lookup(&self, id: &LessonId) -> Option<&LessonNode> {
        self.registry.lookup(id)
    }

    /// All sections in ordinal order.
    pub fn nodes(&self) -> impl Iterator<Item = &LessonNode> {
        self.registry.iter()
    }

    /// All edges in deterministic order.
    pub fn edges(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.edges.iter()
    }

    /// Number of sections.
    pub fn node_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The node registry.
    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// The edge store.
    pub fn edge_store(&self) -> &EdgeStore {
        &self.edges
    }

    /// Direct prerequisites of a section, in ordinal order.
    pub fn prerequisites(&self, id: &LessonId) -> Vec<&LessonNode> {
        self.neighbours(id, |ordinal| self.edges.prerequisites(ordinal).collect())
    }

    /// Direct dependents of a section, in ordinal order.
    pub fn dependents(&self, id: &LessonId) -> Vec<&LessonNode> {
        self.neighbours(id, |ordinal| self.edges.dependents(ordinal).collect())
    }

    fn neighbours<F>(&self, id: &LessonId, step: F) -> Vec<&LessonNode>
    where
        F: Fn(Ordinal) -> Vec<Ordinal>,
    {
        self.registry
            .ordinal_of(id)
            .map(|ordinal| {
                step(ordinal)
                    .into_iter()
                    .filter_map(|o| self.registry.at(o))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every section that must be taught before `id` (transitively).
    ///
    /// Uses breadth-first traversal over prerequisite edges. The result is
    /// sorted by ordinal and never contains `id` itself, even on a cycle.
    ///
    /// # Example
    ///
    /// ```
    /// use syllabus::core::graph::DependencyGraph;
    /// use syllabus::core::types::{LessonId, Ordinal};
    ///
    /// let mut graph = DependencyGraph::new();
    /// let net = LessonId::new("net").unwrap();
    /// let auth = LessonId::new("auth").unwrap();
    /// let cache = LessonId::new("cache").unwrap();
    /// graph.register(net.clone(), "Networking", Ordinal::new(1).unwrap()).unwrap();
    /// graph.register(auth.clone(), "Auth", Ordinal::new(2).unwrap()).unwrap();
    /// graph.register(cache.clone(), "Caching", Ordinal::new(3).unwrap()).unwrap();
    /// graph.add_edge(&net, &auth).unwrap();
    /// graph.add_edge(&auth, &cache).unwrap();
    ///
    /// let ids: Vec<_> = graph.ancestors(&cache).iter().map(|n| n.id.clone()).collect();
    /// assert_eq!(ids, vec![net, auth]);
    /// ```
    pub fn ancestors(&self, id: &LessonId) -> Vec<&LessonNode> {
        self.reachable(id, |ordinal| self.edges.prerequisites(ordinal).collect())
    }

    /// Every section that builds on `id` (transitively), sorted by ordinal.
    pub fn descendants(&self, id: &LessonId) -> Vec<&LessonNode> {
        self.reachable(id, |ordinal| self.edges.dependents(ordinal).collect())
    }

    fn reachable<F>(&self, id: &LessonId, step: F) -> Vec<&LessonNode>
    where
        F: Fn(Ordinal) -> Vec<Ordinal>,
    {
        let Some(start) = self.registry.ordinal_of(id) else {
            return Vec::new();
        };

        let mut seen = BTreeSet::new();
        let mut queue = VecDeque::from(step(start));

        while let Some(current) = queue.pop_front() {
            if current != start && seen.insert(current) {
                queue.extend(step(current));
            }
        }

        seen.into_iter()
            .filter_map(|o| self.registry.at(o))
            .collect()
    }

    /// Section ids in declared ordinal order.
    pub fn declared_order(&self) -> Vec<LessonId> {
        self.registry.iter().map(|n| n.id.clone()).collect()
    }
}
