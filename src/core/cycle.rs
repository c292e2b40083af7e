//! core::cycle
//!
//! Cycle detection over the lesson dependency graph.
//!
//! Depth-first traversal on an explicit work stack, so deep chains cannot
//! exhaust the thread stack. Roots and
//! neighbours are visited in ordinal order, so the reported path is the same
//! on every run for the same matrix.

use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use super::graph::DependencyGraph;
use super::types::{LessonId, Ordinal};

/// A cycle as an ordered path that starts and ends at the same section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CyclePath(Vec<LessonId>);

impl CyclePath {
    /// The full path, including the closing repeat (`[a, b, c, a]`).
    pub fn nodes(&self) -> &[LessonId] {
        &self.0
    }

    /// Distinct members of the cycle (`[a, b, c]`).
    pub fn members(&self) -> &[LessonId] {
        match self.0.split_last() {
            Some((_, rest)) => rest,
            None => &[],
        }
    }

    /// Check whether the path is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Human-readable trace, e.g. `a -> b -> c -> a`.
    pub fn trace(&self) -> String {
        self.0
            .iter()
            .map(LessonId::as_str)
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

impl std::fmt::Display for CyclePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.trace())
    }
}

/// The graph is not a DAG.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cycle detected in lesson graph: {path}")]
pub struct CycleError {
    /// The offending cycle
    pub path: CyclePath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnStack,
    Done,
}

/// Find the first cycle in the graph.
///
/// Returns `None` if the graph is acyclic.
///
/// # Example
///
/// ```
/// use syllabus::core::cycle::detect_cycle;
/// use syllabus::core::graph::DependencyGraph;
/// use syllabus::core::types::{LessonId, Ordinal};
///
/// let mut graph = DependencyGraph::new();
/// let ids: Vec<_> = ["a", "b", "c"].iter().map(|s| LessonId::new(*s).unwrap()).collect();
/// for (i, id) in ids.iter().enumerate() {
///     graph.register(id.clone(), id.as_str(), Ordinal::new(i as u32 + 1).unwrap()).unwrap();
/// }
/// graph.add_edge(&ids[0], &ids[1]).unwrap();
/// graph.add_edge(&ids[1], &ids[2]).unwrap();
/// graph.add_edge(&ids[2], &ids[0]).unwrap();
///
/// let cycle = detect_cycle(&graph).unwrap();
/// assert_eq!(cycle.trace(), "a -> b -> c -> a");
/// ```
pub fn detect_cycle(graph: &DependencyGraph) -> Option<CyclePath> {
    let mut finder = CycleFinder::new(graph, true);
    finder.run();
    finder.cycles.into_iter().next()
}

/// Find every cycle closed by a back edge in one traversal.
///
/// The first element, if any, equals [`detect_cycle`].
pub fn detect_cycles(graph: &DependencyGraph) -> Vec<CyclePath> {
    let mut finder = CycleFinder::new(graph, false);
    finder.run();
    finder.cycles
}

struct CycleFinder<'g> {
    graph: &'g DependencyGraph,
    first_only: bool,
    marks: HashMap<Ordinal, Mark>,
    stack: Vec<Ordinal>,
    cycles: Vec<CyclePath>,
}

impl<'g> CycleFinder<'g> {
    fn new(graph: &'g DependencyGraph, first_only: bool) -> Self {
        Self {
            graph,
            first_only,
            marks: HashMap::new(),
            stack: Vec::new(),
            cycles: Vec::new(),
        }
    }

    fn run(&mut self) {
        let roots: Vec<Ordinal> = self.graph.nodes().map(|n| n.ordinal).collect();
        for root in roots {
            if !self.marks.contains_key(&root) && self.visit(root) {
                return;
            }
        }
    }

    /// Depth-first walk from `root` on an explicit work stack.
    ///
    /// Each frame holds a node's dependents and the index of the next one
    /// to try; `self.stack` mirrors the frames as the current path.
    /// Returns true when the traversal should stop.
    fn visit(&mut self, root: Ordinal) -> bool {
        let mut frames: Vec<(Vec<Ordinal>, usize)> = vec![self.enter(root)];

        while let Some((dependents, next)) = frames.last_mut() {
            let Some(&dependent) = dependents.get(*next) else {
                frames.pop();
                if let Some(done) = self.stack.pop() {
                    self.marks.insert(done, Mark::Done);
                }
                continue;
            };
            *next += 1;

            match self.marks.get(&dependent).copied() {
                Some(Mark::OnStack) => {
                    self.record(dependent);
                    if self.first_only {
                        return true;
                    }
                }
                Some(Mark::Done) => {}
                None => frames.push(self.enter(dependent)),
            }
        }

        false
    }

    fn enter(&mut self, node: Ordinal) -> (Vec<Ordinal>, usize) {
        self.marks.insert(node, Mark::OnStack);
        self.stack.push(node);
        (self.graph.edge_store().dependents(node).collect(), 0)
    }

    fn record(&mut self, repeated: Ordinal) {
        let Some(start) = self.stack.iter().position(|o| *o == repeated) else {
            return;
        };
        let registry = self.graph.registry();
        let path: Vec<LessonId> = self.stack[start..]
            .iter()
            .chain(std::iter::once(&repeated))
            .filter_map(|o| registry.at(*o).map(|n| n.id.clone()))
            .collect();
        let cycle = CyclePath(path);
        tracing::debug!(%cycle, "back edge");
        self.cycles.push(cycle);
    }
}
