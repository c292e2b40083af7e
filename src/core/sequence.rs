//! core::sequence
//!
//! Topological sequencing of lesson sections.
//!
//! Kahn's algorithm: repeatedly take a section with no untaught
//! prerequisites. When several are ready, the lowest declared ordinal wins,
//! so a matrix whose declared order is already legal sequences to exactly
//! that order.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use super::cycle::{detect_cycle, CycleError};
use super::graph::DependencyGraph;
use super::types::{LessonId, Ordinal};

/// Produce a teaching order satisfying every prerequisite edge.
///
/// # Errors
///
/// Returns `CycleError` carrying the cycle detector's path if the graph is
/// not a DAG. A partial order is never returned.
///
/// # Example
///
/// ```
/// use syllabus::core::graph::DependencyGraph;
/// use syllabus::core::sequence::sequence;
/// use syllabus::core::types::{LessonId, Ordinal};
///
/// let mut graph = DependencyGraph::new();
/// let net = LessonId::new("net").unwrap();
/// let auth = LessonId::new("auth").unwrap();
/// graph.register(auth.clone(), "Auth", Ordinal::new(1).unwrap()).unwrap();
/// graph.register(net.clone(), "Networking", Ordinal::new(2).unwrap()).unwrap();
/// graph.add_edge(&net, &auth).unwrap();
///
/// assert_eq!(sequence(&graph).unwrap(), vec![net, auth]);
/// ```
pub fn sequence(graph: &DependencyGraph) -> Result<Vec<LessonId>, CycleError> {
    let edges = graph.edge_store();
    let mut in_degree: HashMap<Ordinal, usize> = graph
        .nodes()
        .map(|n| (n.ordinal, edges.in_degree(n.ordinal)))
        .collect();

    let mut ready: BinaryHeap<Reverse<Ordinal>> = in_degree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(ordinal, _)| Reverse(*ordinal))
        .collect();

    let mut order = Vec::with_capacity(graph.node_count());
    while let Some(Reverse(current)) = ready.pop() {
        if let Some(node) = graph.registry().at(current) {
            order.push(node.id.clone());
        }
        for dependent in edges.dependents(current) {
            if let Some(degree) = in_degree.get_mut(&dependent) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push(Reverse(dependent));
                }
            }
        }
    }

    if order.len() < graph.node_count() {
        // Kahn stalls only when the remaining nodes contain a cycle.
        let path = detect_cycle(graph).unwrap_or_default();
        tracing::debug!(
            sequenced = order.len(),
            total = graph.node_count(),
            "sequencing stalled"
        );
        return Err(CycleError { path });
    }

    Ok(order)
}

/// Check whether the declared ordinals already form a legal teaching order.
///
/// True when no edge points from a higher ordinal to a lower one. An empty
/// graph is trivially legal.
pub fn declared_order_is_legal(graph: &DependencyGraph) -> bool {
    let registry = graph.registry();
    graph.edges().all(|edge| {
        match (
            registry.ordinal_of(&edge.prerequisite),
            registry.ordinal_of(&edge.dependent),
        ) {
            (Some(from), Some(to)) => from < to,
            _ => true,
        }
    })
}
