//! check::consistency
//!
//! Consistency checks over a built dependency graph.
//!
//! # Checks
//!
//! - Symmetry: each edge must be declared by both `depends_on` and `enables`
//! - Repeats: each list names a section at most once
//! - Forward references: prerequisites carry a lower ordinal
//! - Ordinal density: ordinals are exactly `1..=N`
//! - Orphans: with more than one section, each one touches an edge
//!
//! # Invariants
//!
//! - Pure: never mutates the graph
//! - Exhaustive: reports every problem, not the first one
//! - Deterministic: issues come out in edge order, then graph order

use super::issues::{Inconsistency, InconsistencyKind};
use crate::core::graph::DependencyGraph;

/// Options for the consistency checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckOptions {
    /// Flag sections that touch no edge
    pub require_connected: bool,
    /// Warnings fail the check
    pub strict: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            require_connected: true,
            strict: false,
        }
    }
}

/// Run every consistency check.
pub fn check(graph: &DependencyGraph, options: &CheckOptions) -> Vec<Inconsistency> {
    let mut issues = Vec::new();
    check_edges(graph, &mut issues);
    check_ordinals(graph, &mut issues);
    if options.require_connected {
        check_orphans(graph, &mut issues);
    }
    tracing::debug!(issues = issues.len(), "consistency checked");
    issues
}

fn check_edges(graph: &DependencyGraph, issues: &mut Vec<Inconsistency>) {
    let registry = graph.registry();

    for edge in graph.edges() {
        let (from, to) = (&edge.prerequisite, &edge.dependent);

        if !edge.declared_by_dependent() {
            issues.push(Inconsistency::edge(InconsistencyKind::MissingDependsOn, from, to));
        }
        if !edge.declared_by_prerequisite() {
            issues.push(Inconsistency::edge(InconsistencyKind::MissingEnables, from, to));
        }
        if edge.depends_on_count > 1 {
            issues.push(
                Inconsistency::edge(InconsistencyKind::DuplicateDeclaration, from, to).with_detail(
                    format!(
                        "'{from}' listed {} times in depends_on of '{to}'",
                        edge.depends_on_count
                    ),
                ),
            );
        }
        if edge.enables_count > 1 {
            issues.push(
                Inconsistency::edge(InconsistencyKind::DuplicateDeclaration, from, to).with_detail(
                    format!(
                        "'{to}' listed {} times in enables of '{from}'",
                        edge.enables_count
                    ),
                ),
            );
        }

        if let (Some(a), Some(b)) = (registry.ordinal_of(from), registry.ordinal_of(to)) {
            if a > b {
                issues.push(
                    Inconsistency::edge(InconsistencyKind::ForwardReference, from, to)
                        .with_detail(format!("ordinal {a} comes after {b}")),
                );
            }
        }
    }
}

fn check_ordinals(graph: &DependencyGraph, issues: &mut Vec<Inconsistency>) {
    let mut missing = Vec::new();
    let mut expected = 1u32;

    for node in graph.nodes() {
        let ordinal = node.ordinal.get();
        if ordinal > expected {
            missing.push(if ordinal - 1 == expected {
                expected.to_string()
            } else {
                format!("{}-{}", expected, ordinal - 1)
            });
        }
        expected = ordinal.saturating_add(1);
    }

    if !missing.is_empty() {
        issues.push(Inconsistency::graph(
            InconsistencyKind::OrdinalGap,
            format!("missing {}", missing.join(", ")),
        ));
    }
}

fn check_orphans(graph: &DependencyGraph, issues: &mut Vec<Inconsistency>) {
    if graph.node_count() < 2 {
        return;
    }

    let edges = graph.edge_store();
    for node in graph.nodes() {
        if edges.in_degree(node.ordinal) == 0 && edges.out_degree(node.ordinal) == 0 {
            issues.push(Inconsistency::node(InconsistencyKind::OrphanNode, &node.id));
        }
    }
}
