//! Property-based tests for graph algorithms.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated curricula.

use std::collections::{BTreeSet, HashMap};

use proptest::prelude::*;

use syllabus::check::{run, CheckOptions};
use syllabus::core::cycle::{detect_cycle, detect_cycles};
use syllabus::core::graph::DependencyGraph;
use syllabus::core::sequence::{declared_order_is_legal, sequence};
use syllabus::core::types::{LessonId, Ordinal};

fn lesson(i: usize) -> LessonId {
    LessonId::new(format!("s{i}")).unwrap()
}

/// Strategy for generating acyclic edge sets.
///
/// Edges always point from a lower index to a higher one, so the result is
/// a DAG by construction. Ordinals are a random permutation of `1..=n`.
fn dag_strategy() -> impl Strategy<Value = (Vec<u32>, BTreeSet<(usize, usize)>)> {
    (1usize..15).prop_flat_map(|n| {
        let ordinals: Vec<u32> = (1..=n as u32).collect();
        (
            Just(ordinals).prop_shuffle(),
            prop::collection::vec((0..n, 0..n), 0..30).prop_map(|pairs| {
                pairs
                    .into_iter()
                    .filter(|(a, b)| a != b)
                    .map(|(a, b)| (a.min(b), a.max(b)))
                    .collect::<BTreeSet<_>>()
            }),
        )
    })
}

/// Build a graph where node `i` has ordinal `ordinals[i]`.
fn build_graph(ordinals: &[u32], edges: &BTreeSet<(usize, usize)>) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for (i, &ordinal) in ordinals.iter().enumerate() {
        graph
            .register(lesson(i), format!("Section {i}"), Ordinal::new(ordinal).unwrap())
            .unwrap();
    }
    for &(from, to) in edges {
        graph.add_edge(&lesson(from), &lesson(to)).unwrap();
    }
    graph
}

proptest! {
    /// Generated DAGs never have cycles (validates our strategy is correct).
    #[test]
    fn generated_dag_has_no_cycles((ordinals, edges) in dag_strategy()) {
        let graph = build_graph(&ordinals, &edges);
        prop_assert!(detect_cycle(&graph).is_none());
        prop_assert!(detect_cycles(&graph).is_empty());
    }

    /// The teaching order is a permutation that respects every edge.
    #[test]
    fn sequence_respects_edges((ordinals, edges) in dag_strategy()) {
        let graph = build_graph(&ordinals, &edges);
        let order = sequence(&graph).unwrap();

        prop_assert_eq!(order.len(), ordinals.len());
        let position: HashMap<&LessonId, usize> =
            order.iter().enumerate().map(|(i, id)| (id, i)).collect();
        prop_assert_eq!(position.len(), ordinals.len());

        for &(from, to) in &edges {
            prop_assert!(
                position[&lesson(from)] < position[&lesson(to)],
                "s{} must come before s{}", from, to
            );
        }
    }

    /// A legal declared order is reproduced exactly.
    #[test]
    fn legal_declared_order_is_kept((_, edges) in dag_strategy(), n in 1usize..15) {
        let n = edges.iter().map(|&(_, b)| b + 1).max().unwrap_or(1).max(n);
        let ordinals: Vec<u32> = (1..=n as u32).collect();
        let graph = build_graph(&ordinals, &edges);

        prop_assert!(declared_order_is_legal(&graph));
        prop_assert_eq!(sequence(&graph).unwrap(), graph.declared_order());
    }

    /// Adding an edge back along a path always creates a detectable cycle.
    #[test]
    fn back_edge_is_detected(
        (ordinals, edges) in dag_strategy(),
        pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(ordinals.len() >= 2);
        let n = ordinals.len();
        let mut edges = edges;
        // A chain guarantees every lower index reaches every higher one.
        for i in 1..n {
            edges.insert((i - 1, i));
        }
        let mut graph = build_graph(&ordinals, &edges);

        let back_from = 1 + pick.index(n - 1);
        graph.add_edge(&lesson(back_from), &lesson(0)).unwrap();

        let cycle = detect_cycle(&graph);
        prop_assert!(cycle.is_some());
        let cycle = cycle.unwrap();
        prop_assert_eq!(cycle.nodes().first(), cycle.nodes().last());

        let err = sequence(&graph).unwrap_err();
        prop_assert!(!err.path.is_empty());
        prop_assert!(!run(&graph, &CheckOptions::default()).is_ok());
    }

    /// Checking the same graph twice yields the same report.
    #[test]
    fn check_is_idempotent((ordinals, edges) in dag_strategy()) {
        let graph = build_graph(&ordinals, &edges);
        let options = CheckOptions::default();
        prop_assert_eq!(run(&graph, &options), run(&graph, &options));
    }

    /// Every node on a found cycle really has an edge to the next one.
    #[test]
    fn cycle_paths_follow_edges(
        (ordinals, edges) in dag_strategy(),
        back in prop::collection::vec((0usize..15, 0usize..15), 1..4),
    ) {
        let n = ordinals.len();
        let mut graph = build_graph(&ordinals, &edges);
        for (a, b) in back {
            let (a, b) = (a % n, b % n);
            if a > b {
                graph.add_edge(&lesson(a), &lesson(b)).unwrap();
            }
        }

        for cycle in detect_cycles(&graph) {
            for pair in cycle.nodes().windows(2) {
                let dependents = graph.dependents(&pair[0]);
                prop_assert!(
                    dependents.iter().any(|node| node.id == pair[1]),
                    "{} -> {} is not an edge", pair[0], pair[1]
                );
            }
        }
    }
}
