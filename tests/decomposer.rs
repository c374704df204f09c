//! Tests for splitting canvas graphs into workflows.
mod common;
use benchflow::decomposer::{DecompositionCache, start_candidates, uncovered_nodes};
use benchflow::prelude::*;
use common::*;

#[test]
fn test_empty_canvas_has_no_workflows() {
    assert!(decompose(&[], &[]).is_empty());
    // Edges without nodes still yield nothing.
    let edges = vec![edge("e1", "a", "b")];
    assert!(decompose(&[], &edges).is_empty());
}

#[test]
fn test_linear_chain() {
    let nodes = vec![node("A", "pcr"), node("B", "dpn1"), node("C", "run-gel")];
    let edges = vec![edge("e1", "A", "B"), edge("e2", "B", "C")];

    let workflows = decompose(&nodes, &edges);
    assert_eq!(chain_ids(&workflows), vec![vec!["A", "B", "C"]]);
    assert_eq!(
        chain_services(&workflows),
        vec![vec!["pcr", "dpn1", "run-gel"]]
    );
}

#[test]
fn test_disconnected_chains() {
    let nodes = vec![
        node("A", "pcr"),
        node("B", "dpn1"),
        node("C", "pcr"),
        node("D", "run-gel"),
    ];
    let edges = vec![edge("e1", "A", "B"), edge("e2", "C", "D")];

    let workflows = decompose(&nodes, &edges);
    assert_eq!(chain_ids(&workflows), vec![vec!["A", "B"], vec!["C", "D"]]);
}

#[test]
fn test_isolated_node_is_its_own_workflow() {
    let nodes = vec![node("A", "pcr")];
    assert_eq!(chain_ids(&decompose(&nodes, &[])), vec![vec!["A"]]);
}

#[test]
fn test_chain_heads_come_before_isolated_nodes() {
    let nodes = vec![node("I", "sequencing"), node("A", "pcr"), node("B", "dpn1")];
    let edges = vec![edge("e1", "A", "B")];

    assert_eq!(start_candidates(&nodes, &edges), vec!["A", "I"]);
    assert_eq!(
        chain_ids(&decompose(&nodes, &edges)),
        vec![vec!["A", "B"], vec!["I"]]
    );
}

#[test]
fn test_edge_order_does_not_need_to_follow_the_chain() {
    let nodes = vec![node("A", "pcr"), node("B", "dpn1"), node("C", "run-gel")];
    let edges = vec![edge("e2", "B", "C"), edge("e1", "A", "B")];

    assert_eq!(
        chain_ids(&decompose(&nodes, &edges)),
        vec![vec!["A", "B", "C"]]
    );
}

#[test]
fn test_dangling_target_truncates_without_panicking() {
    let nodes = vec![node("A", "pcr"), node("B", "dpn1")];
    let edges = vec![edge("e1", "A", "B"), edge("e2", "B", "ghost")];

    assert_eq!(chain_ids(&decompose(&nodes, &edges)), vec![vec!["A", "B"]]);

    let err = decompose_strict(&nodes, &edges).unwrap_err();
    assert_eq!(
        err,
        GraphIntegrityError::DanglingEdge {
            edge_id: "e2".to_string(),
            missing_node_id: "ghost".to_string(),
        }
    );
}

#[test]
fn test_strict_matches_lenient_on_sound_graphs() {
    let nodes = vec![
        node("A", "pcr"),
        node("B", "dpn1"),
        node("C", "pcr"),
        node("D", "sequencing"),
    ];
    let edges = vec![edge("e1", "A", "B"), edge("e2", "C", "D")];

    let lenient = chain_ids(&decompose(&nodes, &edges));
    let strict = chain_ids(&decompose_strict(&nodes, &edges).unwrap());
    assert_eq!(lenient, strict);
}

#[test]
fn test_branch_follows_first_inserted_edge() {
    let nodes = vec![node("A", "pcr"), node("B", "dpn1"), node("C", "run-gel")];
    let edges = vec![edge("e1", "A", "C"), edge("e2", "A", "B")];

    let workflows = decompose(&nodes, &edges);
    assert_eq!(chain_ids(&workflows), vec![vec!["A", "C"]]);

    let uncovered: Vec<&str> = uncovered_nodes(&nodes, &edges)
        .iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(uncovered, vec!["B"]);
}

#[test]
fn test_diamond_loses_the_second_branch() {
    let nodes = vec![
        node("A", "pcr"),
        node("B", "dpn1"),
        node("C", "run-gel"),
        node("D", "gel-extraction"),
    ];
    let edges = vec![
        edge("e1", "A", "B"),
        edge("e2", "A", "C"),
        edge("e3", "B", "D"),
        edge("e4", "C", "D"),
    ];

    assert_eq!(
        chain_ids(&decompose(&nodes, &edges)),
        vec![vec!["A", "B", "D"]]
    );
    let uncovered: Vec<&str> = uncovered_nodes(&nodes, &edges)
        .iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(uncovered, vec!["C"]);
}

#[test]
fn test_every_node_covered_for_chains_and_isolated_nodes() {
    let nodes = vec![
        node("A", "pcr"),
        node("B", "dpn1"),
        node("C", "run-gel"),
        node("X", "sequencing"),
        node("Y", "pcr"),
        node("Z", "run-gel"),
    ];
    let edges = vec![
        edge("e1", "A", "B"),
        edge("e2", "B", "C"),
        edge("e3", "Y", "Z"),
    ];

    let workflows = decompose(&nodes, &edges);
    let mut covered: Vec<&str> = workflows.iter().flatten().map(|n| n.id.as_str()).collect();
    covered.sort();
    assert_eq!(covered, vec!["A", "B", "C", "X", "Y", "Z"]);
    assert!(uncovered_nodes(&nodes, &edges).is_empty());
}

#[test]
fn test_decompose_is_idempotent() {
    let nodes = vec![
        node("A", "pcr"),
        node("B", "dpn1"),
        node("C", "pcr"),
        node("D", "run-gel"),
        node("E", "sequencing"),
    ];
    let edges = vec![edge("e1", "C", "D"), edge("e2", "A", "B")];

    let first = chain_ids(&decompose(&nodes, &edges));
    let second = chain_ids(&decompose(&nodes, &edges));
    assert_eq!(first, second);
    assert_eq!(first, vec![vec!["C", "D"], vec!["A", "B"], vec!["E"]]);
}

#[test]
fn test_cache_recomputes_only_after_mutation() {
    let mut canvas = filled_cloning_canvas();
    let mut cache = DecompositionCache::new();

    let first = cache.chains(&canvas).to_vec();
    let second = cache.chains(&canvas).to_vec();
    assert_eq!(first, second);
    assert_eq!(cache.recomputations(), 1);

    let last = first[0][2].clone();
    canvas.remove_node(&last).unwrap();
    let after = cache.workflows(&canvas);
    assert_eq!(after[0].len(), 2);
    assert_eq!(cache.recomputations(), 2);
}

#[test]
fn test_cache_tells_cloned_canvases_apart() {
    let mut original = empty_canvas();
    original.insert_node(node("x", "pcr")).unwrap();
    let mut copy = original.clone();
    assert_ne!(original.id(), copy.id());

    original.insert_node(node("y", "dpn1")).unwrap();
    copy.insert_node(node("z", "run-gel")).unwrap();
    assert_eq!(original.revision(), copy.revision());

    let mut cache = DecompositionCache::new();
    assert_eq!(cache.chains(&original).to_vec(), vec![vec!["x"], vec!["y"]]);
    assert_eq!(cache.chains(&copy).to_vec(), vec![vec!["x"], vec!["z"]]);
    assert_eq!(cache.recomputations(), 2);
}
