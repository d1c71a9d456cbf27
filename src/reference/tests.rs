use super::*;

use crate::{Edit, HashGraph, PathStep};
use crate::internal::{self, forward, reverse};

use rand::Rng;

//-----------------------------------------------------------------------------

// A random path over distinct nodes with random orientations.
fn random_path(nodes: usize) -> (HashGraph, Vec<(usize, Orientation)>) {
    let mut rng = rand::thread_rng();
    let bases = b"ACGT";
    let mut graph = HashGraph::new();
    let mut steps = Vec::with_capacity(nodes);
    for node_id in 1..=nodes {
        let len = rng.gen_range(1..10);
        let sequence: Vec<u8> = (0..len).map(|_| bases[rng.gen_range(0..bases.len())]).collect();
        graph.add_node(node_id, &sequence).unwrap();
        let orientation = if rng.gen_bool(0.5) { Orientation::Forward } else { Orientation::Reverse };
        steps.push((node_id, orientation));
    }
    for window in steps.windows(2) {
        graph.add_edge(window[0], window[1]).unwrap();
    }
    internal::add_path(&mut graph, "ref", &steps);
    (graph, steps)
}

//-----------------------------------------------------------------------------

#[test]
fn example_reference() {
    let graph = internal::load_example_graph();
    let reference = internal::trace_reference(&graph, "ref");
    assert_eq!(reference.path_name(), "ref", "Wrong path name");
    assert_eq!(reference.sequence(), b"ACGTACGGATCCAGT", "Wrong reference sequence");
    assert_eq!(reference.len(), 15, "Wrong reference length");
    assert!(!reference.is_empty(), "The reference should not be empty");
    assert_eq!(reference.nodes(), 4, "Wrong number of reference nodes");
    assert_eq!(reference.steps(), 4, "Wrong number of indexed steps");

    let truth = [(1, 0), (2, 5), (4, 6), (6, 11)];
    for (node_id, coordinate) in truth {
        let placement = reference.placement(node_id);
        assert_eq!(placement, Some(Placement { coordinate, orientation: Orientation::Forward }), "Wrong placement for node {}", node_id);
    }
    for node_id in [3, 5, 7, 8, 9, 10, 11] {
        assert!(!reference.contains(node_id), "Node {} should not be on the reference", node_id);
        assert!(reference.placement(node_id).is_none(), "Node {} should not have a placement", node_id);
    }
}

#[test]
fn random_linear_paths() {
    for _ in 0..10 {
        let (graph, steps) = random_path(20);
        let reference = internal::trace_reference(&graph, "ref");

        let mut expected = Vec::new();
        for (node_id, orientation) in steps.iter() {
            let placement = reference.placement(*node_id);
            assert_eq!(
                placement, Some(Placement { coordinate: expected.len(), orientation: *orientation }),
                "Wrong placement for node {}", node_id
            );
            let sequence = graph.node_sequence(*node_id).unwrap();
            match orientation {
                Orientation::Forward => expected.extend_from_slice(sequence),
                Orientation::Reverse => expected.extend(support::reverse_complement(sequence)),
            }
        }
        assert_eq!(reference.sequence(), expected.as_slice(), "Wrong reference sequence");

        // Every coordinate maps to the node covering it.
        for coordinate in 0..reference.len() {
            let result = reference.node_at(coordinate);
            assert!(result.is_some(), "No node at coordinate {}", coordinate);
            let (start, handle) = result.unwrap();
            let node_id = support::node_id(handle);
            let placement = reference.placement(node_id).unwrap();
            assert_eq!(start, placement.coordinate, "Wrong start for coordinate {}", coordinate);
            assert_eq!(support::node_orientation(handle), placement.orientation, "Wrong orientation for coordinate {}", coordinate);
            let len = graph.node_len(node_id).unwrap();
            assert!(coordinate < start + len, "Node {} at {} does not cover coordinate {}", node_id, start, coordinate);
        }
    }
}

#[test]
fn reverse_complement_round_trip() {
    let mut graph = internal::build_graph(&["GATT", "ACA"], &[(forward(1), forward(2))]);
    internal::add_path(&mut graph, "ref", &[forward(1), forward(2)]);
    internal::add_path(&mut graph, "rev", &[reverse(2), reverse(1)]);

    let forward_ref = internal::trace_reference(&graph, "ref");
    let reverse_ref = internal::trace_reference(&graph, "rev");
    assert_eq!(forward_ref.sequence(), b"GATTACA", "Wrong forward sequence");
    assert_eq!(reverse_ref.sequence(), support::reverse_complement(forward_ref.sequence()).as_slice(), "Wrong reverse sequence");
    assert_eq!(reverse_ref.placement(2).map(|p| p.coordinate), Some(0), "Wrong placement for node 2 on the reverse path");
    assert_eq!(reverse_ref.placement(1).map(|p| p.coordinate), Some(3), "Wrong placement for node 1 on the reverse path");
    assert!(reverse_ref.placement(1).unwrap().is_reverse(), "Node 1 should be reverse on the reverse path");
}

#[test]
fn revisited_nodes() {
    let mut graph = internal::build_graph(&["GA", "T", "C"], &[(forward(1), forward(2)), (forward(2), forward(1)), (forward(1), forward(3))]);
    internal::add_path(&mut graph, "ref", &[forward(1), forward(2), forward(1), forward(3)]);
    let reference = internal::trace_reference(&graph, "ref");

    assert_eq!(reference.sequence(), b"GATGAC", "Wrong sequence for a path with a revisit");
    assert_eq!(reference.nodes(), 3, "Wrong number of distinct nodes");
    assert_eq!(reference.steps(), 4, "Every visit should be indexed");
    assert_eq!(reference.placement(1).map(|p| p.coordinate), Some(0), "The first visit should determine the placement");
    assert_eq!(reference.placement(3).map(|p| p.coordinate), Some(5), "Wrong placement after the revisit");
    assert_eq!(reference.node_at(4), Some((3, support::encode_node(1, Orientation::Forward))), "Wrong step for the revisit");
}

#[test]
fn empty_nodes() {
    let mut graph = internal::build_graph(&["GAT", "", "TACA"], &[]);
    internal::add_path(&mut graph, "ref", &[forward(1), forward(2), forward(3)]);
    let reference = internal::trace_reference(&graph, "ref");

    assert_eq!(reference.sequence(), b"GATTACA", "Wrong sequence with an empty node");
    assert_eq!(reference.placement(2).map(|p| p.coordinate), Some(3), "Wrong placement for the empty node");
    assert_eq!(reference.steps(), 2, "The empty node should not have its own index entry");
    assert_eq!(reference.node_at(3), Some((3, support::encode_node(3, Orientation::Forward))), "Wrong step after the empty node");
}

#[test]
fn empty_path() {
    let mut graph = internal::build_graph(&["GAT"], &[]);
    internal::add_path(&mut graph, "ref", &[]);
    let reference = internal::trace_reference(&graph, "ref");
    assert!(reference.is_empty(), "The reference should be empty");
    assert_eq!(reference.nodes(), 0, "An empty path should not have nodes");
    assert!(reference.node_at(0).is_none(), "An empty path should not have steps");
}

#[test]
fn missing_path() {
    let graph = internal::load_example_graph();
    let result = ReferenceIndex::new(&graph, "chr1");
    assert!(matches!(result, Err(Error::MissingPath(ref name)) if name == "chr1"), "Expected a missing path error");
}

#[test]
fn imperfect_mapping() {
    let mut graph = internal::build_graph(&["GAT", "TACA"], &[(forward(1), forward(2))]);
    let mut second = PathStep::new(2, Orientation::Forward);
    second.edits.push(Edit::deletion(1));
    graph.add_path("ref", vec![PathStep::new(1, Orientation::Forward), second]).unwrap();

    let result = ReferenceIndex::new(&graph, "ref");
    assert!(
        matches!(result, Err(Error::ImperfectMapping { node_id: 2, step: 1, .. })),
        "Expected an imperfect mapping error for node 2"
    );
}

//-----------------------------------------------------------------------------
