use crate::{gfa, utils};
use crate::{BaseCall, CallTable, GraphAccessor, HashGraph, PathStep, ReferenceIndex};

use gbwt::Orientation;

//-----------------------------------------------------------------------------

// Test fixtures.

pub(crate) fn load_example_graph() -> HashGraph {
    let filename = utils::get_test_data("example.gfa");
    let graph = gfa::load_gfa(&filename);
    assert!(graph.is_ok(), "Failed to load {}: {}", filename.display(), graph.unwrap_err());
    graph.unwrap()
}

pub(crate) fn load_example_calls() -> CallTable {
    let filename = utils::get_test_data("example.calls");
    let calls = CallTable::load(&filename);
    assert!(calls.is_ok(), "Failed to load {}: {}", filename.display(), calls.unwrap_err());
    calls.unwrap()
}

pub(crate) fn trace_reference<G: GraphAccessor + ?Sized>(graph: &G, path_name: &str) -> ReferenceIndex {
    let reference = ReferenceIndex::new(graph, path_name);
    assert!(reference.is_ok(), "Failed to trace reference path {}: {}", path_name, reference.unwrap_err());
    reference.unwrap()
}

//-----------------------------------------------------------------------------

// Building graphs and calls by hand.

// Node identifiers are 1-based positions in `nodes`.
pub(crate) fn build_graph(nodes: &[&str], edges: &[((usize, Orientation), (usize, Orientation))]) -> HashGraph {
    let mut graph = HashGraph::new();
    for (i, sequence) in nodes.iter().enumerate() {
        let result = graph.add_node(i + 1, sequence.as_bytes());
        assert!(result.is_ok(), "Failed to add node {}: {}", i + 1, result.unwrap_err());
    }
    for (from, to) in edges.iter() {
        let result = graph.add_edge(*from, *to);
        assert!(result.is_ok(), "Failed to add edge {:?} -> {:?}: {}", from, to, result.unwrap_err());
    }
    graph
}

pub(crate) fn forward(node_id: usize) -> (usize, Orientation) {
    (node_id, Orientation::Forward)
}

pub(crate) fn reverse(node_id: usize) -> (usize, Orientation) {
    (node_id, Orientation::Reverse)
}

pub(crate) fn add_path(graph: &mut HashGraph, name: &str, steps: &[(usize, Orientation)]) {
    let steps: Vec<PathStep> = steps.iter().map(|(id, o)| PathStep::new(*id, *o)).collect();
    let result = graph.add_path(name, steps);
    assert!(result.is_ok(), "Failed to add path {}: {}", name, result.unwrap_err());
}

pub(crate) fn call(tokens: &[&str]) -> BaseCall {
    let result = BaseCall::new(tokens);
    assert!(result.is_ok(), "Failed to parse call tokens {:?}: {}", tokens, result.unwrap_err());
    result.unwrap()
}

// Calls every base of the node with the same tokens.
pub(crate) fn call_node(calls: &mut CallTable, node_id: usize, len: usize, tokens: &[&str]) {
    for offset in 0..len {
        calls.insert(node_id, offset, call(tokens));
    }
}

//-----------------------------------------------------------------------------
