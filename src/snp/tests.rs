use super::*;

use crate::HashGraph;
use crate::internal::{self, forward, reverse};

//-----------------------------------------------------------------------------

fn single_node(orientation: gbwt::Orientation) -> (HashGraph, ReferenceIndex) {
    let mut graph = internal::build_graph(&["GATC", "TACA"], &[]);
    let steps = match orientation {
        gbwt::Orientation::Forward => vec![forward(1), forward(2)],
        gbwt::Orientation::Reverse => vec![forward(1), reverse(2)],
    };
    internal::add_path(&mut graph, "ref", &steps);
    let reference = internal::trace_reference(&graph, "ref");
    (graph, reference)
}

fn snps(graph: &HashGraph, reference: &ReferenceIndex, calls: &CallTable, node_id: usize) -> Vec<Variant> {
    let result = call_snps(graph, reference, calls, node_id);
    assert!(result.is_ok(), "Failed to call SNPs on node {}: {}", node_id, result.as_ref().unwrap_err());
    let result = result.unwrap();
    for variant in result.iter() {
        assert_eq!(variant.kind, VariantKind::Snp, "Wrong variant kind");
        assert_eq!(variant.node_id, node_id, "Wrong node id in the variant");
        assert_eq!(variant.reference.len(), 1, "The reference allele should be a single base");
    }
    result
}

//-----------------------------------------------------------------------------

#[test]
fn genotypes() {
    let truth = [
        (vec![".", "T"], Genotype::AltRef),
        (vec!["-", "T"], Genotype::AltAlt),
        (vec!["T"], Genotype::AltAlt),
        (vec!["T", "G"], Genotype::AltOther),
        (vec![".", "T", "G"], Genotype::AltRef),
    ];
    for (tokens, genotype) in truth.iter() {
        let call = internal::call(tokens);
        let result = snp_genotype(&call, 1, 0);
        assert_eq!(result.ok(), Some(*genotype), "Wrong genotype for tokens {:?}", tokens);
    }

    let result = snp_genotype(&internal::call(&["."]), 3, 7);
    assert!(matches!(result, Err(Error::NoAlts { node_id: 3, offset: 7 })), "Expected an error without alts");
}

#[test]
fn example_snps() {
    let graph = internal::load_example_graph();
    let reference = internal::trace_reference(&graph, "ref");
    let calls = internal::load_example_calls();

    let variants = snps(&graph, &reference, &calls, 4);
    assert_eq!(variants.len(), 1, "Wrong number of SNPs on node 4");
    assert_eq!(variants[0].position, 9, "Wrong position on node 4");
    assert_eq!(variants[0].reference, b"A", "Wrong reference allele on node 4");
    assert_eq!(variants[0].alternates, vec![b"T".to_vec()], "Wrong alternate alleles on node 4");
    assert_eq!(variants[0].genotype, Genotype::AltRef, "Wrong genotype on node 4");

    let variants = snps(&graph, &reference, &calls, 6);
    assert_eq!(variants.len(), 1, "Wrong number of SNPs on node 6");
    assert_eq!(variants[0].position, 13, "Wrong position on node 6");
    assert_eq!(variants[0].reference, b"A", "Wrong reference allele on node 6");
    assert_eq!(variants[0].alternates, vec![b"G".to_vec(), b"T".to_vec()], "Alternate alleles should be in lexicographic order");
    assert_eq!(variants[0].genotype, Genotype::AltOther, "Wrong genotype on node 6");

    for node_id in [1, 2] {
        assert!(snps(&graph, &reference, &calls, node_id).is_empty(), "Node {} should not have SNPs", node_id);
    }
}

#[test]
fn non_reference_nodes() {
    let graph = internal::load_example_graph();
    let reference = internal::trace_reference(&graph, "ref");
    let mut calls = CallTable::new();
    calls.insert(3, 0, internal::call(&["A"]));
    assert!(snps(&graph, &reference, &calls, 3).is_empty(), "A non-reference node should not have SNPs");
}

#[test]
fn forward_node() {
    let (graph, reference) = single_node(gbwt::Orientation::Forward);
    let mut calls = CallTable::new();
    calls.insert(1, 3, internal::call(&[".", "T"]));
    calls.insert(2, 0, internal::call(&["G"]));
    calls.insert(2, 2, internal::call(&["."]));

    let variants = snps(&graph, &reference, &calls, 1);
    assert_eq!(variants.len(), 1, "Wrong number of SNPs on node 1");
    assert_eq!(variants[0].position, 4, "Wrong position on node 1");
    assert_eq!(variants[0].reference, b"C", "Wrong reference allele on node 1");
    assert_eq!(variants[0].genotype, Genotype::AltRef, "Wrong genotype on node 1");

    let variants = snps(&graph, &reference, &calls, 2);
    assert_eq!(variants.len(), 1, "Only bases with alts should produce SNPs");
    assert_eq!(variants[0].position, 5, "Wrong position on node 2");
    assert_eq!(variants[0].reference, b"T", "Wrong reference allele on node 2");
    assert_eq!(variants[0].alternates, vec![b"G".to_vec()], "Wrong alternate allele on node 2");
    assert_eq!(variants[0].genotype, Genotype::AltAlt, "Wrong genotype on node 2");
}

#[test]
fn reverse_node() {
    // Reference GATC + TGTA; node 2 is TACA in reverse.
    let (graph, reference) = single_node(gbwt::Orientation::Reverse);
    assert_eq!(reference.sequence(), b"GATCTGTA", "Wrong reference sequence");

    let mut calls = CallTable::new();
    calls.insert(2, 0, internal::call(&["G"]));
    calls.insert(2, 2, internal::call(&["-", "T", "A"]));

    let variants = snps(&graph, &reference, &calls, 2);
    assert_eq!(variants.len(), 2, "Wrong number of SNPs on the reverse node");

    // Offset 0 is the last base of the node on the reference.
    assert_eq!(variants[0].position, 8, "Wrong position for offset 0");
    assert_eq!(variants[0].reference, b"A", "Wrong reference allele for offset 0");
    assert_eq!(variants[0].alternates, vec![b"C".to_vec()], "Alternate allele should be complemented");
    assert_eq!(variants[0].genotype, Genotype::AltAlt, "Wrong genotype for offset 0");

    assert_eq!(variants[1].position, 6, "Wrong position for offset 2");
    assert_eq!(variants[1].reference, b"G", "Wrong reference allele for offset 2");
    assert_eq!(variants[1].alternates, vec![b"T".to_vec(), b"A".to_vec()], "Alternate alleles should be complemented in lexicographic order of the calls");
    assert_eq!(variants[1].genotype, Genotype::AltOther, "Wrong genotype for offset 2");
}

#[test]
fn calls_past_node_end() {
    let (graph, reference) = single_node(gbwt::Orientation::Forward);
    let mut calls = CallTable::new();
    calls.insert(1, 1, internal::call(&["T"]));
    calls.insert(1, 10, internal::call(&["T"]));
    let variants = snps(&graph, &reference, &calls, 1);
    assert_eq!(variants.len(), 1, "Calls past the end of the node should be ignored");
    assert_eq!(variants[0].position, 2, "Wrong position");
}

//-----------------------------------------------------------------------------
