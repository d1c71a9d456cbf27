//! Structural variants from non-reference nodes.
//!
//! A non-reference node is converted into a variant if it forms a bubble with the reference path.
//! The node must have a reference node among its predecessors and among its successors, and reading through the node must continue along the reference in the same direction.
//! Among the candidates on each side, the anchor is the reference node with the smallest coordinate.
//!
//! The variant replaces the reference interval between the anchors with the sequence of the node.
//! The node is called if all of its bases are present in the sample.
//! The genotype is heterozygous if any base in the replaced reference interval is observed in the sample, and homozygous otherwise.

use crate::{CallTable, Error, GraphAccessor, ReferenceIndex, Result};
use crate::{Genotype, Variant, VariantKind};
use crate::error::SkipReason;
use crate::graph;
use crate::reference::Placement;

use std::ops::Range;

use gbwt::Orientation;
use gbwt::support;


//-----------------------------------------------------------------------------

/// The outcome of trying to call a variant from a non-reference node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeCall {
    /// The node was called as a variant.
    Variant(Variant),
    /// The node is not present in the sample or it is on the reference path.
    Unused,
    /// The node cannot be represented as a variant.
    Skipped(SkipReason),
}

//-----------------------------------------------------------------------------

// An oriented neighbor of the node on the reference path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Anchor {
    node_id: usize,
    orientation: Orientation,
    placement: Placement,
}

impl Anchor {
    // Returns `true` if the neighbor is traversed in the same orientation as on the reference path.
    fn reads_forward(&self) -> bool {
        self.orientation == self.placement.orientation
    }
}

// Returns the candidate with the smallest reference coordinate.
// The first candidate wins ties.
fn leftmost_anchor(reference: &ReferenceIndex, candidates: &[(usize, Orientation)]) -> Option<Anchor> {
    let mut result: Option<Anchor> = None;
    for (node_id, orientation) in candidates.iter() {
        if let Some(placement) = reference.placement(*node_id) {
            if result.map_or(true, |best| placement.coordinate < best.placement.coordinate) {
                result = Some(Anchor { node_id: *node_id, orientation: *orientation, placement });
            }
        }
    }
    result
}

fn skip(node_id: usize, reason: SkipReason) -> Result<NodeCall> {
    tracing::warn!("Node {} {}", node_id, reason);
    Ok(NodeCall::Skipped(reason))
}

//-----------------------------------------------------------------------------

/// Tries to call a structural variant from the given non-reference node.
///
/// Recoverable problems are returned as [`NodeCall::Skipped`] and logged as warnings.
/// Returns an error if the graph is inconsistent with the reference index or if a pure insertion would have to be anchored before the start of the reference.
///
/// # Examples
///
/// ```
/// use calls2vcf::{bubble, BaseCall, CallTable, Genotype, HashGraph, NodeCall, PathStep, ReferenceIndex};
/// use gbwt::Orientation;
///
/// // Reference GAT + C + TACA with an alternative G for the middle node.
/// let mut graph = HashGraph::new();
/// for (node_id, sequence) in [(1, "GAT"), (2, "C"), (3, "G"), (4, "TACA")] {
///     graph.add_node(node_id, sequence.as_bytes()).unwrap();
/// }
/// for (from, to) in [(1, 2), (2, 4), (1, 3), (3, 4)] {
///     graph.add_edge((from, Orientation::Forward), (to, Orientation::Forward)).unwrap();
/// }
/// graph.add_path("ref", vec![
///     PathStep::new(1, Orientation::Forward),
///     PathStep::new(2, Orientation::Forward),
///     PathStep::new(4, Orientation::Forward),
/// ]).unwrap();
/// let reference = ReferenceIndex::new(&graph, "ref").unwrap();
///
/// let mut calls = CallTable::new();
/// calls.insert(3, 0, BaseCall::new(&["."]).unwrap());
///
/// let result = bubble::call_bubble(&graph, &reference, &calls, 3).unwrap();
/// if let NodeCall::Variant(variant) = result {
///     assert_eq!(variant.position, 4);
///     assert_eq!(variant.reference, b"C");
///     assert_eq!(variant.alternates, vec![b"G".to_vec()]);
///     assert_eq!(variant.genotype, Genotype::AltAlt);
/// } else {
///     panic!("Expected a variant");
/// }
/// ```
pub fn call_bubble<G: GraphAccessor + ?Sized>(
    graph: &G, reference: &ReferenceIndex, calls: &CallTable, node_id: usize
) -> Result<NodeCall> {
    if reference.contains(node_id) {
        return Ok(NodeCall::Unused);
    }
    let node_len = graph.node_len(node_id).ok_or(Error::MissingNode(node_id))?;

    // Find the anchors on both sides of the node in its forward orientation.
    let in_anchor = leftmost_anchor(reference, &graph.predecessors(node_id, Orientation::Forward));
    let out_anchor = leftmost_anchor(reference, &graph.successors(node_id, Orientation::Forward));
    let (mut in_anchor, mut out_anchor) = match (in_anchor, out_anchor) {
        (Some(in_anchor), Some(out_anchor)) => (in_anchor, out_anchor),
        _ => return skip(node_id, SkipReason::Unanchored),
    };

    // We must continue along the reference in the same direction.
    let read_in_forward = in_anchor.reads_forward();
    if read_in_forward != out_anchor.reads_forward() {
        return skip(node_id, SkipReason::InvertsReference);
    }
    let mut orientation = Orientation::Forward;
    if !read_in_forward {
        orientation = graph::flip(orientation);
        std::mem::swap(&mut in_anchor, &mut out_anchor);
    }
    if out_anchor.placement.coordinate <= in_anchor.placement.coordinate {
        return skip(node_id, SkipReason::Duplication);
    }

    // Placements are first bases along the reference, so anchor orientations do not matter here.
    // Steps are contiguous, so a later step cannot start inside the in anchor.
    let in_len = graph.node_len(in_anchor.node_id).ok_or(Error::MissingNode(in_anchor.node_id))?;
    let interval = in_anchor.placement.coordinate + in_len..out_anchor.placement.coordinate;
    if interval.end < interval.start {
        return Err(Error::Graph(format!(
            "Reference node {} at {} overlaps reference node {} at {}",
            in_anchor.node_id, in_anchor.placement.coordinate, out_anchor.node_id, out_anchor.placement.coordinate
        )));
    }

    // Presence of the node in the sample.
    let mut fully_present = true;
    let mut partly_present = false;
    let mut max_alts = 0;
    for offset in 0..node_len {
        let (present, alts) = match calls.get(node_id, offset) {
            Some(call) => (call.graph_base_present(), call.alts().len()),
            None => (false, 0),
        };
        fully_present &= present;
        partly_present |= present;
        max_alts = max_alts.max(alts);
    }
    if !partly_present {
        return Ok(NodeCall::Unused);
    }
    if !fully_present {
        return skip(node_id, SkipReason::PartlyPresent);
    }
    if max_alts > 0 {
        // TODO: Call one unmodified copy and one copy with the novel alts instead of reporting the node as homozygous.
        tracing::warn!("Node {} is nonreference attached to reference, and present, but has additional novel alts", node_id);
    }

    let genotype = if reference_observed(graph, reference, calls, interval.clone())? {
        Genotype::AltRef
    } else {
        Genotype::AltAlt
    };

    // Alleles.
    let mut start = interval.start;
    let mut ref_allele = reference.sequence()[interval].to_vec();
    let node_sequence = graph.node_sequence(node_id).ok_or(Error::MissingNode(node_id))?;
    let mut alt_allele = match orientation {
        Orientation::Forward => node_sequence.to_vec(),
        Orientation::Reverse => support::reverse_complement(node_sequence),
    };
    if ref_allele.is_empty() {
        // VCF needs an anchoring base before an insertion.
        if start == 0 {
            return Err(Error::InsertionAtStart(node_id));
        }
        start -= 1;
        let base = reference.sequence()[start];
        ref_allele.insert(0, base);
        alt_allele.insert(0, base);
    }

    let variant = Variant::new(VariantKind::Bubble, node_id, start + 1, ref_allele, vec![alt_allele], genotype);
    tracing::debug!(
        "Found variant {} caused by node {} at 1-based reference position {}",
        variant.allele_summary(), node_id, variant.position
    );
    Ok(NodeCall::Variant(variant))
}

// Returns `true` if any base of the reference nodes covering the interval is present or has alternate calls.
fn reference_observed<G: GraphAccessor + ?Sized>(
    graph: &G, reference: &ReferenceIndex, calls: &CallTable, interval: Range<usize>
) -> Result<bool> {
    let mut position = interval.start;
    while position < interval.end {
        let (start, handle) = reference.node_at(position).ok_or_else(|| {
            Error::Graph(format!("No reference node at position {}", position))
        })?;
        let node_id = support::node_id(handle);
        let node_len = graph.node_len(node_id).ok_or(Error::MissingNode(node_id))?;
        if calls.node_calls(node_id).iter().take(node_len).any(|call| call.is_observed()) {
            return Ok(true);
        }
        position = (start + node_len).max(position + 1);
    }
    Ok(false)
}

//-----------------------------------------------------------------------------
