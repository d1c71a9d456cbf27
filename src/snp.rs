//! Point variants on reference nodes.
//!
//! Every base of a reference node with alternate calls becomes a point variant at the corresponding reference position.
//! For nodes traversed in reverse orientation on the reference path, offsets count from the end of the reference interval and the alternate bases are complemented.

use crate::{BaseCall, CallTable, Error, GraphAccessor, ReferenceIndex, Result};
use crate::{Genotype, Variant, VariantKind};

use gbwt::support;

#[cfg(test)]
mod tests;

//-----------------------------------------------------------------------------

/// Returns the genotype for a base with alternate calls.
///
/// Returns [`Error::NoAlts`] if the call has no alternate bases.
pub fn snp_genotype(call: &BaseCall, node_id: usize, offset: usize) -> Result<Genotype> {
    if !call.has_alts() {
        return Err(Error::NoAlts { node_id, offset });
    }
    if call.graph_base_present() {
        return Ok(Genotype::AltRef);
    }
    match call.alts().len() {
        1 => Ok(Genotype::AltAlt),
        _ => Ok(Genotype::AltOther),
    }
}

/// Calls point variants on the given reference node.
///
/// Returns an empty vector if the node is not on the reference path.
/// Calls past the end of the node are ignored with a warning.
///
/// # Examples
///
/// ```
/// use calls2vcf::{snp, BaseCall, CallTable, Genotype, HashGraph, PathStep, ReferenceIndex};
/// use gbwt::Orientation;
///
/// let mut graph = HashGraph::new();
/// graph.add_node(1, b"GATTACA").unwrap();
/// graph.add_path("ref", vec![PathStep::new(1, Orientation::Forward)]).unwrap();
/// let reference = ReferenceIndex::new(&graph, "ref").unwrap();
///
/// let mut calls = CallTable::new();
/// calls.insert(1, 4, BaseCall::new(&["C", "G"]).unwrap());
///
/// let variants = snp::call_snps(&graph, &reference, &calls, 1).unwrap();
/// assert_eq!(variants.len(), 1);
/// assert_eq!(variants[0].position, 5);
/// assert_eq!(variants[0].reference, b"A");
/// assert_eq!(variants[0].alternates, vec![b"C".to_vec(), b"G".to_vec()]);
/// assert_eq!(variants[0].genotype, Genotype::AltOther);
/// ```
pub fn call_snps<G: GraphAccessor + ?Sized>(
    graph: &G, reference: &ReferenceIndex, calls: &CallTable, node_id: usize
) -> Result<Vec<Variant>> {
    let mut result = Vec::new();
    let placement = match reference.placement(node_id) {
        Some(placement) => placement,
        None => return Ok(result),
    };
    let node_len = graph.node_len(node_id).ok_or(Error::MissingNode(node_id))?;

    for (offset, call) in calls.node_calls(node_id).iter().enumerate() {
        if !call.has_alts() {
            continue;
        }
        if offset >= node_len {
            tracing::warn!("Node {} has calls at offset {} past the end of the {} bp node", node_id, offset, node_len);
            continue;
        }

        let coordinate = if placement.is_reverse() {
            placement.coordinate + (node_len - offset - 1)
        } else {
            placement.coordinate + offset
        };
        let ref_allele = vec![reference.sequence()[coordinate]];
        let alt_alleles: Vec<Vec<u8>> = call.alts().iter().map(|base| {
            if placement.is_reverse() {
                support::reverse_complement(&[*base])
            } else {
                vec![*base]
            }
        }).collect();
        let genotype = snp_genotype(call, node_id, offset)?;

        let variant = Variant::new(VariantKind::Snp, node_id, coordinate + 1, ref_allele, alt_alleles, genotype);
        tracing::debug!(
            "Found variant {} on node {} at 1-based reference position {}",
            variant.allele_summary(), node_id, variant.position
        );
        result.push(variant);
    }

    Ok(result)
}

//-----------------------------------------------------------------------------
