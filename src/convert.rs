//! Converting graph calls to VCF.
//!
//! The conversion traces the reference path, calls structural variants on non-reference nodes and point variants on reference nodes, and writes the variants as VCF.
//! Per-node work only reads the graph, the [`ReferenceIndex`], and the [`CallTable`], so the nodes are split into contiguous ranges processed by scoped worker threads.
//! The results are concatenated in node order, so the output does not depend on the number of threads:
//! structural variants come first, followed by point variants, each in ascending order of node identifiers.

use crate::{CallTable, Error, GraphAccessor, NodeCall, ReferenceIndex, Result, Variant};
use crate::{bubble, snp, vcf};

use std::io::Write;
use std::thread;


//-----------------------------------------------------------------------------

/// Parameters for the conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionParameters {
    /// Name of the reference path.
    pub reference_path: String,
    /// Sample name in the VCF header.
    pub sample_name: String,
    /// Number of worker threads.
    pub threads: usize,
}

impl ConversionParameters {
    /// Default name of the reference path.
    pub const DEFAULT_REFERENCE_PATH: &'static str = "ref";

    /// Default sample name.
    pub const DEFAULT_SAMPLE_NAME: &'static str = "SAMPLE";

    /// Default number of worker threads.
    pub const DEFAULT_THREADS: usize = 1;
}

impl Default for ConversionParameters {
    fn default() -> Self {
        ConversionParameters {
            reference_path: String::from(Self::DEFAULT_REFERENCE_PATH),
            sample_name: String::from(Self::DEFAULT_SAMPLE_NAME),
            threads: Self::DEFAULT_THREADS,
        }
    }
}

/// Statistics from calling variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConversionStats {
    /// Number of reference nodes.
    pub reference_nodes: usize,
    /// Number of structural variants.
    pub bubble_variants: usize,
    /// Number of point variants.
    pub snp_variants: usize,
    /// Number of non-reference nodes that are not present in the sample.
    pub unused_nodes: usize,
    /// Number of non-reference nodes that could not be represented as variants.
    pub skipped_nodes: usize,
}

//-----------------------------------------------------------------------------

// Applies the function to all items using the given number of threads and returns the results in the original order.
// The first error in item order is returned.
fn parallel_map<R, F>(items: &[usize], threads: usize, f: F) -> Result<Vec<R>>
where
    R: Send,
    F: Fn(usize) -> Result<R> + Sync,
{
    if items.is_empty() {
        return Ok(Vec::new());
    }
    let threads = threads.clamp(1, items.len());
    if threads == 1 {
        return items.iter().map(|item| f(*item)).collect();
    }

    let chunk_size = items.len().div_ceil(threads);
    let f = &f;
    thread::scope(|scope| -> Result<Vec<R>> {
        let workers: Vec<_> = items.chunks(chunk_size).map(|chunk| {
            scope.spawn(move || chunk.iter().map(|item| f(*item)).collect::<Result<Vec<R>>>())
        }).collect();

        let mut result = Vec::with_capacity(items.len());
        for worker in workers {
            let chunk_result = worker.join().map_err(|_| Error::Worker)??;
            result.extend(chunk_result);
        }
        Ok(result)
    })
}

/// Calls structural and point variants using the given number of worker threads.
///
/// Returns the variants in the order described in the module documentation.
pub fn call_variants<G: GraphAccessor + Sync + ?Sized>(
    graph: &G, reference: &ReferenceIndex, calls: &CallTable, threads: usize
) -> Result<(Vec<Variant>, ConversionStats)> {
    let (reference_nodes, other_nodes): (Vec<usize>, Vec<usize>) = graph.node_ids().into_iter().partition(|node_id| {
        reference.contains(*node_id)
    });
    let mut stats = ConversionStats { reference_nodes: reference_nodes.len(), ..ConversionStats::default() };

    let node_calls = parallel_map(&other_nodes, threads, |node_id| {
        bubble::call_bubble(graph, reference, calls, node_id)
    })?;
    let mut variants = Vec::new();
    for node_call in node_calls {
        match node_call {
            NodeCall::Variant(variant) => {
                stats.bubble_variants += 1;
                variants.push(variant);
            },
            NodeCall::Unused => stats.unused_nodes += 1,
            NodeCall::Skipped(_) => stats.skipped_nodes += 1,
        }
    }

    let snps = parallel_map(&reference_nodes, threads, |node_id| {
        snp::call_snps(graph, reference, calls, node_id)
    })?;
    for node_snps in snps {
        stats.snp_variants += node_snps.len();
        variants.extend(node_snps);
    }

    Ok((variants, stats))
}

/// Converts calls on the graph to VCF.
///
/// Traces the reference path named in the parameters, calls the variants, and writes them to the output.
pub fn convert<G: GraphAccessor + Sync + ?Sized, T: Write>(
    graph: &G, calls: &CallTable, parameters: &ConversionParameters, output: &mut T
) -> Result<ConversionStats> {
    let reference = ReferenceIndex::new(graph, &parameters.reference_path)?;
    let (variants, stats) = call_variants(graph, &reference, calls, parameters.threads)?;
    vcf::write_vcf(&variants, reference.path_name(), &parameters.sample_name, output)?;

    tracing::info!(
        "Wrote {} structural variants and {} point variants; skipped {} nodes and found {} unused nodes",
        stats.bubble_variants, stats.snp_variants, stats.skipped_nodes, stats.unused_nodes
    );
    Ok(stats)
}

//-----------------------------------------------------------------------------
