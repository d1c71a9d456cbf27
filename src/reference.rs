//! Reference coordinates for graph nodes.
//!
//! [`ReferenceIndex`] is built by tracing the reference path once.
//! Every node on the path gets a canonical placement: the reference coordinate of its first base along the path and its orientation on the path.
//! If the path visits a node more than once, the first visit determines the placement.
//!
//! The index also stores the reference sequence spelled by the path and a coordinate index that finds the node occupying a reference position.

use crate::{Error, GraphAccessor, Result};

use std::collections::HashMap;

use gbwt::Orientation;
use gbwt::support;

use simple_sds::ops::PredSucc;
use simple_sds::sparse_vector::{SparseBuilder, SparseVector};

#[cfg(test)]
mod tests;

//-----------------------------------------------------------------------------

/// Placement of a node on the reference path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Reference coordinate (0-based) of the first base of the node along the path.
    pub coordinate: usize,
    /// Orientation of the node on the path.
    pub orientation: Orientation,
}

impl Placement {
    /// Returns `true` if the reference path traverses the node in reverse orientation.
    #[inline]
    pub fn is_reverse(&self) -> bool {
        self.orientation == Orientation::Reverse
    }
}

//-----------------------------------------------------------------------------

/// Placements, coordinate index, and sequence for a reference path.
///
/// # Examples
///
/// ```
/// use calls2vcf::{HashGraph, PathStep, ReferenceIndex};
/// use gbwt::Orientation;
///
/// let mut graph = HashGraph::new();
/// graph.add_node(1, b"GAT").unwrap();
/// graph.add_node(2, b"TAC").unwrap();
/// graph.add_edge((1, Orientation::Forward), (2, Orientation::Reverse)).unwrap();
/// graph.add_path("ref", vec![
///     PathStep::new(1, Orientation::Forward),
///     PathStep::new(2, Orientation::Reverse),
/// ]).unwrap();
///
/// let reference = ReferenceIndex::new(&graph, "ref").unwrap();
/// assert_eq!(reference.len(), 6);
/// assert_eq!(reference.sequence(), b"GATGTA");
/// assert_eq!(reference.placement(2).map(|p| p.coordinate), Some(3));
/// assert!(reference.placement(2).unwrap().is_reverse());
/// assert_eq!(reference.node_at(4).map(|(start, _)| start), Some(3));
/// ```
#[derive(Clone, Debug)]
pub struct ReferenceIndex {
    path_name: String,

    // First placement of each node on the path.
    placements: HashMap<usize, Placement>,

    // Start coordinates of the steps on the path.
    starts: SparseVector,

    // Handles of the oriented nodes at the coordinates in `starts`.
    handles: Vec<usize>,

    // Reference sequence spelled by the path.
    sequence: Vec<u8>,
}

impl ReferenceIndex {
    /// Traces the reference path with the given name.
    ///
    /// Returns [`Error::MissingPath`] if the path does not exist.
    /// Returns [`Error::ImperfectMapping`] if a step on the path is not a perfect match to the node.
    pub fn new<G: GraphAccessor + ?Sized>(graph: &G, path_name: &str) -> Result<Self> {
        let steps = graph.path_steps(path_name).ok_or(Error::MissingPath(path_name.to_string()))?;

        let mut placements: HashMap<usize, Placement> = HashMap::new();
        let mut entries: Vec<(usize, usize)> = Vec::with_capacity(steps.len());
        let mut sequence: Vec<u8> = Vec::new();
        let mut coordinate = 0;
        for (step_num, step) in steps.iter().enumerate() {
            if !step.is_perfect_match() {
                return Err(Error::ImperfectMapping {
                    path: path_name.to_string(),
                    node_id: step.node_id,
                    step: step_num,
                });
            }
            let node_sequence = graph.node_sequence(step.node_id).ok_or(Error::MissingNode(step.node_id))?;

            placements.entry(step.node_id).or_insert(Placement { coordinate, orientation: step.orientation });

            if step.orientation == Orientation::Forward {
                sequence.extend_from_slice(node_sequence);
            } else {
                sequence.extend(support::reverse_complement(node_sequence));
            }

            // An empty node shares the coordinate with the next step, which replaces it.
            match entries.last_mut() {
                Some(last) if last.0 == coordinate => last.1 = step.handle(),
                _ => entries.push((coordinate, step.handle())),
            }

            coordinate += node_sequence.len();
        }

        let mut builder = SparseBuilder::new(coordinate + 1, entries.len()).map_err(|x| Error::Graph(x.to_string()))?;
        let mut handles = Vec::with_capacity(entries.len());
        for (start, handle) in entries {
            builder.set(start);
            handles.push(handle);
        }
        let starts = SparseVector::try_from(builder).map_err(|x| Error::Graph(x.to_string()))?;

        tracing::info!("Traced {} bp reference path {}", sequence.len(), path_name);
        if sequence.len() < 100 {
            tracing::debug!("Reference sequence: {}", String::from_utf8_lossy(&sequence));
        }

        Ok(ReferenceIndex {
            path_name: path_name.to_string(),
            placements, starts, handles, sequence,
        })
    }

    /// Returns the name of the reference path.
    #[inline]
    pub fn path_name(&self) -> &str {
        &self.path_name
    }

    /// Returns the length of the reference sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns `true` if the reference sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Returns the number of distinct nodes on the reference path.
    #[inline]
    pub fn nodes(&self) -> usize {
        self.placements.len()
    }

    /// Returns the reference sequence.
    #[inline]
    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    /// Returns the placement of the node, or [`None`] if the node is not on the reference path.
    #[inline]
    pub fn placement(&self, node_id: usize) -> Option<Placement> {
        self.placements.get(&node_id).cloned()
    }

    /// Returns `true` if the node is on the reference path.
    #[inline]
    pub fn contains(&self, node_id: usize) -> bool {
        self.placements.contains_key(&node_id)
    }

    /// Returns the step with the greatest start coordinate at or before the given coordinate.
    ///
    /// The return value is the start coordinate and the handle of the oriented node.
    /// Returns [`None`] if there are no steps at or before the coordinate.
    pub fn node_at(&self, coordinate: usize) -> Option<(usize, usize)> {
        let mut iter = self.starts.predecessor(coordinate);
        iter.next().map(|(rank, start)| (start, self.handles[rank]))
    }

    /// Returns the number of entries in the coordinate index.
    #[inline]
    pub fn steps(&self) -> usize {
        self.handles.len()
    }
}

//-----------------------------------------------------------------------------
