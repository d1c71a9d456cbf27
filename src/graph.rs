//! Read-only access to a sequence graph with named paths.
//!
//! The conversion only needs a narrow view of the graph: node identifiers, node sequences, oriented adjacency, and the steps of a named path.
//! [`GraphAccessor`] captures that view.
//! It is implemented for [`GBZ`] graphs and for the in-memory [`HashGraph`], which is usually loaded from a GFA file with [`crate::gfa::read_gfa`].
//!
//! Oriented nodes follow the conventions of the [`gbwt`] crate.
//! A handle encodes a node identifier and an [`Orientation`], and the reverse orientation of a node corresponds to the reverse complement of its sequence.

use std::collections::{BTreeMap, HashMap};

use gbwt::{FullPathName, Orientation, GBZ, REF_SAMPLE};
use gbwt::support;


//-----------------------------------------------------------------------------

/// Returns the other orientation.
#[inline]
pub fn flip(orientation: Orientation) -> Orientation {
    match orientation {
        Orientation::Forward => Orientation::Reverse,
        Orientation::Reverse => Orientation::Forward,
    }
}

/// Returns the names a path with the given metadata can be looked up with.
///
/// A path is known as `sample#haplotype#contig` and as `sample#haplotype#contig#fragment`.
/// Generic paths (sample [`REF_SAMPLE`]) can also be found by the contig name alone.
pub fn path_lookup_names(sample: &str, haplotype: usize, contig: &str, fragment: usize) -> Vec<String> {
    let mut result = Vec::with_capacity(3);
    if sample == REF_SAMPLE {
        result.push(contig.to_string());
    }
    result.push(format!("{}#{}#{}", sample, haplotype, contig));
    result.push(format!("{}#{}#{}#{}", sample, haplotype, contig, fragment));
    result
}

//-----------------------------------------------------------------------------

/// An edit operation within a path step.
///
/// The edit replaces `from_length` bases of the node with `to_length` bases of `sequence`.
/// A match has equal lengths and an empty sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Edit {
    /// Number of node bases covered by the edit.
    pub from_length: usize,
    /// Number of path bases produced by the edit.
    pub to_length: usize,
    /// Replacement sequence, or empty for a match or a deletion.
    pub sequence: Vec<u8>,
}

impl Edit {
    /// Creates a match of the given length.
    pub fn matching(len: usize) -> Self {
        Edit { from_length: len, to_length: len, sequence: Vec::new() }
    }

    /// Creates an edit that removes the given number of node bases from the path.
    pub fn deletion(len: usize) -> Self {
        Edit { from_length: len, to_length: 0, sequence: Vec::new() }
    }

    /// Returns `true` if the edit is a match.
    #[inline]
    pub fn is_match(&self) -> bool {
        self.from_length == self.to_length && self.sequence.is_empty()
    }
}

/// A step on a path: an oriented node and the edits that turn the node sequence into the path sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathStep {
    /// Node identifier.
    pub node_id: usize,
    /// Orientation of the node on the path.
    pub orientation: Orientation,
    /// Edit operations; an empty list is a full-length match.
    pub edits: Vec<Edit>,
}

impl PathStep {
    /// Creates a step that matches the entire node.
    pub fn new(node_id: usize, orientation: Orientation) -> Self {
        PathStep { node_id, orientation, edits: Vec::new() }
    }

    /// Returns the handle of the oriented node.
    #[inline]
    pub fn handle(&self) -> usize {
        support::encode_node(self.node_id, self.orientation)
    }

    /// Returns `true` if the step is a perfect match to the node.
    pub fn is_perfect_match(&self) -> bool {
        self.edits.iter().all(|edit| edit.is_match())
    }
}

//-----------------------------------------------------------------------------

/// The graph operations needed for converting graph calls to variants.
pub trait GraphAccessor {
    /// Returns the identifiers of all nodes in ascending order.
    fn node_ids(&self) -> Vec<usize>;

    /// Returns the forward sequence of the node, or [`None`] if there is no such node.
    fn node_sequence(&self, node_id: usize) -> Option<&[u8]>;

    /// Returns the length of the node, or [`None`] if there is no such node.
    fn node_len(&self, node_id: usize) -> Option<usize> {
        self.node_sequence(node_id).map(|sequence| sequence.len())
    }

    /// Returns the steps of the path with the given name, or [`None`] if there is no such path.
    fn path_steps(&self, name: &str) -> Option<Vec<PathStep>>;

    /// Returns the oriented nodes with an edge to the given oriented node.
    fn predecessors(&self, node_id: usize, orientation: Orientation) -> Vec<(usize, Orientation)>;

    /// Returns the oriented nodes with an edge from the given oriented node.
    fn successors(&self, node_id: usize, orientation: Orientation) -> Vec<(usize, Orientation)>;
}

//-----------------------------------------------------------------------------

// GBZ paths are stored in the GBWT without edits, so every step is a perfect match.
impl GraphAccessor for GBZ {
    fn node_ids(&self) -> Vec<usize> {
        self.node_iter().collect()
    }

    fn node_sequence(&self, node_id: usize) -> Option<&[u8]> {
        self.sequence(node_id)
    }

    fn path_steps(&self, name: &str) -> Option<Vec<PathStep>> {
        let metadata = self.metadata()?;
        for path_id in 0..metadata.paths() {
            let path_name = FullPathName::from_metadata(metadata, path_id)?;
            let names = path_lookup_names(&path_name.sample, path_name.haplotype, &path_name.contig, path_name.fragment);
            if names.iter().any(|candidate| candidate == name) {
                let iter = self.path(path_id, Orientation::Forward)?;
                return Some(iter.map(|(node_id, orientation)| PathStep::new(node_id, orientation)).collect());
            }
        }
        None
    }

    fn predecessors(&self, node_id: usize, orientation: Orientation) -> Vec<(usize, Orientation)> {
        match GBZ::predecessors(self, node_id, orientation) {
            Some(iter) => iter.collect(),
            None => Vec::new(),
        }
    }

    fn successors(&self, node_id: usize, orientation: Orientation) -> Vec<(usize, Orientation)> {
        match GBZ::successors(self, node_id, orientation) {
            Some(iter) => iter.collect(),
            None => Vec::new(),
        }
    }
}

//-----------------------------------------------------------------------------

/// A bidirected sequence graph stored in hash tables.
///
/// Edges are stored in both directions: an edge from `(a, o1)` to `(b, o2)` is also an edge from `(b, !o2)` to `(a, !o1)`.
/// Paths are stored by name.
///
/// # Examples
///
/// ```
/// use calls2vcf::{GraphAccessor, HashGraph, PathStep};
/// use gbwt::Orientation;
///
/// let mut graph = HashGraph::new();
/// graph.add_node(1, b"GAT").unwrap();
/// graph.add_node(2, b"TACA").unwrap();
/// graph.add_edge((1, Orientation::Forward), (2, Orientation::Reverse)).unwrap();
/// graph.add_path("ref", vec![
///     PathStep::new(1, Orientation::Forward),
///     PathStep::new(2, Orientation::Reverse),
/// ]).unwrap();
///
/// assert_eq!(graph.nodes(), 2);
/// assert_eq!(graph.successors(1, Orientation::Forward), vec![(2, Orientation::Reverse)]);
/// assert_eq!(graph.predecessors(1, Orientation::Reverse), vec![(2, Orientation::Forward)]);
/// assert_eq!(graph.path_steps("ref").map(|steps| steps.len()), Some(2));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HashGraph {
    sequences: BTreeMap<usize, Vec<u8>>,
    // Successor handles for each handle.
    edges: HashMap<usize, Vec<usize>>,
    paths: BTreeMap<String, Vec<PathStep>>,
    // Alternative names for paths.
    aliases: BTreeMap<String, String>,
}

impl HashGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        HashGraph::default()
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn nodes(&self) -> usize {
        self.sequences.len()
    }

    /// Returns the number of paths.
    #[inline]
    pub fn paths(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if the graph contains the node.
    #[inline]
    pub fn has_node(&self, node_id: usize) -> bool {
        self.sequences.contains_key(&node_id)
    }

    /// Returns an iterator over path names in lexicographic order.
    ///
    /// Aliases are not included.
    pub fn path_names(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(|name| name.as_str())
    }

    /// Adds a node with the given sequence.
    ///
    /// Returns an error if the node already exists.
    pub fn add_node(&mut self, node_id: usize, sequence: &[u8]) -> Result<(), String> {
        if self.has_node(node_id) {
            return Err(format!("Duplicate node {}", node_id));
        }
        self.sequences.insert(node_id, sequence.to_vec());
        Ok(())
    }

    /// Adds an edge between two oriented nodes.
    ///
    /// Adding an existing edge has no effect.
    /// Returns an error if either node does not exist.
    pub fn add_edge(&mut self, from: (usize, Orientation), to: (usize, Orientation)) -> Result<(), String> {
        for node_id in [from.0, to.0] {
            if !self.has_node(node_id) {
                return Err(format!("Edge refers to a missing node {}", node_id));
            }
        }
        self.insert_successor(support::encode_node(from.0, from.1), support::encode_node(to.0, to.1));
        self.insert_successor(support::encode_node(to.0, flip(to.1)), support::encode_node(from.0, flip(from.1)));
        Ok(())
    }

    fn insert_successor(&mut self, from: usize, to: usize) {
        let successors = self.edges.entry(from).or_default();
        if !successors.contains(&to) {
            successors.push(to);
        }
    }

    /// Adds a named path.
    ///
    /// Returns an error if a path with the same name exists or if the path visits a missing node.
    pub fn add_path(&mut self, name: &str, steps: Vec<PathStep>) -> Result<(), String> {
        if self.has_path(name) {
            return Err(format!("Duplicate path {}", name));
        }
        if let Some(step) = steps.iter().find(|step| !self.has_node(step.node_id)) {
            return Err(format!("Path {} visits a missing node {}", name, step.node_id));
        }
        self.paths.insert(name.to_string(), steps);
        Ok(())
    }

    /// Makes the path available under another name.
    ///
    /// Returns an error if the path does not exist or if the alias is already in use.
    pub fn add_alias(&mut self, alias: &str, name: &str) -> Result<(), String> {
        if !self.paths.contains_key(name) {
            return Err(format!("Alias {} refers to a missing path {}", alias, name));
        }
        if self.has_path(alias) {
            return Err(format!("Duplicate path {}", alias));
        }
        self.aliases.insert(alias.to_string(), name.to_string());
        Ok(())
    }

    /// Returns `true` if a path or an alias with the given name exists.
    pub fn has_path(&self, name: &str) -> bool {
        self.paths.contains_key(name) || self.aliases.contains_key(name)
    }
}

impl GraphAccessor for HashGraph {
    fn node_ids(&self) -> Vec<usize> {
        self.sequences.keys().cloned().collect()
    }

    fn node_sequence(&self, node_id: usize) -> Option<&[u8]> {
        self.sequences.get(&node_id).map(|sequence| sequence.as_slice())
    }

    fn path_steps(&self, name: &str) -> Option<Vec<PathStep>> {
        let name = self.aliases.get(name).map(|target| target.as_str()).unwrap_or(name);
        self.paths.get(name).cloned()
    }

    fn predecessors(&self, node_id: usize, orientation: Orientation) -> Vec<(usize, Orientation)> {
        self.successors(node_id, flip(orientation)).into_iter().map(|(id, o)| (id, flip(o))).collect()
    }

    fn successors(&self, node_id: usize, orientation: Orientation) -> Vec<(usize, Orientation)> {
        match self.edges.get(&support::encode_node(node_id, orientation)) {
            Some(successors) => successors.iter().map(|handle| support::decode_node(*handle)).collect(),
            None => Vec::new(),
        }
    }
}

//-----------------------------------------------------------------------------
