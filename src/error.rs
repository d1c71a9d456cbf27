//! Error types.
//!
//! [`Error`] covers the conditions that abort a conversion.
//! [`SkipReason`] covers non-reference nodes that cannot be represented as a bubble; those are reported and skipped.

use std::io;

use thiserror::Error;

//-----------------------------------------------------------------------------

/// A fatal error that stops the conversion.
#[derive(Debug, Error)]
pub enum Error {
    /// The graph does not contain the requested reference path.
    #[error("Reference path {0} is not present in the graph")]
    MissingPath(String),

    /// A step on the reference path is not a perfect match to the node.
    #[error("Reference path {path} has an imperfect match to node {node_id} at step {step}")]
    ImperfectMapping { path: String, node_id: usize, step: usize },

    /// The graph refers to a node that does not exist.
    #[error("Node {0} is not present in the graph")]
    MissingNode(usize),

    /// A line in the call file cannot be parsed.
    #[error("Malformed call line {line}: {message}")]
    MalformedLine { line: usize, message: String },

    /// A base has more alternate calls than can be represented.
    #[error("Too many alternate bases in calls {0:?}")]
    TooManyAlts(Vec<String>),

    /// A call token is neither a placeholder nor a single base.
    #[error("Invalid call token {0:?}")]
    InvalidCallToken(String),

    /// A pure insertion cannot be anchored because it starts at the beginning of the reference.
    #[error("Cannot anchor the insertion from node {0} at reference position 0")]
    InsertionAtStart(usize),

    /// A base selected for a point variant has no alternate calls.
    #[error("Base {offset} of node {node_id} has no alternate calls")]
    NoAlts { node_id: usize, offset: usize },

    /// An I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A worker thread panicked.
    #[error("A worker thread panicked")]
    Worker,

    /// The graph could not be loaded or is invalid.
    #[error("{0}")]
    Graph(String),
}

/// Result type with a fatal [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

//-----------------------------------------------------------------------------

/// Why a non-reference node was not converted into a variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// There is no reference node on at least one side.
    #[error("not anchored to reference")]
    Unanchored,

    /// Reading through the node would reverse the direction of the reference.
    #[error("inverts reference path")]
    InvertsReference,

    /// Reading through the node would revisit an earlier part of the reference.
    #[error("allows duplication")]
    Duplication,

    /// Some but not all bases of the node are called present.
    #[error("is nonreference attached to reference, but only partially present")]
    PartlyPresent,
}

//-----------------------------------------------------------------------------
