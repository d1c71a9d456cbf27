//! # calls2vcf: converting base-level graph calls to VCF.
//!
//! A variant caller that works on a pangenome graph can report, for every base of every node, whether the base is present in the sample and which alternate bases were observed.
//! This crate turns such calls into a VCF file relative to a reference path in the graph.
//!
//! The graph can be a GBZ graph from the [`gbwt`] crate or a GFA file loaded into a [`HashGraph`].
//! Both are accessed through [`GraphAccessor`].
//!
//! # Conversion
//!
//! The reference path is traced into a [`ReferenceIndex`], which stores the reference sequence, the first placement of every reference node, and an index from reference coordinates to the nodes covering them.
//! The calls are loaded into a [`CallTable`], with one [`BaseCall`] per node offset.
//!
//! Two kinds of variants are then called:
//!
//! * Non-reference nodes that form a bubble with the reference path become structural variants (see [`bubble`]).
//! * Bases of reference nodes with alternate calls become point variants (see [`snp`]).
//!
//! Finally the variants are written as VCF (see [`vcf`]).
//! [`convert::convert`] runs the entire pipeline with the given [`ConversionParameters`].
//!
//! ### Coordinates
//!
//! Reference coordinates are 0-based offsets in the reference sequence.
//! VCF positions are 1-based.
//! Node offsets in call files are 1-based and converted to 0-based offsets when the calls are loaded.

pub mod bubble;
pub mod calls;
pub mod convert;
pub mod error;
pub mod gfa;
pub mod graph;
pub mod reference;
pub mod snp;
pub mod utils;
pub mod variant;
pub mod vcf;

pub use bubble::NodeCall;
pub use calls::{BaseCall, CallTable};
pub use convert::{ConversionParameters, ConversionStats};
pub use error::{Error, Result, SkipReason};
pub use graph::{Edit, GraphAccessor, HashGraph, PathStep};
pub use reference::{Placement, ReferenceIndex};
pub use variant::{Genotype, Variant, VariantKind};

#[cfg(test)]
pub(crate) mod internal;

#[cfg(test)]
mod tests;
