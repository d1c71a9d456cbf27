//! Variant records produced from graph calls.

use std::fmt::Display;

//-----------------------------------------------------------------------------

/// Genotype of the single sample at a variant site.
///
/// Allele 0 is the reference allele and alleles 1 and 2 are the alternate alleles in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Genotype {
    /// The first alternate allele together with the reference allele (`1/0`).
    AltRef,
    /// Two copies of the first alternate allele (`1/1`).
    AltAlt,
    /// The first and the second alternate alleles (`1/2`).
    AltOther,
}

impl Genotype {
    /// Returns the genotype string used in VCF.
    pub fn as_str(&self) -> &'static str {
        match self {
            Genotype::AltRef => "1/0",
            Genotype::AltAlt => "1/1",
            Genotype::AltOther => "1/2",
        }
    }
}

impl Display for Genotype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//-----------------------------------------------------------------------------

/// The kind of graph evidence behind a variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VariantKind {
    /// A non-reference node replacing a reference interval.
    Bubble,
    /// Alternate bases called on a reference node.
    Snp,
}

/// A variant site with the genotype of a single sample.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variant {
    /// 1-based reference position of the first base of the reference allele.
    pub position: usize,
    /// Reference allele.
    pub reference: Vec<u8>,
    /// Alternate alleles; the first one is allele 1.
    pub alternates: Vec<Vec<u8>>,
    /// Genotype of the sample.
    pub genotype: Genotype,
    /// Quality score.
    pub quality: usize,
    /// Node that caused the variant.
    pub node_id: usize,
    /// Type of evidence.
    pub kind: VariantKind,
}

impl Variant {
    /// Creates a new variant with quality 0.
    pub fn new(
        kind: VariantKind, node_id: usize,
        position: usize, reference: Vec<u8>, alternates: Vec<Vec<u8>>,
        genotype: Genotype
    ) -> Self {
        Variant { position, reference, alternates, genotype, quality: 0, node_id, kind }
    }

    /// Returns a short description of the alleles, such as `A -> ACT` or `C -> T,G`.
    pub fn allele_summary(&self) -> String {
        let alternates: Vec<String> = self.alternates.iter().map(|allele| String::from_utf8_lossy(allele).to_string()).collect();
        format!("{} -> {}", String::from_utf8_lossy(&self.reference), alternates.join(","))
    }
}

//-----------------------------------------------------------------------------
