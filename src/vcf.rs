//! Writing variants in the VCF format.
//!
//! The output is a minimal single-sample VCF 4.2 file.
//! [`write_vcf_header`] writes the file format line, the definition of the `GT` field, and the column header line.
//! [`write_vcf_record`] writes a data line for a [`Variant`].
//!
//! Data lines use the reference path name as the contig name.
//! ID, FILTER, and INFO are always missing (`.`), and the only sample field is the genotype.

use crate::Variant;
use crate::utils;

use std::io::{self, Write};


//-----------------------------------------------------------------------------

/// VCF version written in the header.
pub const FILE_FORMAT: &str = "VCFv4.2";

/// Writes the VCF header for a single sample.
pub fn write_vcf_header<T: Write>(sample_name: &str, output: &mut T) -> io::Result<()> {
    let mut buffer: Vec<u8> = Vec::new();
    buffer.extend_from_slice(b"##fileformat=");
    buffer.extend_from_slice(FILE_FORMAT.as_bytes());
    buffer.push(b'\n');
    buffer.extend_from_slice(b"##FORMAT=<ID=GT,Number=1,Type=Integer,Description=\"Genotype\">\n");
    buffer.extend_from_slice(b"#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\t");
    buffer.extend_from_slice(sample_name.as_bytes());
    buffer.push(b'\n');
    output.write_all(&buffer)?;
    Ok(())
}

/// Writes a VCF data line for the variant on the given contig.
///
/// # Examples
///
/// ```
/// use calls2vcf::{vcf, Genotype, Variant, VariantKind};
///
/// let variant = Variant::new(VariantKind::Snp, 7, 12, b"C".to_vec(), vec![b"T".to_vec(), b"G".to_vec()], Genotype::AltOther);
/// let mut output: Vec<u8> = Vec::new();
/// vcf::write_vcf_record(&variant, "ref", &mut output).unwrap();
/// assert_eq!(output, b"ref\t12\t.\tC\tT,G\t0\t.\t.\tGT\t1/2\n");
/// ```
pub fn write_vcf_record<T: Write>(variant: &Variant, contig: &str, output: &mut T) -> io::Result<()> {
    let mut buffer: Vec<u8> = Vec::new();
    buffer.extend_from_slice(contig.as_bytes());
    buffer.push(b'\t');
    utils::append_usize(&mut buffer, variant.position);
    buffer.extend_from_slice(b"\t.\t");
    buffer.extend_from_slice(&variant.reference);
    buffer.push(b'\t');
    utils::append_joined(&mut buffer, &variant.alternates, b',');
    buffer.push(b'\t');
    utils::append_usize(&mut buffer, variant.quality);
    buffer.extend_from_slice(b"\t.\t.\tGT\t");
    buffer.extend_from_slice(variant.genotype.as_str().as_bytes());
    buffer.push(b'\n');
    output.write_all(&buffer)?;
    Ok(())
}

/// Writes the header and all variants.
pub fn write_vcf<T: Write>(variants: &[Variant], contig: &str, sample_name: &str, output: &mut T) -> io::Result<()> {
    write_vcf_header(sample_name, output)?;
    for variant in variants {
        write_vcf_record(variant, contig, output)?;
    }
    output.flush()?;
    Ok(())
}

//-----------------------------------------------------------------------------
