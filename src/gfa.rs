//! Reading GFA files into a [`HashGraph`].
//!
//! The reader supports GFA 1.x segment (`S`), link (`L`), path (`P`), and walk (`W`) lines.
//! Other lines, including the header, are ignored.
//! Segment names must be integer node identifiers, as in graphs converted to GBZ without a translation.
//!
//! Path steps are full-length matches.
//! A P-line overlap other than `*` or `0M` means that the path does not spell out the next segment in full.
//! Such a step gets an edit that removes the overlapping bases, and it is not a perfect match.
//!
//! Walks are named like GBZ paths (see [`crate::graph::path_lookup_names`]), with the start offset of the walk as the fragment.
//! A walk is stored under its `sample#haplotype#contig` name, or under the contig name for the generic sample.
//! The other names are aliases.

use crate::{Error, HashGraph, PathStep, Result};
use crate::graph::{self, Edit};
use crate::utils;

use std::io::BufRead;
use std::path::Path;

use gbwt::Orientation;


//-----------------------------------------------------------------------------

/// Loads a GFA file, which may be gzip-compressed.
pub fn load_gfa<P: AsRef<Path>>(filename: P) -> Result<HashGraph> {
    let reader = utils::open_file(&filename)?;
    read_gfa(reader)
}

/// Reads a GFA graph from the reader.
///
/// Segments may appear after the links and paths that refer to them.
/// Returns [`Error::Graph`] with the line number if a line cannot be parsed or refers to a missing segment.
///
/// # Examples
///
/// ```
/// use calls2vcf::{gfa, GraphAccessor};
/// use gbwt::Orientation;
///
/// let text = "H\tVN:Z:1.0\nS\t1\tGAT\nS\t2\tTACA\nL\t1\t+\t2\t-\t0M\nP\tref\t1+,2-\t*\n";
/// let graph = gfa::read_gfa(text.as_bytes()).unwrap();
/// assert_eq!(graph.nodes(), 2);
/// assert_eq!(graph.successors(1, Orientation::Forward), vec![(2, Orientation::Reverse)]);
/// assert_eq!(graph.path_steps("ref").map(|steps| steps.len()), Some(2));
/// ```
pub fn read_gfa<R: BufRead>(reader: R) -> Result<HashGraph> {
    let mut graph = HashGraph::new();
    let mut links: Vec<(usize, (usize, Orientation), (usize, Orientation))> = Vec::new();
    let mut paths: Vec<(usize, Vec<String>, Vec<PathStep>)> = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = line_num + 1;
        let fields: Vec<&str> = line.split('\t').collect();
        let result = match fields[0] {
            "S" => parse_segment(&fields).and_then(|(node_id, sequence)| graph.add_node(node_id, sequence)),
            "L" => parse_link(&fields).map(|(from, to)| links.push((line_num, from, to))),
            "P" => parse_path(&fields).map(|(name, steps)| paths.push((line_num, vec![name], steps))),
            "W" => parse_walk(&fields).map(|(names, steps)| paths.push((line_num, names, steps))),
            _ => Ok(()),
        };
        result.map_err(|message| line_error(line_num, &message))?;
    }

    for (line_num, from, to) in links {
        graph.add_edge(from, to).map_err(|message| line_error(line_num, &message))?;
    }
    for (line_num, names, steps) in paths {
        graph.add_path(&names[0], steps).map_err(|message| line_error(line_num, &message))?;
        for alias in names.iter().skip(1) {
            graph.add_alias(alias, &names[0]).map_err(|message| line_error(line_num, &message))?;
        }
    }

    tracing::debug!("Read a GFA graph with {} nodes and {} paths", graph.nodes(), graph.paths());
    Ok(graph)
}

fn line_error(line_num: usize, message: &str) -> Error {
    Error::Graph(format!("GFA line {}: {}", line_num, message))
}

//-----------------------------------------------------------------------------

fn field<'a>(fields: &[&'a str], index: usize, name: &str) -> std::result::Result<&'a str, String> {
    fields.get(index).cloned().ok_or(format!("Missing {} field", name))
}

fn parse_node_id(name: &str) -> std::result::Result<usize, String> {
    name.parse::<usize>().map_err(|_| format!("Segment name {} is not an integer node identifier", name))
}

fn parse_orientation(value: &str) -> std::result::Result<Orientation, String> {
    match value {
        "+" => Ok(Orientation::Forward),
        "-" => Ok(Orientation::Reverse),
        _ => Err(format!("Invalid orientation {}", value)),
    }
}

fn parse_segment<'a>(fields: &[&'a str]) -> std::result::Result<(usize, &'a [u8]), String> {
    let node_id = parse_node_id(field(fields, 1, "segment name")?)?;
    let sequence = field(fields, 2, "sequence")?;
    if sequence == "*" {
        return Err(format!("Segment {} has no sequence", node_id));
    }
    Ok((node_id, sequence.as_bytes()))
}

fn parse_link(fields: &[&str]) -> std::result::Result<((usize, Orientation), (usize, Orientation)), String> {
    let from_id = parse_node_id(field(fields, 1, "from segment")?)?;
    let from_o = parse_orientation(field(fields, 2, "from orientation")?)?;
    let to_id = parse_node_id(field(fields, 3, "to segment")?)?;
    let to_o = parse_orientation(field(fields, 4, "to orientation")?)?;
    Ok(((from_id, from_o), (to_id, to_o)))
}

fn parse_path(fields: &[&str]) -> std::result::Result<(String, Vec<PathStep>), String> {
    let name = field(fields, 1, "path name")?;
    let mut steps = Vec::new();
    for segment in field(fields, 2, "segment names")?.split(',') {
        if segment.len() < 2 {
            return Err(format!("Invalid path step {}", segment));
        }
        let (id, orientation) = segment.split_at(segment.len() - 1);
        steps.push(PathStep::new(parse_node_id(id)?, parse_orientation(orientation)?));
    }

    // Overlaps are between consecutive steps.
    let overlaps = fields.get(3).cloned().unwrap_or("*");
    if overlaps != "*" {
        let overlaps: Vec<&str> = overlaps.split(',').collect();
        if overlaps.len() + 1 != steps.len() {
            return Err(format!("Path {} has {} steps but {} overlaps", name, steps.len(), overlaps.len()));
        }
        for (i, cigar) in overlaps.iter().enumerate() {
            let overlap = cigar_len(cigar)?;
            if overlap > 0 {
                steps[i + 1].edits.push(Edit::deletion(overlap));
            }
        }
    }

    Ok((name.to_string(), steps))
}

// Returns the total length of the operations in a CIGAR string.
fn cigar_len(cigar: &str) -> std::result::Result<usize, String> {
    let mut total = 0;
    let mut value: Option<usize> = None;
    for c in cigar.chars() {
        if let Some(digit) = c.to_digit(10) {
            value = Some(value.unwrap_or(0) * 10 + digit as usize);
        } else if "MIDNSHP=X".contains(c) {
            total += value.ok_or(format!("Invalid CIGAR string {}", cigar))?;
            value = None;
        } else {
            return Err(format!("Invalid CIGAR string {}", cigar));
        }
    }
    if value.is_some() {
        return Err(format!("Invalid CIGAR string {}", cigar));
    }
    Ok(total)
}

// Returns the names of the walk, with the primary name first.
fn parse_walk(fields: &[&str]) -> std::result::Result<(Vec<String>, Vec<PathStep>), String> {
    let sample = field(fields, 1, "sample name")?;
    let haplotype = field(fields, 2, "haplotype")?;
    let haplotype = haplotype.parse::<usize>().map_err(|_| format!("Invalid haplotype {}", haplotype))?;
    let contig = field(fields, 3, "sequence name")?;
    let fragment = field(fields, 4, "start offset")?;
    let fragment = fragment.parse::<usize>().map_err(|_| format!("Invalid start offset {}", fragment))?;
    let walk = field(fields, 6, "walk")?.as_bytes();

    let mut steps = Vec::new();
    let mut i = 0;
    while i < walk.len() {
        let orientation = match walk[i] {
            b'>' => Orientation::Forward,
            b'<' => Orientation::Reverse,
            _ => return Err(format!("Invalid walk {}", String::from_utf8_lossy(walk))),
        };
        i += 1;
        let start = i;
        while i < walk.len() && walk[i].is_ascii_digit() {
            i += 1;
        }
        let id = String::from_utf8_lossy(&walk[start..i]);
        steps.push(PathStep::new(parse_node_id(&id)?, orientation));
    }

    Ok((graph::path_lookup_names(sample, haplotype, contig, fragment), steps))
}

//-----------------------------------------------------------------------------
