//! Per-base calls on graph nodes.
//!
//! A call file is a line-oriented text file with four whitespace-separated fields on each line:
//!
//! 1. node identifier;
//! 2. 1-based offset in the node;
//! 3. the base the graph has at that position (informational);
//! 4. comma-separated call tokens.
//!
//! Call token `.` means that the base in the graph is present in the sample.
//! Token `-` is a placeholder with no meaning.
//! Any other token is a single alternate base observed in the sample.
//! Blank lines are ignored, and additional fields are ignored.
//!
//! The calls are stored in a [`CallTable`] indexed by node identifier and 0-based offset.

use crate::{Error, Result};
use crate::utils;

use std::collections::{BTreeSet, HashMap};
use std::io::BufRead;
use std::path::Path;

use arrayvec::ArrayVec;


//-----------------------------------------------------------------------------

const MAX_ALTS: usize = 2;

/// The calls for a single base of a node.
///
/// # Examples
///
/// ```
/// use calls2vcf::BaseCall;
///
/// let call = BaseCall::new(&[".", "A"]).unwrap();
/// assert!(call.graph_base_present());
/// assert_eq!(call.alts(), b"A");
///
/// let call = BaseCall::new(&["-", "-"]).unwrap();
/// assert!(!call.graph_base_present());
/// assert!(call.alts().is_empty());
///
/// assert!(BaseCall::new(&["A", "C", "G"]).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BaseCall {
    graph_base_present: bool,
    alts: ArrayVec<u8, MAX_ALTS>,
}

impl BaseCall {
    /// Maximum number of alternate bases at a position.
    pub const MAX_ALTS: usize = MAX_ALTS;

    /// Token for the graph base being present.
    pub const PRESENT: &'static str = ".";

    /// Placeholder token.
    pub const PLACEHOLDER: &'static str = "-";

    /// Interprets a set of call tokens.
    ///
    /// Repeated tokens are counted once, and alternate bases are stored in lexicographic order of the tokens.
    /// Returns [`Error::InvalidCallToken`] if an alternate token is not a single character.
    /// Returns [`Error::TooManyAlts`] if there are more than [`Self::MAX_ALTS`] distinct alternate bases.
    pub fn new<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let distinct: BTreeSet<&str> = tokens.iter().map(|token| token.as_ref()).collect();
        let mut result = BaseCall::default();
        for token in distinct {
            if token == Self::PLACEHOLDER {
                continue;
            }
            if token == Self::PRESENT {
                result.graph_base_present = true;
                continue;
            }
            if token.len() != 1 {
                return Err(Error::InvalidCallToken(token.to_string()));
            }
            result.alts.try_push(token.as_bytes()[0]).map_err(|_| {
                Error::TooManyAlts(tokens.iter().map(|token| token.as_ref().to_string()).collect())
            })?;
        }
        Ok(result)
    }

    /// Returns `true` if the base in the graph is present in the sample.
    #[inline]
    pub fn graph_base_present(&self) -> bool {
        self.graph_base_present
    }

    /// Returns the alternate bases in lexicographic order.
    #[inline]
    pub fn alts(&self) -> &[u8] {
        &self.alts
    }

    /// Returns `true` if there are alternate bases.
    #[inline]
    pub fn has_alts(&self) -> bool {
        !self.alts.is_empty()
    }

    /// Returns `true` if the graph base or an alternate base is present.
    #[inline]
    pub fn is_observed(&self) -> bool {
        self.graph_base_present || self.has_alts()
    }
}

//-----------------------------------------------------------------------------

/// Calls for the bases of graph nodes.
///
/// Nodes without calls and offsets past the last call of a node behave as absent bases with no alternate calls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallTable {
    calls: HashMap<usize, Vec<BaseCall>>,
}

impl CallTable {
    /// Largest accepted 1-based offset in a call file.
    pub const MAX_OFFSET: usize = u32::MAX as usize;

    /// Creates an empty call table.
    pub fn new() -> Self {
        CallTable::default()
    }

    /// Loads a call file, which may be gzip-compressed.
    pub fn load<P: AsRef<Path>>(filename: P) -> Result<Self> {
        let reader = utils::open_file(&filename)?;
        Self::from_reader(reader)
    }

    /// Reads calls from the reader.
    ///
    /// Returns [`Error::MalformedLine`] if a non-blank line cannot be parsed or the offset exceeds [`Self::MAX_OFFSET`].
    /// A later call for the same base replaces the earlier one.
    ///
    /// # Examples
    ///
    /// ```
    /// use calls2vcf::CallTable;
    ///
    /// let text = "1 1 G .\n\n1 3 T -,C\n";
    /// let table = CallTable::from_reader(text.as_bytes()).unwrap();
    /// assert_eq!(table.node_calls(1).len(), 3);
    /// assert!(table.get(1, 0).unwrap().graph_base_present());
    /// assert!(!table.get(1, 1).unwrap().is_observed());
    /// assert_eq!(table.get(1, 2).unwrap().alts(), b"C");
    /// assert!(table.node_calls(2).is_empty());
    /// ```
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut result = CallTable::new();
        for (line_num, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let (node_id, offset, call) = parse_call_line(&line, line_num + 1)?;
            tracing::trace!(
                "Node {} base {} status: {}",
                node_id, offset, if call.graph_base_present() { "Present" } else { "Absent" }
            );
            result.insert(node_id, offset, call);
        }
        tracing::debug!("Read calls for {} bases on {} nodes", result.bases(), result.nodes());
        Ok(result)
    }

    /// Sets the call for the base at the given 0-based offset of the node.
    pub fn insert(&mut self, node_id: usize, offset: usize, call: BaseCall) {
        let calls = self.calls.entry(node_id).or_default();
        if calls.len() <= offset {
            calls.resize(offset + 1, BaseCall::default());
        }
        calls[offset] = call;
    }

    /// Returns the calls for the node, indexed by offset.
    ///
    /// The slice ends at the last offset with a call.
    pub fn node_calls(&self, node_id: usize) -> &[BaseCall] {
        match self.calls.get(&node_id) {
            Some(calls) => calls.as_slice(),
            None => &[],
        }
    }

    /// Returns the call for the base at the given 0-based offset of the node.
    pub fn get(&self, node_id: usize, offset: usize) -> Option<&BaseCall> {
        self.calls.get(&node_id).and_then(|calls| calls.get(offset))
    }

    /// Returns the number of nodes with calls.
    #[inline]
    pub fn nodes(&self) -> usize {
        self.calls.len()
    }

    /// Returns the total number of call slots over all nodes.
    pub fn bases(&self) -> usize {
        self.calls.values().map(|calls| calls.len()).sum()
    }
}

//-----------------------------------------------------------------------------

/// Parses a line of a call file.
///
/// Returns the node identifier, the 0-based offset, and the call.
/// `line_num` is used in error messages.
pub fn parse_call_line(line: &str, line_num: usize) -> Result<(usize, usize, BaseCall)> {
    let malformed = |message: String| Error::MalformedLine { line: line_num, message };

    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(malformed(format!("expected 4 fields, found {}", fields.len())));
    }
    let node_id = fields[0].parse::<usize>().map_err(|_| malformed(format!("invalid node id {}", fields[0])))?;
    let offset = fields[1].parse::<usize>().map_err(|_| malformed(format!("invalid offset {}", fields[1])))?;
    if offset == 0 {
        return Err(malformed(String::from("offsets are 1-based")));
    }
    if offset > CallTable::MAX_OFFSET {
        return Err(malformed(format!("offset {} exceeds the maximum node length {}", offset, CallTable::MAX_OFFSET)));
    }

    let tokens: Vec<&str> = fields[3].split(',').collect();
    let call = BaseCall::new(&tokens)?;

    Ok((node_id, offset - 1, call))
}

//-----------------------------------------------------------------------------
