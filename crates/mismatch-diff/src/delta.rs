//! The building blocks of an edit script.

use crate::codepoints::from_codepoints;

/// The codepoints a delta covers on one side of the comparison.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
    /// Codepoint offset of this chunk in its side's input.
    pub position: usize,
    /// The covered codepoints. Empty when the delta does not touch this
    /// side (e.g. the target side of a deletion).
    pub data: Vec<char>,
}

impl Chunk {
    pub fn new(position: usize, data: Vec<char>) -> Self {
        Self { position, data }
    }

    /// An empty chunk anchored at `position`.
    pub fn empty(position: usize) -> Self {
        Self {
            position,
            data: Vec::new(),
        }
    }

    /// Number of codepoints in the chunk.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The chunk's codepoints as a string.
    pub fn text(&self) -> String {
        from_codepoints(&self.data)
    }
}

/// One run of an edit script.
///
/// Every variant carries both sides: `source` is the actual value's chunk,
/// `target` the expected value's. The side a variant does not touch holds
/// an empty chunk anchored at the position the text would have occupied,
/// so consumers can always recover per-side offsets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delta {
    /// Both sides contain the same codepoints.
    Equal { source: Chunk, target: Chunk },
    /// Codepoints present in the actual value but not the expected one.
    Delete { source: Chunk, target: Chunk },
    /// Codepoints present in the expected value but not the actual one.
    Insert { source: Chunk, target: Chunk },
    /// Codepoints replaced wholesale; both sides are non-empty and differ.
    Change { source: Chunk, target: Chunk },
}

impl Delta {
    /// The actual value's chunk.
    pub fn source(&self) -> &Chunk {
        match self {
            Delta::Equal { source, .. }
            | Delta::Delete { source, .. }
            | Delta::Insert { source, .. }
            | Delta::Change { source, .. } => source,
        }
    }

    /// The expected value's chunk.
    pub fn target(&self) -> &Chunk {
        match self {
            Delta::Equal { target, .. }
            | Delta::Delete { target, .. }
            | Delta::Insert { target, .. }
            | Delta::Change { target, .. } => target,
        }
    }

    pub fn is_equal(&self) -> bool {
        matches!(self, Delta::Equal { .. })
    }

    /// A delta of the same variant as `self` carrying different chunks.
    pub fn with_chunks(&self, source: Chunk, target: Chunk) -> Delta {
        match self {
            Delta::Equal { .. } => Delta::Equal { source, target },
            Delta::Delete { .. } => Delta::Delete { source, target },
            Delta::Insert { .. } => Delta::Insert { source, target },
            Delta::Change { .. } => Delta::Change { source, target },
        }
    }
}
