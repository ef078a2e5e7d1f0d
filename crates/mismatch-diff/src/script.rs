//! Produces the edit script between two strings.

use similar::{capture_diff_slices, Algorithm, DiffOp};
use tracing::debug;

use crate::codepoints::{to_codepoints, EOS_MARKER};
use crate::delta::{Chunk, Delta};
use crate::reduce::reduce_word_deltas;

/// Compares `actual` against `expected` one codepoint at a time.
///
/// Both inputs are terminated with [`EOS_MARKER`] before diffing, so the
/// returned script always ends in an equal delta and trailing-whitespace
/// differences stay visible. The raw script is post-processed by
/// [`reduce_word_deltas`].
pub fn edit_script(actual: &str, expected: &str) -> Vec<Delta> {
    let mut source = to_codepoints(actual);
    source.extend(EOS_MARKER.chars());
    let mut target = to_codepoints(expected);
    target.extend(EOS_MARKER.chars());

    let ops = capture_diff_slices(Algorithm::Myers, &source, &target);
    let mut deltas: Vec<Delta> = ops
        .iter()
        .map(|op| match *op {
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            } => Delta::Equal {
                source: Chunk::new(old_index, source[old_index..old_index + len].to_vec()),
                target: Chunk::new(new_index, target[new_index..new_index + len].to_vec()),
            },
            DiffOp::Delete {
                old_index,
                old_len,
                new_index,
            } => Delta::Delete {
                source: Chunk::new(old_index, source[old_index..old_index + old_len].to_vec()),
                target: Chunk::empty(new_index),
            },
            DiffOp::Insert {
                old_index,
                new_index,
                new_len,
            } => Delta::Insert {
                source: Chunk::empty(old_index),
                target: Chunk::new(new_index, target[new_index..new_index + new_len].to_vec()),
            },
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => Delta::Change {
                source: Chunk::new(old_index, source[old_index..old_index + old_len].to_vec()),
                target: Chunk::new(new_index, target[new_index..new_index + new_len].to_vec()),
            },
        })
        .collect();
    let raw = deltas.len();
    reduce_word_deltas(&mut deltas);
    debug!(raw, reduced = deltas.len(), "computed edit script");
    deltas
}
