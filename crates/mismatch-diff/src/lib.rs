//! Codepoint-level edit scripts between an actual and an expected string.
//!
//! The entry point is [`edit_script`], which compares two strings one
//! Unicode codepoint at a time and returns a sequence of [`Delta`]s.
//! Raw per-codepoint scripts are noisy for prose, so the script is
//! post-processed by a word-boundary reducer that collapses words peppered
//! with small edits into a single delete/insert pair (see [`reduce`]).
//!
//! # Key Types
//!
//! - [`Delta`]: one run of the edit script (equal, deleted, inserted or
//!   changed) carrying the affected codepoints on each side.
//! - [`Chunk`]: the codepoints a delta covers on one side, plus their
//!   position in that side's input.
//!
//! Both inputs are terminated with [`EOS_MARKER`] before diffing so that
//! trailing-newline differences remain visible in the output.

mod codepoints;
mod delta;
mod reduce;
mod script;

pub use codepoints::{from_codepoints, to_codepoints, EOS_MARKER, NEWLINE_MARKER};
pub use delta::{Chunk, Delta};
pub use reduce::reduce_word_deltas;
pub use script::edit_script;
