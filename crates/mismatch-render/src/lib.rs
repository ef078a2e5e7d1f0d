//! Renders an edit script as aligned "actual" / "diff" / "expected"
//! lines, in plain text or one of several ANSI color depths.
//!
//! The entry point is [`DiffGenerator`]: it computes the edit script for
//! a pair of strings, feeds it through a [`DiffWriter`] selected by
//! [`TerminalEncoding`], and returns the sealed lines as a
//! [`DiffResult`].
//!
//! # Key Types
//!
//! - [`TerminalEncoding`]: which writer to instantiate (plain text or a
//!   color depth).
//! - [`DiffWriter`]: the accumulation contract shared by all writers.
//! - [`DiffResult`]: parallel actual/diff/expected/equal line vectors.
//!
//! Writers keep the two sides column-aligned: where one side has no text
//! on a line, a padding marker of equal width is written instead, so the
//! unequal regions line up vertically in the final message.

mod color;
mod encoding;
mod generator;
mod grid;
mod result;
mod text;
mod writer;

pub use color::{ColorWriter, ANSI_POSTFIX, ANSI_PREFIX, COLOR_PADDING, RESET};
pub use encoding::{EncodingError, TerminalEncoding};
pub use generator::DiffGenerator;
pub use result::DiffResult;
pub use text::TextOnlyWriter;
pub use writer::{DiffWriter, DIFF_DELETE, DIFF_EQUAL, DIFF_INSERT, TEXT_PADDING};
