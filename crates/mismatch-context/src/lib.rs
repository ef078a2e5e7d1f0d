//! Assembles labeled context lines describing why two values differ.
//!
//! [`ContextGenerator`] takes a labeled actual/expected pair of
//! [`ValueSnapshot`]s, renders their diff through `mismatch-render`, and
//! produces an ordered list of [`ContextLine`]s ready to append beneath a
//! failure message. Long equal spans are elided, multi-line values get
//! per-line labels, and value pairs whose string forms coincide fall back
//! to type, hash or identity comparisons so the message never claims two
//! values differ without showing how.
//!
//! # Key Types
//!
//! - [`DiffConfig`]: whether diffing is enabled and for which terminal
//!   encoding.
//! - [`ValueSnapshot`]: a value captured for comparison (rendered form,
//!   type name, optional hash, identity).
//! - [`ContextLine`]: one `name: value` output line.

mod config;
mod context;
mod line;
mod snapshot;

pub use config::DiffConfig;
pub use context::ContextGenerator;
pub use line::ContextLine;
pub use snapshot::ValueSnapshot;
