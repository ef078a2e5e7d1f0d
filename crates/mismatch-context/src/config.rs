//! Configuration consumed by the context generator.

use mismatch_render::TerminalEncoding;
use serde::{Deserialize, Serialize};

/// Controls whether and how diffs are rendered into context lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// When false, context lines show the two values without a diff.
    pub diff_enabled: bool,
    /// Terminal encoding the diff is rendered for.
    pub encoding: TerminalEncoding,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            diff_enabled: true,
            encoding: TerminalEncoding::None,
        }
    }
}

impl DiffConfig {
    /// A configuration that renders plain-text diffs.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_encoding(mut self, encoding: TerminalEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn without_diff(mut self) -> Self {
        self.diff_enabled = false;
        self
    }
}
