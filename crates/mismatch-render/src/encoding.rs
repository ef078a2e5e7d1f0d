//! Terminal encodings a diff can be rendered for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The color depth of the terminal the diff will be displayed on.
///
/// `None` renders plain text with a separate diff-marker line; the other
/// variants decorate the actual and expected lines with ANSI escape
/// sequences and omit the marker line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TerminalEncoding {
    /// Plain text, no escape sequences.
    #[default]
    #[serde(rename = "none")]
    None,
    /// ANSI 8-color palette.
    #[serde(rename = "8-colors")]
    Xterm8Colors,
    /// ANSI 16-color palette.
    #[serde(rename = "16-colors")]
    Xterm16Colors,
    /// Xterm 256-color palette.
    #[serde(rename = "256-colors")]
    Xterm256Colors,
    /// 24-bit RGB color.
    #[serde(rename = "rgb-888")]
    Rgb888Colors,
}

impl TerminalEncoding {
    /// All encodings, from least to most capable.
    pub const ALL: [TerminalEncoding; 5] = [
        TerminalEncoding::None,
        TerminalEncoding::Xterm8Colors,
        TerminalEncoding::Xterm16Colors,
        TerminalEncoding::Xterm256Colors,
        TerminalEncoding::Rgb888Colors,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            TerminalEncoding::None => "none",
            TerminalEncoding::Xterm8Colors => "8-colors",
            TerminalEncoding::Xterm16Colors => "16-colors",
            TerminalEncoding::Xterm256Colors => "256-colors",
            TerminalEncoding::Rgb888Colors => "rgb-888",
        }
    }
}

impl fmt::Display for TerminalEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TerminalEncoding {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(TerminalEncoding::None),
            "8-colors" => Ok(TerminalEncoding::Xterm8Colors),
            "16-colors" => Ok(TerminalEncoding::Xterm16Colors),
            "256-colors" => Ok(TerminalEncoding::Xterm256Colors),
            "rgb-888" => Ok(TerminalEncoding::Rgb888Colors),
            other => Err(EncodingError::Unknown(other.to_owned())),
        }
    }
}

/// A terminal encoding could not be selected.
#[derive(Debug, Error)]
pub enum EncodingError {
    #[error("unknown terminal encoding: {0:?}")]
    Unknown(String),
}
