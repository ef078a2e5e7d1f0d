//! Conversions between strings and codepoint sequences, plus the marker
//! strings shared by the diff and rendering layers.

/// Appended to both inputs before diffing.
///
/// A trailing `"foo\n"` vs `"foo"` difference would otherwise produce an
/// edit script whose rendered output looks identical for both sides. The
/// marker is two literal characters, backslash then zero, so it survives
/// display as-is.
pub const EOS_MARKER: &str = "\\0";

/// The visible stand-in for `\n` in rendered diff lines.
///
/// Two literal characters, backslash then `n`. Writers substitute this for
/// real newlines so that line breaks are visible in the output.
pub const NEWLINE_MARKER: &str = "\\n";

/// Splits `text` into its Unicode codepoints.
pub fn to_codepoints(text: &str) -> Vec<char> {
    text.chars().collect()
}

/// Reassembles codepoints into a string.
pub fn from_codepoints(codepoints: &[char]) -> String {
    codepoints.iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_multibyte_text() {
        let text = "génie \u{1F980} 日本語";
        assert_eq!(from_codepoints(&to_codepoints(text)), text);
    }

    #[test]
    fn codepoints_not_bytes() {
        // "é" is two bytes in UTF-8 but one codepoint.
        assert_eq!(to_codepoints("é").len(), 1);
        assert_eq!(to_codepoints("\u{1F980}").len(), 1);
    }

    #[test]
    fn markers_are_two_characters() {
        assert_eq!(to_codepoints(EOS_MARKER), ['\\', '0']);
        assert_eq!(to_codepoints(NEWLINE_MARKER), ['\\', 'n']);
    }
}
