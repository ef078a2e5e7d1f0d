//! Drives an edit script through a writer.

use mismatch_diff::{edit_script, Delta};
use tracing::debug;

use crate::color::ColorWriter;
use crate::encoding::TerminalEncoding;
use crate::result::DiffResult;
use crate::text::TextOnlyWriter;
use crate::writer::{DiffWriter, TEXT_PADDING};

/// Renders the difference between two strings for one terminal encoding.
#[derive(Clone, Copy, Debug)]
pub struct DiffGenerator {
    encoding: TerminalEncoding,
}

impl DiffGenerator {
    pub fn new(encoding: TerminalEncoding) -> Self {
        Self { encoding }
    }

    pub fn encoding(&self) -> TerminalEncoding {
        self.encoding
    }

    /// Computes and renders the diff between `actual` and `expected`.
    pub fn diff(&self, actual: &str, expected: &str) -> DiffResult {
        let deltas = edit_script(actual, expected);
        let mut writer = self.new_writer();
        for delta in &deltas {
            match delta {
                Delta::Equal { source, .. } => writer.write_equal(&source.text()),
                Delta::Delete { source, .. } => writer.write_deleted(&source.text()),
                Delta::Insert { target, .. } => writer.write_inserted(&target.text()),
                Delta::Change { source, target } => {
                    writer.write_deleted(&source.text());
                    writer.write_inserted(&target.text());
                }
            }
        }
        writer.flush();
        let result = DiffResult::new(
            writer.actual_lines().to_vec(),
            writer.diff_lines().to_vec(),
            writer.expected_lines().to_vec(),
            writer.equal_lines().to_vec(),
        );
        debug!(
            encoding = %self.encoding,
            lines = result.len(),
            "rendered diff"
        );
        result
    }

    fn new_writer(&self) -> Box<dyn DiffWriter> {
        match self.encoding {
            TerminalEncoding::None => Box::new(TextOnlyWriter::new()),
            color => Box::new(ColorWriter::new(color)),
        }
    }

    /// The filler character the selected encoding pads with.
    pub fn padding_marker(&self) -> char {
        match self.encoding {
            TerminalEncoding::None => TEXT_PADDING,
            _ => crate::color::COLOR_PADDING,
        }
    }

    /// Whether a rendered line carries no content: nothing but escape
    /// sequences and padding markers.
    pub fn is_empty_line(&self, line: &str) -> bool {
        let padding = self.padding_marker();
        strip_ansi(line).chars().all(|c| c == padding)
    }
}

/// Removes ANSI escape sequences (`ESC [ ... m`).
fn strip_ansi(line: &str) -> String {
    let mut stripped = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' && chars.peek() == Some(&'[') {
            chars.next();
            for parameter in chars.by_ref() {
                if parameter == 'm' {
                    break;
                }
            }
        } else {
            stripped.push(c);
        }
    }
    stripped
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn identical_strings_render_all_equal() {
        let result = DiffGenerator::new(TerminalEncoding::None).diff("same", "same");
        assert_eq!(result.actual_lines(), ["same"]);
        assert_eq!(result.expected_lines(), ["same"]);
        assert_eq!(result.diff_lines(), ["===="]);
        assert_eq!(result.equal_lines(), [true]);
    }

    #[test]
    fn empty_strings_render_one_empty_equal_line() {
        let result = DiffGenerator::new(TerminalEncoding::None).diff("", "");
        assert_eq!(result.actual_lines(), [""]);
        assert_eq!(result.expected_lines(), [""]);
        assert_eq!(result.equal_lines(), [true]);
    }

    #[test]
    fn changed_word_is_marked_while_shared_prefix_stays_equal() {
        let result = DiffGenerator::new(TerminalEncoding::None).diff("hello world", "hello earth");
        assert_eq!(result.len(), 1);
        assert_eq!(result.equal_lines(), [false]);
        assert_eq!(result.actual_lines(), ["hello world     "]);
        assert_eq!(result.expected_lines(), ["hello      earth"]);
        assert_eq!(result.diff_lines(), ["======-----+++++"]);
    }

    #[test]
    fn trailing_whitespace_difference_is_visible() {
        let result = DiffGenerator::new(TerminalEncoding::None).diff("foo ", "foo");
        assert_eq!(result.equal_lines(), [false]);
        assert!(result.diff_lines()[0].contains('-'));
    }

    #[test]
    fn all_encodings_agree_on_equality_flags() {
        for encoding in TerminalEncoding::ALL {
            let result = DiffGenerator::new(encoding).diff("one\ntwo\nthree", "one\nTWO\nthree");
            assert_eq!(
                result.equal_lines(),
                [true, false, true],
                "encoding {encoding}"
            );
        }
    }

    #[test]
    fn empty_line_detection_ignores_escapes_and_padding() {
        let generator = DiffGenerator::new(TerminalEncoding::Xterm16Colors);
        assert!(generator.is_empty_line("\u{1b}[90m///\u{1b}[0m"));
        assert!(generator.is_empty_line(""));
        assert!(!generator.is_empty_line("\u{1b}[90m/x/\u{1b}[0m"));
    }

    fn reconstruct(lines: &[String], padding: char) -> String {
        let mut text = String::new();
        for line in lines {
            let stripped: String = strip_ansi(line).chars().filter(|c| *c != padding).collect();
            text.push_str(&stripped.replace("\\n", "\n"));
        }
        text
    }

    proptest! {
        // Dropping padding and newline markers from the rendered lines
        // must rebuild each input exactly. Inputs avoid characters that
        // collide with padding or markers so reconstruction is
        // unambiguous.
        #[test]
        fn rendering_round_trips(
            actual in "[a-z0-9\n]{0,30}",
            expected in "[a-z0-9\n]{0,30}",
        ) {
            let generator = DiffGenerator::new(TerminalEncoding::None);
            let result = generator.diff(&actual, &expected);
            prop_assert_eq!(
                reconstruct(result.actual_lines(), generator.padding_marker()),
                actual.clone()
            );
            prop_assert_eq!(
                reconstruct(result.expected_lines(), generator.padding_marker()),
                expected.clone()
            );
        }

        // The three parallel vectors always have the same length, and
        // plain text always carries marker rows.
        #[test]
        fn line_vectors_stay_parallel(
            actual in ".{0,30}",
            expected in ".{0,30}",
        ) {
            for encoding in TerminalEncoding::ALL {
                let result = DiffGenerator::new(encoding).diff(&actual, &expected);
                prop_assert_eq!(result.expected_lines().len(), result.len());
                prop_assert_eq!(result.equal_lines().len(), result.len());
                if encoding == TerminalEncoding::None {
                    prop_assert_eq!(result.diff_lines().len(), result.len());
                } else {
                    prop_assert!(result.diff_lines().is_empty());
                }
            }
        }
    }
}
