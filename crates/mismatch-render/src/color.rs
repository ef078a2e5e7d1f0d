//! ANSI color writers.
//!
//! Color encodings decorate the actual and expected text directly instead
//! of emitting a separate marker row: equal text is dimmed, deleted text
//! gets the "removed" style, inserted text the "added" style, and padding
//! is drawn with a visible filler character in a muted style.

use mismatch_diff::NEWLINE_MARKER;

use crate::encoding::TerminalEncoding;
use crate::grid::LineGrid;
use crate::writer::{split_lines, DiffWriter};

/// Starts an escape sequence; SGR parameters and [`ANSI_POSTFIX`] follow.
pub const ANSI_PREFIX: &str = "\u{1b}[";
/// Terminates an SGR escape sequence.
pub const ANSI_POSTFIX: &str = "m";
/// Clears all active decorations.
pub const RESET: &str = "\u{1b}[0m";
/// Padding marker used by the color writers.
///
/// Unlike the plain-text writer's space, this must be visibly non-blank:
/// the muted decoration is what distinguishes filler from real slashes.
pub const COLOR_PADDING: char = '/';

/// What a span of output represents; selects its SGR parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Decoration {
    Equal,
    Deleted,
    Inserted,
    Padding,
}

/// SGR parameter lists for each decoration, one palette per encoding.
/// An empty list means the span is left undecorated.
struct Palette {
    equal: &'static str,
    deleted: &'static str,
    inserted: &'static str,
    padding: &'static str,
}

impl Palette {
    fn for_encoding(encoding: TerminalEncoding) -> Palette {
        match encoding {
            // The plain-text writer handles `None`.
            TerminalEncoding::None => unreachable!("plain text is not a color encoding"),
            TerminalEncoding::Xterm8Colors => Palette {
                equal: "",
                deleted: "31",
                inserted: "32",
                padding: "",
            },
            TerminalEncoding::Xterm16Colors => Palette {
                equal: "90",
                deleted: "37;1;41",
                inserted: "37;1;42",
                padding: "90",
            },
            TerminalEncoding::Xterm256Colors => Palette {
                equal: "38;5;252",
                deleted: "38;5;15;48;5;124",
                inserted: "38;5;15;48;5;28",
                padding: "38;5;240",
            },
            TerminalEncoding::Rgb888Colors => Palette {
                equal: "38;2;188;188;188",
                deleted: "38;2;255;255;255;48;2;175;0;0",
                inserted: "38;2;255;255;255;48;2;0;135;0",
                padding: "38;2;120;120;120",
            },
        }
    }

    fn parameters(&self, decoration: Decoration) -> &'static str {
        match decoration {
            Decoration::Equal => self.equal,
            Decoration::Deleted => self.deleted,
            Decoration::Inserted => self.inserted,
            Decoration::Padding => self.padding,
        }
    }
}

#[derive(Clone, Copy)]
enum Side {
    Actual,
    Expected,
}

/// Renders the diff with ANSI escape sequences at the given color depth.
pub struct ColorWriter {
    grid: LineGrid,
    palette: Palette,
    padding: char,
    /// The decoration currently open on each line, per side. A new span
    /// only emits an escape sequence when its decoration differs.
    actual_open: Vec<Option<Decoration>>,
    expected_open: Vec<Option<Decoration>>,
}

impl ColorWriter {
    /// A writer for `encoding` using the standard [`COLOR_PADDING`]
    /// filler.
    pub fn new(encoding: TerminalEncoding) -> Self {
        Self::with_padding(encoding, COLOR_PADDING)
    }

    /// A writer with a custom padding marker.
    ///
    /// # Panics
    ///
    /// Panics if `padding` is blank: an invisible filler would make
    /// padded regions indistinguishable from real whitespace.
    pub fn with_padding(encoding: TerminalEncoding, padding: char) -> Self {
        assert!(!padding.is_whitespace(), "padding marker may not be blank");
        Self {
            grid: LineGrid::new(false),
            palette: Palette::for_encoding(encoding),
            padding,
            actual_open: Vec::new(),
            expected_open: Vec::new(),
        }
    }

    fn open_slot(&mut self, side: Side, line: usize) -> &mut Option<Decoration> {
        let open = match side {
            Side::Actual => &mut self.actual_open,
            Side::Expected => &mut self.expected_open,
        };
        if open.len() <= line {
            open.resize(line + 1, None);
        }
        &mut open[line]
    }

    /// Appends `text` decorated for its role, reusing the line's open
    /// decoration when possible and resetting first when switching.
    fn append(&mut self, side: Side, line: usize, decoration: Decoration, text: &str) {
        let parameters = self.palette.parameters(decoration);
        let slot = self.open_slot(side, line);
        let mut span = String::new();
        if *slot != Some(decoration) {
            if slot.is_some() {
                span.push_str(RESET);
            }
            if !parameters.is_empty() {
                span.push_str(ANSI_PREFIX);
                span.push_str(parameters);
                span.push_str(ANSI_POSTFIX);
                *slot = Some(decoration);
            } else {
                *slot = None;
            }
        }
        span.push_str(text);
        match side {
            Side::Actual => self.grid.append_actual_at(line, &span),
            Side::Expected => self.grid.append_expected_at(line, &span),
        }
    }

    /// Closes the side's open decoration before its line ends.
    fn close_line(&mut self, side: Side, line: usize) {
        let slot = self.open_slot(side, line);
        if slot.take().is_some() {
            match side {
                Side::Actual => self.grid.append_actual_at(line, RESET),
                Side::Expected => self.grid.append_expected_at(line, RESET),
            }
        }
    }

    fn padding(&self, width: usize) -> String {
        self.padding.to_string().repeat(width)
    }
}

impl DiffWriter for ColorWriter {
    fn write_equal(&mut self, text: &str) {
        for (segment, newline) in split_lines(text) {
            let mut visible = segment;
            if newline {
                visible.push_str(NEWLINE_MARKER);
            }
            let width = visible.chars().count();
            if self.grid.aligned() {
                let line = self.grid.actual_cursor();
                self.append(Side::Actual, line, Decoration::Equal, &visible);
                self.append(Side::Expected, line, Decoration::Equal, &visible);
            } else {
                let actual_line = self.grid.actual_cursor();
                let expected_line = self.grid.expected_cursor();
                let padding = self.padding(width);
                self.append(Side::Actual, actual_line, Decoration::Equal, &visible);
                self.append(Side::Expected, actual_line, Decoration::Padding, &padding);
                self.append(Side::Expected, expected_line, Decoration::Equal, &visible);
                self.append(Side::Actual, expected_line, Decoration::Padding, &padding);
                self.grid.mark_unequal(actual_line);
                self.grid.mark_unequal(expected_line);
            }
            if newline {
                self.close_line(Side::Actual, self.grid.actual_cursor());
                self.close_line(Side::Expected, self.grid.expected_cursor());
                self.grid.end_actual_line();
                self.grid.end_expected_line();
            }
        }
    }

    fn write_deleted(&mut self, text: &str) {
        for (segment, newline) in split_lines(text) {
            let mut visible = segment;
            if newline {
                visible.push_str(NEWLINE_MARKER);
            }
            let width = visible.chars().count();
            let line = self.grid.actual_cursor();
            self.append(Side::Actual, line, Decoration::Deleted, &visible);
            self.append(Side::Expected, line, Decoration::Padding, &self.padding(width));
            self.grid.mark_unequal(line);
            if newline {
                self.close_line(Side::Actual, line);
                self.grid.end_actual_line();
            }
        }
    }

    fn write_inserted(&mut self, text: &str) {
        for (segment, newline) in split_lines(text) {
            let mut visible = segment;
            if newline {
                visible.push_str(NEWLINE_MARKER);
            }
            let width = visible.chars().count();
            let line = self.grid.expected_cursor();
            self.append(Side::Expected, line, Decoration::Inserted, &visible);
            self.append(Side::Actual, line, Decoration::Padding, &self.padding(width));
            self.grid.mark_unequal(line);
            if newline {
                self.close_line(Side::Expected, line);
                self.grid.end_expected_line();
            }
        }
    }

    fn flush(&mut self) {
        self.grid.strip_trailing_eos();
        for line in 0..self.actual_open.len() {
            self.close_line(Side::Actual, line);
        }
        for line in 0..self.expected_open.len() {
            self.close_line(Side::Expected, line);
        }
        self.grid.seal();
    }

    fn actual_lines(&self) -> &[String] {
        self.grid.actual_lines()
    }

    fn expected_lines(&self) -> &[String] {
        self.grid.expected_lines()
    }

    fn diff_lines(&self) -> &[String] {
        self.grid.marker_lines()
    }

    fn equal_lines(&self) -> &[bool] {
        self.grid.equal_lines()
    }

    fn padding_marker(&self) -> char {
        self.padding
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mismatch_diff::EOS_MARKER;

    #[test]
    fn spans_share_one_escape_sequence_per_decoration_run() {
        let mut writer = ColorWriter::new(TerminalEncoding::Xterm16Colors);
        writer.write_equal("ab");
        writer.write_equal("cd");
        writer.write_deleted("x");
        writer.write_equal(EOS_MARKER);
        writer.flush();
        let actual = &writer.actual_lines()[0];
        // equal run ("ab" + "cd") opens gray once, the deletion switches
        // once, and the trailing equal switches back.
        assert_eq!(
            actual,
            "\u{1b}[90mabcd\u{1b}[0m\u{1b}[37;1;41mx\u{1b}[0m\u{1b}[90m\u{1b}[0m"
        );
    }

    #[test]
    fn padding_uses_a_visible_filler() {
        let mut writer = ColorWriter::new(TerminalEncoding::Xterm16Colors);
        writer.write_deleted("ab");
        writer.write_equal(EOS_MARKER);
        writer.flush();
        let expected = &writer.expected_lines()[0];
        assert!(expected.contains("//"));
        assert!(!expected.contains("ab"));
    }

    #[test]
    fn color_writers_emit_no_marker_row() {
        let mut writer = ColorWriter::new(TerminalEncoding::Rgb888Colors);
        writer.write_equal("same");
        writer.write_equal(EOS_MARKER);
        writer.flush();
        assert!(writer.diff_lines().is_empty());
        assert_eq!(writer.equal_lines(), [true]);
    }

    #[test]
    fn eight_color_palette_leaves_equal_text_undecorated() {
        let mut writer = ColorWriter::new(TerminalEncoding::Xterm8Colors);
        writer.write_equal("same");
        writer.write_equal(EOS_MARKER);
        writer.flush();
        assert_eq!(writer.actual_lines(), ["same"]);
    }

    #[test]
    fn every_open_decoration_is_closed_by_flush() {
        let mut writer = ColorWriter::new(TerminalEncoding::Xterm256Colors);
        writer.write_deleted("gone\nand");
        writer.write_inserted("here");
        writer.write_equal(EOS_MARKER);
        writer.flush();
        for line in writer.actual_lines().iter().chain(writer.expected_lines()) {
            let opens = line.matches(ANSI_PREFIX).count();
            let resets = line.matches(RESET).count();
            assert!(
                opens == 0 || line.ends_with(RESET) || opens == resets,
                "unbalanced decoration in {line:?}"
            );
        }
    }

    #[test]
    #[should_panic(expected = "may not be blank")]
    fn blank_padding_marker_is_rejected() {
        let _ = ColorWriter::with_padding(TerminalEncoding::Xterm16Colors, ' ');
    }

    #[test]
    #[should_panic(expected = "already flushed")]
    fn write_after_flush_panics() {
        let mut writer = ColorWriter::new(TerminalEncoding::Xterm16Colors);
        writer.flush();
        writer.write_inserted("late");
    }
}
