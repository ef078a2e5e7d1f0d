//! Plain-text writer with an explicit diff-marker row.

use mismatch_diff::NEWLINE_MARKER;

use crate::grid::LineGrid;
use crate::writer::{split_lines, DiffWriter, DIFF_DELETE, DIFF_EQUAL, DIFF_INSERT, TEXT_PADDING};

/// Renders the diff without escape sequences.
///
/// Each line of actual/expected text is accompanied by a marker row: `=`
/// under equal codepoints, `-` under deleted ones, `+` under inserted
/// ones, spaces elsewhere. Embedded newlines render as a visible
/// [`NEWLINE_MARKER`] before the line breaks.
pub struct TextOnlyWriter {
    grid: LineGrid,
}

impl TextOnlyWriter {
    pub fn new() -> Self {
        Self {
            grid: LineGrid::new(true),
        }
    }

    fn padding(width: usize) -> String {
        TEXT_PADDING.to_string().repeat(width)
    }
}

impl Default for TextOnlyWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffWriter for TextOnlyWriter {
    fn write_equal(&mut self, text: &str) {
        for (segment, newline) in split_lines(text) {
            let mut visible = segment;
            if newline {
                visible.push_str(NEWLINE_MARKER);
            }
            let width = visible.chars().count();
            if self.grid.aligned() {
                let line = self.grid.actual_cursor();
                self.grid.append_actual_at(line, &visible);
                self.grid.append_expected_at(line, &visible);
                self.grid
                    .append_marker_at(line, &DIFF_EQUAL.to_string().repeat(width));
            } else {
                // The sides are on different lines: each receives the
                // text on its own line and padding on the other side's,
                // and neither line can be called equal anymore.
                let actual_line = self.grid.actual_cursor();
                let expected_line = self.grid.expected_cursor();
                let padding = Self::padding(width);
                self.grid.append_actual_at(actual_line, &visible);
                self.grid.append_expected_at(actual_line, &padding);
                self.grid.append_expected_at(expected_line, &visible);
                self.grid.append_actual_at(expected_line, &padding);
                self.grid.append_marker_at(actual_line, &padding);
                self.grid.append_marker_at(expected_line, &padding);
                self.grid.mark_unequal(actual_line);
                self.grid.mark_unequal(expected_line);
            }
            if newline {
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
            self.grid.append_actual_at(line, &visible);
            self.grid.append_expected_at(line, &Self::padding(width));
            self.grid
                .append_marker_at(line, &DIFF_DELETE.to_string().repeat(width));
            self.grid.mark_unequal(line);
            if newline {
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
            self.grid.append_expected_at(line, &visible);
            self.grid.append_actual_at(line, &Self::padding(width));
            self.grid
                .append_marker_at(line, &DIFF_INSERT.to_string().repeat(width));
            self.grid.mark_unequal(line);
            if newline {
                self.grid.end_expected_line();
            }
        }
    }

    fn flush(&mut self) {
        self.grid.strip_trailing_eos();
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
        TEXT_PADDING
    }
}
