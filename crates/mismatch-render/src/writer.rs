//! The accumulation contract shared by all diff writers.

/// Marker character for equal codepoints on the plain-text diff line.
pub const DIFF_EQUAL: char = '=';
/// Marker character for codepoints present only in the actual value.
pub const DIFF_DELETE: char = '-';
/// Marker character for codepoints present only in the expected value.
pub const DIFF_INSERT: char = '+';
/// Padding marker used by the plain-text writer.
pub const TEXT_PADDING: char = ' ';

/// Accumulates one diff rendering.
///
/// A writer is sequential and single-use: call the `write_*` methods in
/// delta order, then [`flush`](DiffWriter::flush), then read the line
/// getters. Writing after the flush, or reading before it, is a
/// programming error and panics.
pub trait DiffWriter {
    /// Records text present in both values.
    fn write_equal(&mut self, text: &str);

    /// Records text present only in the actual value.
    fn write_deleted(&mut self, text: &str);

    /// Records text present only in the expected value.
    fn write_inserted(&mut self, text: &str);

    /// Seals the writer, making the line getters available.
    fn flush(&mut self);

    /// The rendered lines of the actual value.
    fn actual_lines(&self) -> &[String];

    /// The rendered lines of the expected value.
    fn expected_lines(&self) -> &[String];

    /// Per-line diff markers; empty for encodings that decorate the text
    /// itself instead.
    fn diff_lines(&self) -> &[String];

    /// Per-line equality flags.
    fn equal_lines(&self) -> &[bool];

    /// The filler character this writer uses to keep columns aligned.
    fn padding_marker(&self) -> char;
}

/// One line segment of a `write_*` payload: the text before a newline
/// and whether a newline followed it. `\r\n` counts as a single newline,
/// as do a lone `\r` and a lone `\n`.
pub(crate) fn split_lines(text: &str) -> Vec<(String, bool)> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                segments.push((std::mem::take(&mut current), true));
            }
            '\n' => segments.push((std::mem::take(&mut current), true)),
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        segments.push((current, false));
    }
    segments
}
