//! Line-buffer arena shared by the concrete writers.

use mismatch_diff::EOS_MARKER;

/// Parallel per-line buffers for the actual side, the expected side and
/// (for plain text) the diff-marker row, plus one cursor per side.
///
/// Lines are addressed by number, not by write order: a write can target
/// a line the cursor has already moved past, or one that does not exist
/// yet, and the arena grows all rows in lockstep so the parallel-length
/// invariant holds at all times. Equality flags default to `true` until a
/// writer marks a line unequal.
pub(crate) struct LineGrid {
    actual: Vec<String>,
    expected: Vec<String>,
    markers: Option<Vec<String>>,
    equal: Vec<bool>,
    actual_cursor: usize,
    expected_cursor: usize,
    sealed: bool,
}

impl LineGrid {
    pub(crate) fn new(with_markers: bool) -> Self {
        Self {
            actual: Vec::new(),
            expected: Vec::new(),
            markers: with_markers.then(Vec::new),
            equal: Vec::new(),
            actual_cursor: 0,
            expected_cursor: 0,
            sealed: false,
        }
    }

    fn assert_open(&self) {
        assert!(!self.sealed, "writer already flushed");
    }

    fn assert_sealed(&self) {
        assert!(self.sealed, "writer not flushed yet");
    }

    fn ensure_line(&mut self, line: usize) {
        let len = line + 1;
        if self.actual.len() >= len {
            return;
        }
        self.actual.resize_with(len, String::new);
        self.expected.resize_with(len, String::new);
        self.equal.resize(len, true);
        if let Some(markers) = &mut self.markers {
            markers.resize_with(len, String::new);
        }
    }

    pub(crate) fn actual_cursor(&self) -> usize {
        self.actual_cursor
    }

    pub(crate) fn expected_cursor(&self) -> usize {
        self.expected_cursor
    }

    /// Whether both sides are currently on the same line number.
    pub(crate) fn aligned(&self) -> bool {
        self.actual_cursor == self.expected_cursor
    }

    pub(crate) fn append_actual_at(&mut self, line: usize, text: &str) {
        self.assert_open();
        self.ensure_line(line);
        self.actual[line].push_str(text);
    }

    pub(crate) fn append_expected_at(&mut self, line: usize, text: &str) {
        self.assert_open();
        self.ensure_line(line);
        self.expected[line].push_str(text);
    }

    pub(crate) fn append_marker_at(&mut self, line: usize, text: &str) {
        self.assert_open();
        self.ensure_line(line);
        if let Some(markers) = &mut self.markers {
            markers[line].push_str(text);
        }
    }

    pub(crate) fn mark_unequal(&mut self, line: usize) {
        self.assert_open();
        self.ensure_line(line);
        self.equal[line] = false;
    }

    pub(crate) fn end_actual_line(&mut self) {
        self.assert_open();
        self.ensure_line(self.actual_cursor);
        self.actual_cursor += 1;
    }

    pub(crate) fn end_expected_line(&mut self) {
        self.assert_open();
        self.ensure_line(self.expected_cursor);
        self.expected_cursor += 1;
    }

    /// Removes the rendered end-of-string marker from the final line of
    /// each side, along with its marker-row columns.
    ///
    /// The terminator exists for the diff algorithm's benefit; readers
    /// never see it.
    pub(crate) fn strip_trailing_eos(&mut self) {
        self.assert_open();
        let a = self.actual_cursor;
        let e = self.expected_cursor;
        let stripped_actual = strip_eos(self.actual.get_mut(a));
        let stripped_expected = strip_eos(self.expected.get_mut(e));
        if let Some(markers) = &mut self.markers {
            let width = EOS_MARKER.chars().count();
            if stripped_actual {
                truncate_chars(&mut markers[a], width);
            }
            if stripped_expected && e != a {
                truncate_chars(&mut markers[e], width);
            }
        }
    }

    pub(crate) fn seal(&mut self) {
        self.assert_open();
        // A comparison always renders at least one line, even for a pair
        // of empty strings.
        self.ensure_line(self.actual_cursor.max(self.expected_cursor));
        self.sealed = true;
    }

    pub(crate) fn actual_lines(&self) -> &[String] {
        self.assert_sealed();
        &self.actual
    }

    pub(crate) fn expected_lines(&self) -> &[String] {
        self.assert_sealed();
        &self.expected
    }

    pub(crate) fn marker_lines(&self) -> &[String] {
        self.assert_sealed();
        self.markers.as_deref().unwrap_or(&[])
    }

    pub(crate) fn equal_lines(&self) -> &[bool] {
        self.assert_sealed();
        &self.equal
    }
}

fn strip_eos(line: Option<&mut String>) -> bool {
    match line {
        Some(line) if line.ends_with(EOS_MARKER) => {
            line.truncate(line.len() - EOS_MARKER.len());
            true
        }
        _ => false,
    }
}

fn truncate_chars(text: &mut String, count: usize) {
    for _ in 0..count {
        text.pop();
    }
}
