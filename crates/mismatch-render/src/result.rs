//! The sealed output of a diff rendering.

/// Parallel, read-only line vectors produced by a flushed writer.
///
/// `actual_lines`, `expected_lines` and `equal_lines` always have the
/// same length; `diff_lines` is either empty (color encodings) or the
/// same length again (plain text).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiffResult {
    actual_lines: Vec<String>,
    diff_lines: Vec<String>,
    expected_lines: Vec<String>,
    equal_lines: Vec<bool>,
}

impl DiffResult {
    /// # Panics
    ///
    /// Panics if the vectors violate the parallel-length invariant.
    pub fn new(
        actual_lines: Vec<String>,
        diff_lines: Vec<String>,
        expected_lines: Vec<String>,
        equal_lines: Vec<bool>,
    ) -> Self {
        assert_eq!(
            actual_lines.len(),
            expected_lines.len(),
            "actual and expected line counts differ"
        );
        assert_eq!(
            actual_lines.len(),
            equal_lines.len(),
            "equality flags out of step with lines"
        );
        assert!(
            diff_lines.is_empty() || diff_lines.len() == actual_lines.len(),
            "marker lines out of step with lines"
        );
        Self {
            actual_lines,
            diff_lines,
            expected_lines,
            equal_lines,
        }
    }

    pub fn actual_lines(&self) -> &[String] {
        &self.actual_lines
    }

    /// Per-line marker rows; empty when the encoding decorates text
    /// instead of rendering markers.
    pub fn diff_lines(&self) -> &[String] {
        &self.diff_lines
    }

    pub fn expected_lines(&self) -> &[String] {
        &self.expected_lines
    }

    pub fn equal_lines(&self) -> &[bool] {
        &self.equal_lines
    }

    /// Number of rendered lines.
    pub fn len(&self) -> usize {
        self.actual_lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actual_lines.is_empty()
    }
}
