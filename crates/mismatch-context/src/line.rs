//! One labeled line of failure-message context.

use std::fmt;

use serde::Serialize;

/// A `(name, value)` pair rendered as `name: value`.
///
/// An empty name means an unlabeled value line (blank separators and
/// elision markers use this form).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ContextLine {
    name: String,
    value: String,
}

impl ContextLine {
    /// # Panics
    ///
    /// Panics if `name` contains a colon, which would corrupt the
    /// `name: value` output format.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        assert!(
            !name.contains(':'),
            "context-line name {name:?} may not contain a colon"
        );
        Self {
            name,
            value: value.into(),
        }
    }

    /// A line with no label.
    pub fn unlabeled(value: impl Into<String>) -> Self {
        Self::new(String::new(), value)
    }

    /// A blank separator line.
    pub fn blank() -> Self {
        Self::unlabeled(String::new())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ContextLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            f.write_str(&self.value)
        } else {
            write!(f, "{}: {}", self.name, self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labeled_lines_render_name_colon_value() {
        let line = ContextLine::new("actual", "\"foo\"");
        assert_eq!(line.to_string(), "actual: \"foo\"");
    }

    #[test]
    fn unlabeled_lines_render_value_only() {
        assert_eq!(ContextLine::unlabeled("[...]").to_string(), "[...]");
        assert_eq!(ContextLine::blank().to_string(), "");
    }

    #[test]
    #[should_panic(expected = "may not contain a colon")]
    fn colon_in_name_is_rejected() {
        let _ = ContextLine::new("actual:", "value");
    }
}
