//! Turns a pair of captured values into labeled context lines.

use mismatch_diff::NEWLINE_MARKER;
use mismatch_render::{DiffGenerator, DiffResult};
use tracing::debug;

use crate::config::DiffConfig;
use crate::line::ContextLine;
use crate::snapshot::ValueSnapshot;

/// Replaces elided runs of equal lines.
const ELISION_MARKER: &str = "[...]";
/// Label of the marker row in a group.
const DIFF_LABEL: &str = "diff";

/// Builds the context lines explaining one failed comparison.
///
/// ```
/// use mismatch_context::{ContextGenerator, DiffConfig, ValueSnapshot};
///
/// let lines = ContextGenerator::new(
///     DiffConfig::new(),
///     ValueSnapshot::string("hello world"),
///     ValueSnapshot::string("hello earth"),
/// )
/// .build();
/// assert_eq!(lines[1].name(), "actual");
/// assert_eq!(lines[2].name(), "diff");
/// assert_eq!(lines[3].name(), "expected");
/// ```
pub struct ContextGenerator {
    config: DiffConfig,
    actual_name: String,
    actual: ValueSnapshot,
    expected_name: String,
    expected: ValueSnapshot,
    expected_in_message: bool,
    compare_values: bool,
}

impl ContextGenerator {
    pub fn new(config: DiffConfig, actual: ValueSnapshot, expected: ValueSnapshot) -> Self {
        Self {
            config,
            actual_name: "actual".to_owned(),
            actual,
            expected_name: "expected".to_owned(),
            expected,
            expected_in_message: false,
            compare_values: true,
        }
    }

    pub fn actual_name(mut self, name: impl Into<String>) -> Self {
        self.actual_name = name.into();
        self
    }

    pub fn expected_name(mut self, name: impl Into<String>) -> Self {
        self.expected_name = name.into();
        self
    }

    /// The surrounding message already states the expected value, so the
    /// no-diff form omits it.
    pub fn expected_in_message(mut self) -> Self {
        self.expected_in_message = true;
        self
    }

    /// Show both values without comparing them.
    pub fn without_comparison(mut self) -> Self {
        self.compare_values = false;
        self
    }

    /// Assembles the context lines for a scalar pair.
    pub fn build(self) -> Vec<ContextLine> {
        if self.skips_diff() || self.actual.is_bool() || self.expected.is_bool() {
            return self.values_without_diff();
        }
        let generator = DiffGenerator::new(self.config.encoding);
        let result = generator.diff(self.actual.rendered(), self.expected.rendered());
        let lines = if result.len() == 1 {
            self.single_line(&result)
        } else {
            self.multi_line(&generator, &result)
        };
        debug!(lines = lines.len(), "assembled context");
        lines
    }

    /// Assembles context lines for parallel element lists. Elements are
    /// diffed pairwise; a missing element renders as empty and never
    /// compares equal. Runs of equal elements other than the first and
    /// last are elided like equal lines.
    pub fn build_lists(
        self,
        actual_elements: &[ValueSnapshot],
        expected_elements: &[ValueSnapshot],
    ) -> Vec<ContextLine> {
        if self.skips_diff() {
            return self.values_without_diff();
        }
        let generator = DiffGenerator::new(self.config.encoding);
        let count = actual_elements.len().max(expected_elements.len());
        let last = count.saturating_sub(1);
        let elements_equal = |i: usize| match (actual_elements.get(i), expected_elements.get(i)) {
            (Some(actual), Some(expected)) => actual == expected,
            _ => false,
        };
        let mut lines = Vec::new();
        let mut i = 0;
        while i < count {
            if i != 0 && i != last && elements_equal(i) {
                while i != last && elements_equal(i) {
                    i += 1;
                }
                lines.push(ContextLine::blank());
                lines.push(ContextLine::unlabeled(ELISION_MARKER));
                continue;
            }
            // A missing element renders as empty text under the bare
            // list name, without an index.
            let actual_text = actual_elements.get(i).map_or("", ValueSnapshot::rendered);
            let expected_text = expected_elements.get(i).map_or("", ValueSnapshot::rendered);
            let result = generator.diff(actual_text, expected_text);
            let actual_label = match actual_elements.get(i) {
                Some(_) => format!("{}[{i}]", self.actual_name),
                None => self.actual_name.clone(),
            };
            let expected_label = match expected_elements.get(i) {
                Some(_) => format!("{}[{i}]", self.expected_name),
                None => self.expected_name.clone(),
            };
            if result.len() == 1 {
                let unequal = !elements_equal(i);
                lines.push(ContextLine::blank());
                lines.push(ContextLine::new(&actual_label, &result.actual_lines()[0]));
                if unequal && !result.diff_lines().is_empty() {
                    lines.push(ContextLine::new(DIFF_LABEL, &result.diff_lines()[0]));
                }
                lines.push(ContextLine::new(&expected_label, &result.expected_lines()[0]));
            } else {
                self.push_groups(&generator, &result, &actual_label, &expected_label, &mut lines);
            }
            i += 1;
        }
        debug!(lines = lines.len(), elements = count, "assembled list context");
        lines
    }

    fn skips_diff(&self) -> bool {
        !self.config.diff_enabled || !self.compare_values
    }

    /// The no-diff form: at most the two raw values.
    fn values_without_diff(&self) -> Vec<ContextLine> {
        debug!(
            diff_enabled = self.config.diff_enabled,
            compare_values = self.compare_values,
            "assembling context without a diff"
        );
        let mut lines = vec![ContextLine::new(&self.actual_name, self.actual.rendered())];
        if !self.expected_in_message {
            lines.push(ContextLine::new(
                &self.expected_name,
                self.expected.rendered(),
            ));
        }
        lines
    }

    fn single_line(&self, result: &DiffResult) -> Vec<ContextLine> {
        let mut lines = vec![
            ContextLine::blank(),
            ContextLine::new(&self.actual_name, &result.actual_lines()[0]),
        ];
        if !result.equal_lines()[0] && !result.diff_lines().is_empty() {
            lines.push(ContextLine::new(DIFF_LABEL, &result.diff_lines()[0]));
        }
        lines.push(ContextLine::new(
            &self.expected_name,
            &result.expected_lines()[0],
        ));
        if self.actual.rendered() == self.expected.rendered() {
            self.push_equality_fallback(&mut lines);
        }
        lines
    }

    /// The rendered forms coincide even though the values differ; show
    /// the first discriminator that actually differs: type, then hash,
    /// then identity. When every tier agrees nothing is added.
    fn push_equality_fallback(&self, lines: &mut Vec<ContextLine>) {
        if self.actual.type_name() != self.expected.type_name() {
            lines.push(ContextLine::new(
                format!("{}.type", self.actual_name),
                self.actual.type_name(),
            ));
            lines.push(ContextLine::new(
                format!("{}.type", self.expected_name),
                self.expected.type_name(),
            ));
            return;
        }
        if let (Some(actual), Some(expected)) = (self.actual.hash(), self.expected.hash()) {
            if actual != expected {
                lines.push(ContextLine::new(
                    format!("{}.hash", self.actual_name),
                    actual.to_string(),
                ));
                lines.push(ContextLine::new(
                    format!("{}.hash", self.expected_name),
                    expected.to_string(),
                ));
                return;
            }
        }
        if self.actual.identity() != self.expected.identity() {
            lines.push(ContextLine::new(
                format!("{}.identity", self.actual_name),
                self.actual.identity().to_string(),
            ));
            lines.push(ContextLine::new(
                format!("{}.identity", self.expected_name),
                self.expected.identity().to_string(),
            ));
        }
    }

    fn multi_line(&self, generator: &DiffGenerator, result: &DiffResult) -> Vec<ContextLine> {
        let mut lines = Vec::new();
        self.push_groups(
            generator,
            result,
            &self.actual_name,
            &self.expected_name,
            &mut lines,
        );
        lines
    }

    /// Emits one group per retained line, eliding equal middles. Each
    /// side keeps its own line counter, advanced only by lines that
    /// contain a newline marker, so labels track logical lines rather
    /// than rendered rows.
    fn push_groups(
        &self,
        generator: &DiffGenerator,
        result: &DiffResult,
        actual_name: &str,
        expected_name: &str,
        lines: &mut Vec<ContextLine>,
    ) {
        let last = result.len() - 1;
        let mut actual_number = 0_usize;
        let mut expected_number = 0_usize;
        let mut i = 0;
        while i < result.len() {
            if i != 0 && i != last && result.equal_lines()[i] {
                while i != last && result.equal_lines()[i] {
                    advance(&result.actual_lines()[i], &mut actual_number);
                    advance(&result.expected_lines()[i], &mut expected_number);
                    i += 1;
                }
                lines.push(ContextLine::blank());
                lines.push(ContextLine::unlabeled(ELISION_MARKER));
                continue;
            }
            let actual_line = &result.actual_lines()[i];
            let expected_line = &result.expected_lines()[i];
            lines.push(ContextLine::blank());
            lines.push(ContextLine::new(
                label(generator, actual_name, actual_line, actual_number),
                actual_line,
            ));
            if !result.equal_lines()[i] && !result.diff_lines().is_empty() {
                lines.push(ContextLine::new(DIFF_LABEL, &result.diff_lines()[i]));
            }
            lines.push(ContextLine::new(
                label(generator, expected_name, expected_line, expected_number),
                expected_line,
            ));
            advance(actual_line, &mut actual_number);
            advance(expected_line, &mut expected_number);
            i += 1;
        }
    }
}

/// `name@N` for lines with content, bare `name` for padding-only lines.
fn label(generator: &DiffGenerator, name: &str, line: &str, number: usize) -> String {
    if generator.is_empty_line(line) {
        name.to_owned()
    } else {
        format!("{name}@{number}")
    }
}

fn advance(line: &str, counter: &mut usize) {
    if line.contains(NEWLINE_MARKER) {
        *counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;
    use std::hash::{Hash, Hasher};

    fn names(lines: &[ContextLine]) -> Vec<&str> {
        lines.iter().map(ContextLine::name).collect()
    }

    fn line_for<'a>(lines: &'a [ContextLine], name: &str) -> &'a ContextLine {
        lines
            .iter()
            .find(|line| line.name() == name)
            .unwrap_or_else(|| panic!("no line named {name:?}"))
    }

    #[test]
    fn booleans_bypass_the_differ() {
        let lines = ContextGenerator::new(
            DiffConfig::new(),
            ValueSnapshot::hashed(&true),
            ValueSnapshot::hashed(&false),
        )
        .build();
        assert_eq!(names(&lines), ["actual", "expected"]);
        assert_eq!(lines[0].value(), "true");
        assert_eq!(lines[1].value(), "false");
    }

    #[test]
    fn disabled_diff_shows_raw_values() {
        let lines = ContextGenerator::new(
            DiffConfig::new().without_diff(),
            ValueSnapshot::string("foo"),
            ValueSnapshot::string("bar"),
        )
        .build();
        assert_eq!(names(&lines), ["actual", "expected"]);
    }

    #[test]
    fn expected_in_message_drops_the_expected_line() {
        let lines = ContextGenerator::new(
            DiffConfig::new().without_diff(),
            ValueSnapshot::string("foo"),
            ValueSnapshot::string("bar"),
        )
        .expected_in_message()
        .build();
        assert_eq!(names(&lines), ["actual"]);
    }

    #[test]
    fn single_line_diff_emits_separator_actual_diff_expected() {
        let lines = ContextGenerator::new(
            DiffConfig::new(),
            ValueSnapshot::string("foo"),
            ValueSnapshot::string("bar"),
        )
        .build();
        assert_eq!(names(&lines), ["", "actual", "diff", "expected"]);
        assert_eq!(lines[1].value(), "\"foo   \"");
        assert_eq!(lines[2].value(), "=---+++=");
        assert_eq!(lines[3].value(), "\"   bar\"");
    }

    #[test]
    fn equal_single_line_omits_the_diff_row() {
        // Different types, same rendering: the diff row would be all
        // equal markers, so it is skipped in favor of the type fallback.
        let lines = ContextGenerator::new(
            DiffConfig::new(),
            ValueSnapshot::hashed(&1_u8),
            ValueSnapshot::hashed(&1_u16),
        )
        .build();
        assert_eq!(
            names(&lines),
            ["", "actual", "expected", "actual.type", "expected.type"]
        );
        assert_eq!(line_for(&lines, "actual.type").value(), "u8");
        assert_eq!(line_for(&lines, "expected.type").value(), "u16");
    }

    struct Opaque(u32);

    impl Hash for Opaque {
        fn hash<H: Hasher>(&self, state: &mut H) {
            self.0.hash(state);
        }
    }

    impl fmt::Debug for Opaque {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("Opaque")
        }
    }

    #[test]
    fn hash_fallback_explains_same_type_same_rendering() {
        let lines = ContextGenerator::new(
            DiffConfig::new(),
            ValueSnapshot::hashed(&Opaque(1)),
            ValueSnapshot::hashed(&Opaque(2)),
        )
        .build();
        assert!(names(&lines).contains(&"actual.hash"));
        assert_ne!(
            line_for(&lines, "actual.hash").value(),
            line_for(&lines, "expected.hash").value()
        );
    }

    #[test]
    fn identity_fallback_is_the_last_resort() {
        let first = Opaque(1);
        let second = Opaque(1);
        let lines = ContextGenerator::new(
            DiffConfig::new(),
            ValueSnapshot::new(&first),
            ValueSnapshot::new(&second),
        )
        .build();
        assert!(names(&lines).contains(&"actual.identity"));
        assert!(names(&lines).contains(&"expected.identity"));
    }

    #[test]
    fn matching_identities_add_no_fallback_lines() {
        // NaN renders the same on both sides and carries no hash, yet
        // both snapshots point at the one value. Every tier agrees, so
        // the fallback has nothing to report.
        let value = f64::NAN;
        let lines = ContextGenerator::new(
            DiffConfig::new(),
            ValueSnapshot::new(&value),
            ValueSnapshot::new(&value),
        )
        .build();
        assert_eq!(names(&lines), ["", "actual", "expected"]);
    }

    #[test]
    fn equal_middles_are_elided_between_groups() {
        let lines = ContextGenerator::new(
            DiffConfig::new(),
            ValueSnapshot::string("1\n2\n3\n4\n5"),
            ValueSnapshot::string("1\n2\n9\n4\n5"),
        )
        .build();
        assert_eq!(
            names(&lines),
            [
                "", "actual@0", "expected@0", //
                "", "", //
                "", "actual@2", "diff", "expected@2", //
                "", "", //
                "", "actual@4", "expected@4",
            ]
        );
        assert_eq!(lines[4].value(), ELISION_MARKER);
        assert_eq!(lines[10].value(), ELISION_MARKER);
        assert_eq!(line_for(&lines, "actual@0").value(), "\"1\\n");
        assert_eq!(line_for(&lines, "actual@2").value(), "3 \\n");
        assert_eq!(line_for(&lines, "diff").value(), "-+==");
        assert_eq!(line_for(&lines, "expected@2").value(), " 9\\n");
        assert_eq!(line_for(&lines, "expected@4").value(), "5\"");
    }

    #[test]
    fn single_equal_run_yields_one_elision_marker() {
        let lines = ContextGenerator::new(
            DiffConfig::new(),
            ValueSnapshot::string("a\nx\nx\nx\nb"),
            ValueSnapshot::string("c\nx\nx\nx\nd"),
        )
        .build();
        let elisions = lines
            .iter()
            .filter(|line| line.value() == ELISION_MARKER)
            .count();
        assert_eq!(elisions, 1);
    }

    #[test]
    fn list_elements_diff_pairwise_with_elision() {
        let actual: Vec<ValueSnapshot> =
            [1, 2, 3, 4, 5].iter().map(ValueSnapshot::hashed).collect();
        let expected: Vec<ValueSnapshot> =
            [1, 2, 9, 4, 5].iter().map(ValueSnapshot::hashed).collect();
        let lines = ContextGenerator::new(
            DiffConfig::new(),
            ValueSnapshot::hashed(&[1, 2, 3, 4, 5]),
            ValueSnapshot::hashed(&[1, 2, 9, 4, 5]),
        )
        .build_lists(&actual, &expected);
        assert_eq!(
            names(&lines),
            [
                "", "actual[0]", "expected[0]", //
                "", "", //
                "", "actual[2]", "diff", "expected[2]", //
                "", "", //
                "", "actual[4]", "expected[4]",
            ]
        );
        assert_eq!(line_for(&lines, "actual[2]").value(), "3 ");
        assert_eq!(line_for(&lines, "diff").value(), "-+");
        assert_eq!(line_for(&lines, "expected[2]").value(), " 9");
    }

    #[test]
    fn missing_list_elements_render_empty_and_never_equal() {
        let actual: Vec<ValueSnapshot> = [1, 2].iter().map(ValueSnapshot::hashed).collect();
        let expected: Vec<ValueSnapshot> = [1].iter().map(ValueSnapshot::hashed).collect();
        let lines = ContextGenerator::new(
            DiffConfig::new(),
            ValueSnapshot::hashed(&[1, 2]),
            ValueSnapshot::hashed(&[1]),
        )
        .build_lists(&actual, &expected);
        assert_eq!(line_for(&lines, "actual[1]").value(), "2");
        // the missing side renders as bare padding under the unindexed name
        assert!(!names(&lines).contains(&"expected[1]"));
        assert_eq!(line_for(&lines, "expected").value(), " ");
    }

    proptest::proptest! {
        // Whatever the inputs, diffed context opens with a blank
        // separator and every label stays parseable as `name: value`.
        #[test]
        fn labels_never_contain_colons(
            actual in "[a-z \n]{0,20}",
            expected in "[a-z \n]{0,20}",
        ) {
            let lines = ContextGenerator::new(
                DiffConfig::new(),
                ValueSnapshot::string(&actual),
                ValueSnapshot::string(&expected),
            )
            .build();
            proptest::prop_assert_eq!(&lines[0], &ContextLine::blank());
            for line in &lines {
                proptest::prop_assert!(!line.name().contains(':'));
            }
        }
    }

    #[test]
    fn multi_line_list_elements_get_per_line_labels() {
        let actual = [ValueSnapshot::string("foo\nbar")];
        let expected = [ValueSnapshot::string("bar\nfoo")];
        let lines = ContextGenerator::new(
            DiffConfig::new(),
            ValueSnapshot::string("foo\nbar"),
            ValueSnapshot::string("bar\nfoo"),
        )
        .build_lists(&actual, &expected);
        let group_names = names(&lines);
        assert!(group_names.iter().any(|name| name.starts_with("actual[0]@")));
        assert!(group_names
            .iter()
            .any(|name| name.starts_with("expected[0]@")));
    }
}
