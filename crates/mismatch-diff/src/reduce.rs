//! Collapses words containing multiple small edits into a single
//! delete/insert pair.
//!
//! Per-codepoint edit scripts are myopic: comparing `"word"` to `"world"`
//! yields equal/insert/equal runs that render as a word with letters
//! sprinkled through it. Readers parse whole-word substitutions faster, so
//! any word whose edits fail the thresholds in [`keep_split`] is rewritten
//! as "delete the actual word, insert the expected word".

use crate::delta::{Chunk, Delta};

/// Number of deltas a word must span before collapsing is considered.
const MIN_DELTAS_PER_WORD: usize = 2;
/// A word whose unequal deltas all have at least this many codepoints
/// stays split.
const SHORT_DELTA_THRESHOLD: usize = 3;
/// A word at least this long stays split even with short unequal deltas.
const LONG_WORD_THRESHOLD: usize = 5;
/// Unequal deltas tolerated before a word is always collapsed.
const MAX_UNEQUAL_DELTAS: usize = 2;

/// A word boundary: the start and end of a delimiter run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct DelimiterRun {
    start: usize,
    end: usize,
}

/// Finds the first word delimiter in `text` at or after `from`.
///
/// Delimiters are runs of Unicode space separators, `\r\n`, a lone `\r` or
/// `\n`, or a single punctuation codepoint from
/// `. [ ] ( ) { } / \ * + - # : ;`.
fn find_delimiter(text: &[char], from: usize) -> Option<DelimiterRun> {
    let mut i = from;
    while i < text.len() {
        let c = text[i];
        if is_space_separator(c) {
            let start = i;
            while i < text.len() && is_space_separator(text[i]) {
                i += 1;
            }
            return Some(DelimiterRun { start, end: i });
        }
        if c == '\r' {
            let end = if text.get(i + 1) == Some(&'\n') {
                i + 2
            } else {
                i + 1
            };
            return Some(DelimiterRun { start: i, end });
        }
        if c == '\n' || is_punctuation_delimiter(c) {
            return Some(DelimiterRun { start: i, end: i + 1 });
        }
        i += 1;
    }
    None
}

/// Finds the last word delimiter in `text`.
fn last_delimiter(text: &[char]) -> Option<DelimiterRun> {
    let mut found = None;
    let mut from = 0;
    while let Some(run) = find_delimiter(text, from) {
        found = Some(run);
        from = run.end.max(run.start + 1);
    }
    found
}

/// Unicode `Zs` (space separator) category.
fn is_space_separator(c: char) -> bool {
    matches!(
        c,
        ' ' | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

fn is_punctuation_delimiter(c: char) -> bool {
    matches!(
        c,
        '.' | '[' | ']' | '(' | ')' | '{' | '}' | '/' | '\\' | '*' | '+' | '-' | '#' | ':' | ';'
    )
}

/// Rewrites `deltas` in place, collapsing noisy words.
///
/// Written for scripts produced from inputs terminated with
/// [`EOS_MARKER`](crate::EOS_MARKER): the delimiter it carries usually
/// ends the final word. A script ending in an unequal delta treats the
/// end of the list as the final word boundary instead.
pub fn reduce_word_deltas(deltas: &mut Vec<Delta>) {
    if deltas.len() < MIN_DELTAS_PER_WORD {
        return;
    }
    let mut reducer = WordReducer {
        deltas,
        start_delta: 0,
        end_delta: 0,
        start_of_word: 0,
        end_of_word: 0,
        start_of_next_word: 0,
    };
    reducer.run();
}

/// Walks the script one word at a time.
///
/// A word starts after the last delimiter of the delta at `start_delta`
/// and ends at the first delimiter found inside a later equal delta.
/// Offsets `start_of_word` and `end_of_word` index into the source
/// codepoints of the start and end deltas respectively.
struct WordReducer<'a> {
    deltas: &'a mut Vec<Delta>,
    start_delta: usize,
    end_delta: usize,
    start_of_word: usize,
    end_of_word: usize,
    start_of_next_word: usize,
}

impl WordReducer<'_> {
    fn run(&mut self) {
        self.find_first_word();
        loop {
            self.find_end_of_word();
            self.collapse_if_noisy();
            if !self.find_next_word() {
                return;
            }
        }
    }

    fn find_first_word(&mut self) {
        self.start_delta = 0;
        let source = &self.deltas[0].source().data;
        self.start_of_word = last_delimiter(source).map_or(0, |run| run.end);
    }

    /// Scans forward for an equal delta containing a delimiter. The
    /// terminator appended before diffing normally supplies one, but a
    /// value whose own text matches the terminator can leave the script
    /// ending in an unequal delta; the word then runs to the end of the
    /// list.
    fn find_end_of_word(&mut self) {
        for i in self.start_delta + 1..self.deltas.len() {
            let delta = &self.deltas[i];
            if !delta.is_equal() {
                continue;
            }
            if let Some(run) = find_delimiter(&delta.source().data, 0) {
                self.end_delta = i;
                self.end_of_word = run.start;
                self.start_of_next_word = run.end;
                return;
            }
        }
        self.end_delta = self.deltas.len() - 1;
        let len = self.deltas[self.end_delta].source().len();
        self.end_of_word = len;
        self.start_of_next_word = len;
    }

    /// Decides whether the current word's deltas survive as-is.
    fn keep_split(&self) -> bool {
        let span = &self.deltas[self.start_delta..=self.end_delta];
        if span.len() < MIN_DELTAS_PER_WORD {
            return true;
        }
        unequal_deltas(span) <= MAX_UNEQUAL_DELTAS
            && (self.shortest_delta(span) >= SHORT_DELTA_THRESHOLD
                || self.longest_word(span) >= LONG_WORD_THRESHOLD)
    }

    /// Length of the shortest unequal delta in the word.
    fn shortest_delta(&self, span: &[Delta]) -> usize {
        span.iter()
            .filter_map(|delta| match delta {
                Delta::Equal { .. } => None,
                Delta::Delete { source, .. } => Some(source.len()),
                Delta::Insert { target, .. } => Some(target.len()),
                Delta::Change { source, target } => Some(source.len().min(target.len())),
            })
            .min()
            .unwrap_or(usize::MAX)
    }

    /// The word's length on its longer side, excluding the text before
    /// `start_of_word` and after `end_of_word`.
    fn longest_word(&self, span: &[Delta]) -> usize {
        let mut source_len = 0;
        let mut target_len = 0;
        for delta in span {
            match delta {
                Delta::Equal { source, target } | Delta::Change { source, target } => {
                    source_len += source.len();
                    target_len += target.len();
                }
                Delta::Delete { source, .. } => source_len += source.len(),
                Delta::Insert { target, .. } => target_len += target.len(),
            }
        }
        let last_source_len = span[span.len() - 1].source().len();
        source_len
            .max(target_len)
            .saturating_sub(self.start_of_word)
            .saturating_sub(last_source_len - self.start_of_next_word)
    }

    /// Replaces the word's deltas with `[prefix?, delete, insert,
    /// suffix?]` when the word is too noisy to read split up.
    fn collapse_if_noisy(&mut self) {
        if self.keep_split() {
            return;
        }
        let mut actual_word: Vec<char> = Vec::new();
        let mut expected_word: Vec<char> = Vec::new();
        let mut replacement: Vec<Delta> = Vec::new();

        // Start delta: everything before the word stays untouched.
        let start = self.deltas[self.start_delta].clone();
        let source = &start.source().data;
        actual_word.extend_from_slice(&source[self.start_of_word..]);
        let expected_prefix_len;
        if start.is_equal() {
            expected_word.extend_from_slice(&source[self.start_of_word..]);
            expected_prefix_len = self.start_of_word;
        } else {
            expected_word.extend_from_slice(&start.target().data);
            expected_prefix_len = 0;
        }
        if self.start_of_word > 0 {
            let before_actual = source[..self.start_of_word].to_vec();
            let before_expected = start.target().data[..expected_prefix_len].to_vec();
            replacement.push(start.with_chunks(
                Chunk::new(start.source().position, before_actual),
                Chunk::new(start.target().position, before_expected),
            ));
        }

        // Middle deltas are absorbed whole.
        for delta in &self.deltas[self.start_delta + 1..self.end_delta] {
            actual_word.extend_from_slice(&delta.source().data);
            if delta.is_equal() {
                expected_word.extend_from_slice(&delta.source().data);
            } else {
                expected_word.extend_from_slice(&delta.target().data);
            }
        }

        // End delta: the word stops at the delimiter. A non-equal end
        // delta only occurs when the word runs to the end of the list,
        // so its target is absorbed whole; `end_of_word` indexes source
        // codepoints and must not be used to slice the target.
        let end = self.deltas[self.end_delta].clone();
        let end_source = &end.source().data;
        actual_word.extend_from_slice(&end_source[..self.end_of_word]);
        if end.is_equal() {
            expected_word.extend_from_slice(&end_source[..self.end_of_word]);
        } else {
            expected_word.extend_from_slice(&end.target().data);
        }

        let actual_start = start.source().position + self.start_of_word;
        let expected_start = start.target().position + expected_prefix_len;
        let after_actual = actual_start + actual_word.len();
        replacement.push(Delta::Delete {
            source: Chunk::new(actual_start, actual_word),
            target: Chunk::empty(expected_start),
        });
        replacement.push(Delta::Insert {
            source: Chunk::empty(after_actual),
            target: Chunk::new(expected_start, expected_word),
        });
        if self.end_of_word < end_source.len() {
            // Only an equal end delta can carry a suffix: the word ends
            // at a delimiter found inside it, so source and target are
            // identical and the offset is valid on both sides.
            replacement.push(end.with_chunks(
                Chunk::new(
                    end.source().position + self.end_of_word,
                    end_source[self.end_of_word..].to_vec(),
                ),
                Chunk::new(
                    end.target().position + self.end_of_word,
                    end.target().data[self.end_of_word..].to_vec(),
                ),
            ));
        }

        // The replacement may be shorter or longer than the span it
        // replaces; either way the end delta lands at its tail.
        let new_len = replacement.len();
        self.deltas
            .splice(self.start_delta..=self.end_delta, replacement);
        self.end_delta = self.start_delta + new_len - 1;
        // Offsets into the end delta shift when its prefix is absorbed.
        self.start_of_next_word -= self.end_of_word;
    }

    fn find_next_word(&mut self) -> bool {
        self.start_delta = self.end_delta;
        if self.start_delta == self.deltas.len() - 1 {
            return false;
        }
        let delta = &self.deltas[self.start_delta];
        if delta.is_equal() {
            self.start_of_word = last_delimiter(&delta.source().data).map_or(0, |run| run.end);
        } else {
            self.start_of_word = 0;
        }
        true
    }
}

fn unequal_deltas(span: &[Delta]) -> usize {
    span.iter()
        .map(|delta| match delta {
            Delta::Equal { .. } => 0,
            Delta::Delete { .. } | Delta::Insert { .. } => 1,
            Delta::Change { .. } => 2,
        })
        .sum()
}
