//! Merge rules deciding how many segments form one token.

use std::collections::HashSet;

use super::types::{normalize_word, Segment};

/// A rule that may merge the segment at `cursor` with the ones following it.
///
/// Returns the number of segments consumed (at least 2 when the rule fires),
/// or `None` when the rule does not apply at this position.
pub trait MergeRule: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Decide the span starting at `cursor`.
    fn span(&self, segments: &[Segment<'_>], cursor: usize) -> Option<usize>;
}

fn word_set(words: impl IntoIterator<Item = impl AsRef<str>>) -> HashSet<String> {
    words
        .into_iter()
        .map(|w| normalize_word(w.as_ref()))
        .collect()
}

/// Merges "X- ja Y-Z" into one token.
///
/// Fires when the next segment begins with a conjunction word, consuming the
/// current segment, the conjunction segment and the one after it.
#[derive(Debug, Clone)]
pub struct DualConjunctionRule {
    conjunctions: HashSet<String>,
}

impl DualConjunctionRule {
    #[must_use]
    pub fn new(conjunctions: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self {
            conjunctions: word_set(conjunctions),
        }
    }

    /// Plain prefix test: "jalkala" counts as beginning with "ja".
    fn begins_with_conjunction(&self, key: &str) -> bool {
        self.conjunctions
            .iter()
            .any(|conj| key.starts_with(conj.as_str()))
    }
}

impl MergeRule for DualConjunctionRule {
    fn name(&self) -> &'static str {
        "dual-conjunction"
    }

    fn span(&self, segments: &[Segment<'_>], cursor: usize) -> Option<usize> {
        let next = segments.get(cursor + 1)?;
        if !self.begins_with_conjunction(next.key()) {
            return None;
        }

        // A trailing conjunction has nothing after it to absorb
        if segments.get(cursor + 2).is_some() {
            Some(3)
        } else {
            Some(2)
        }
    }
}

/// Merges a qualifier prefix such as "Iso" or "Itä" with the following segment.
#[derive(Debug, Clone)]
pub struct KnownPrefixRule {
    prefixes: HashSet<String>,
}

impl KnownPrefixRule {
    #[must_use]
    pub fn new(prefixes: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self {
            prefixes: word_set(prefixes),
        }
    }
}

impl MergeRule for KnownPrefixRule {
    fn name(&self) -> &'static str {
        "known-prefix"
    }

    fn span(&self, segments: &[Segment<'_>], cursor: usize) -> Option<usize> {
        segments.get(cursor + 1)?;
        let current = segments.get(cursor)?;
        self.prefixes.contains(current.key()).then_some(2)
    }
}

/// Merges a segment with a following suffix that never stands alone ("Aho").
///
/// Matching is case-sensitive; list every casing that occurs.
#[derive(Debug, Clone)]
pub struct KnownSuffixRule {
    suffixes: HashSet<String>,
}

impl KnownSuffixRule {
    #[must_use]
    pub fn new(suffixes: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        Self {
            suffixes: word_set(suffixes),
        }
    }
}

impl MergeRule for KnownSuffixRule {
    fn name(&self) -> &'static str {
        "known-suffix"
    }

    fn span(&self, segments: &[Segment<'_>], cursor: usize) -> Option<usize> {
        let next = segments.get(cursor + 1)?;
        self.suffixes.contains(next.key()).then_some(2)
    }
}

/// Treats a following segment that does not start uppercase as a continuation,
/// e.g. "Sairaala-alue".
///
/// Digits and other caseless characters count as continuations too.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaseHeuristicRule;

impl MergeRule for CaseHeuristicRule {
    fn name(&self) -> &'static str {
        "case-heuristic"
    }

    fn span(&self, segments: &[Segment<'_>], cursor: usize) -> Option<usize> {
        let next = segments.get(cursor + 1)?;
        let first = next.text.chars().next()?;
        (!first.is_uppercase()).then_some(2)
    }
}
