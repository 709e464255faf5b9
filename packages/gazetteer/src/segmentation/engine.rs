//! Segmenter that splits compound neighborhood names using a rule chain.

use super::config::create_finnish_rule_chain;
use super::registry::RuleChain;
use super::types::{split_segments, AlignmentPolicy};
use crate::types::Neighborhood;

/// Splits hyphenated neighborhood names into aligned neighborhoods.
///
/// Both language renderings are tokenized independently with the same rule
/// chain, then paired by position according to the [`AlignmentPolicy`].
#[derive(Debug)]
pub struct Segmenter {
    rules: RuleChain,
    alignment: AlignmentPolicy,
}

impl Segmenter {
    /// Create a segmenter from a rule chain and an alignment policy.
    #[must_use]
    pub fn new(rules: RuleChain, alignment: AlignmentPolicy) -> Self {
        Self { rules, alignment }
    }

    /// Segmenter with the Finnish vocabulary and padded alignment.
    #[must_use]
    pub fn finnish() -> Self {
        Self::new(create_finnish_rule_chain(), AlignmentPolicy::default())
    }

    /// Replace the alignment policy.
    #[must_use]
    pub fn with_alignment(mut self, alignment: AlignmentPolicy) -> Self {
        self.alignment = alignment;
        self
    }

    /// Tokenize one name into its constituent place names.
    ///
    /// Merged tokens are slices of the input, so inner spacing is preserved
    /// ("Itä- ja Keski-Pasila" stays one token, verbatim).
    #[must_use]
    pub fn tokenize<'a>(&self, name: &'a str) -> Vec<&'a str> {
        let segments = split_segments(name);
        let mut tokens = Vec::with_capacity(segments.len());
        let mut cursor = 0;

        while cursor < segments.len() {
            let remaining = segments.len() - cursor;
            let span = match self.rules.first_match(&segments, cursor) {
                Some((rule, span)) => {
                    tracing::trace!(
                        rule,
                        segment = segments[cursor].text,
                        span,
                        "Merge rule fired"
                    );
                    span.clamp(1, remaining)
                }
                None => 1,
            };

            let first = &segments[cursor];
            let last = &segments[cursor + span - 1];
            tokens.push(&name[first.start..last.end()]);
            cursor += span;
        }

        tokens
    }

    /// Split a neighborhood into one neighborhood per token.
    ///
    /// Names without a hyphen are returned as-is. The result is never empty
    /// and every element keeps the input's postal code.
    #[must_use]
    pub fn segment(&self, neighborhood: Neighborhood) -> Vec<Neighborhood> {
        if !neighborhood.name_fi.contains('-') {
            return vec![neighborhood];
        }

        let tokens_fi = self.tokenize(&neighborhood.name_fi);
        if tokens_fi.is_empty() {
            return vec![neighborhood];
        }

        let tokens_sv = neighborhood
            .name_sv
            .as_deref()
            .map(|name| self.tokenize(name))
            .unwrap_or_default();

        if tokens_fi.len() != tokens_sv.len() {
            tracing::debug!(
                zip = %neighborhood.zip,
                name_fi = %neighborhood.name_fi,
                name_sv = ?neighborhood.name_sv,
                fi_tokens = tokens_fi.len(),
                sv_tokens = tokens_sv.len(),
                policy = ?self.alignment,
                "Token count mismatch between languages"
            );
            if self.alignment == AlignmentPolicy::KeepWhole {
                return vec![neighborhood];
            }
        }

        tokens_fi
            .iter()
            .enumerate()
            .map(|(i, name_fi)| Neighborhood {
                name_fi: (*name_fi).to_string(),
                name_sv: tokens_sv.get(i).map(|name| (*name).to_string()),
                zip: neighborhood.zip.clone(),
            })
            .collect()
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::finnish()
    }
}
