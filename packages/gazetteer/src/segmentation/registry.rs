//! Ordered rule chain for compound name segmentation.

use std::fmt;

use super::rule::MergeRule;
use super::types::Segment;

/// Merge rules evaluated in registration order; the first rule that fires wins.
pub struct RuleChain {
    rules: Vec<Box<dyn MergeRule>>,
}

impl RuleChain {
    /// Create a new empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append a rule at the lowest priority.
    pub fn register(&mut self, rule: impl MergeRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// Find the first rule that fires at `cursor`.
    ///
    /// Returns the rule name and the number of segments it consumes.
    #[must_use]
    pub fn first_match(
        &self,
        segments: &[Segment<'_>],
        cursor: usize,
    ) -> Option<(&'static str, usize)> {
        self.rules
            .iter()
            .find_map(|rule| rule.span(segments, cursor).map(|span| (rule.name(), span)))
    }

    /// Rule names in priority order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleChain {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RuleChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleChain")
            .field("rules", &self.rule_names())
            .finish()
    }
}
