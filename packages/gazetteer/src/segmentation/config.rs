//! Word lists and the default Finnish/Swedish rule chain.

use super::registry::RuleChain;
use super::rule::{CaseHeuristicRule, DualConjunctionRule, KnownPrefixRule, KnownSuffixRule};

/// Locale-specific vocabulary driving the merge rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordLists {
    /// Qualifiers that always join the following segment.
    pub prefixes: Vec<String>,

    /// Second halves that never stand alone. Case-sensitive.
    pub suffixes: Vec<String>,

    /// Conjunctions of "X- and Y-Z" compounds, in every language of the data.
    pub conjunctions: Vec<String>,
}

impl WordLists {
    /// Vocabulary for Finnish postal area names and their Swedish renderings.
    #[must_use]
    pub fn finnish() -> Self {
        fn owned(words: &[&str]) -> Vec<String> {
            words.iter().map(|w| (*w).to_string()).collect()
        }

        Self {
            prefixes: owned(&[
                "Ala", "Ylä", "Yli", "Etu", "Keski", "Iso", // vertical/size
                "Itä", "Länsi", "Etelä", // compass
                "Uusi", "Mäki", "Luoma", "ja",
            ]),
            suffixes: owned(&["aho", "Aho"]),
            conjunctions: owned(&["ja", "och"]),
        }
    }
}

/// Build the rule chain for a vocabulary.
///
/// Priority order:
///
/// ```text
/// 1. dual-conjunction  next segment starts with "ja"/"och"    → 3 segments
/// 2. known-prefix      current segment is a qualifier         → 2 segments
/// 3. known-suffix      next segment is a bound suffix         → 2 segments
/// 4. case-heuristic    next segment does not start uppercase  → 2 segments
///    (none)            segment stands alone                   → 1 segment
/// ```
#[must_use]
pub fn create_rule_chain(words: &WordLists) -> RuleChain {
    let mut chain = RuleChain::new();
    chain.register(DualConjunctionRule::new(&words.conjunctions));
    chain.register(KnownPrefixRule::new(&words.prefixes));
    chain.register(KnownSuffixRule::new(&words.suffixes));
    chain.register(CaseHeuristicRule);
    chain
}

/// Rule chain for Finnish postal area names.
#[must_use]
pub fn create_finnish_rule_chain() -> RuleChain {
    create_rule_chain(&WordLists::finnish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finnish_word_lists() {
        let words = WordLists::finnish();
        assert!(words.prefixes.contains(&"Iso".to_string()));
        assert!(words.prefixes.contains(&"Länsi".to_string()));
        assert_eq!(words.suffixes, vec!["aho", "Aho"]);
        assert_eq!(words.conjunctions, vec!["ja", "och"]);
    }

    #[test]
    fn test_create_finnish_rule_chain_order() {
        let chain = create_finnish_rule_chain();
        assert_eq!(
            chain.rule_names(),
            vec![
                "dual-conjunction",
                "known-prefix",
                "known-suffix",
                "case-heuristic"
            ]
        );
    }

    #[test]
    fn test_custom_word_lists() {
        let words = WordLists {
            prefixes: vec!["Norra".to_string()],
            suffixes: Vec::new(),
            conjunctions: vec!["och".to_string()],
        };
        let chain = create_rule_chain(&words);
        let segments = crate::segmentation::types::split_segments("Norra-Haga");
        assert_eq!(chain.first_match(&segments, 0), Some(("known-prefix", 2)));
    }
}
