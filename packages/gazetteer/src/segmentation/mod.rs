//! Compound place-name segmentation.
//!
//! Hyphens in Finnish postal area names either join a qualifier to a stem
//! ("Iso-Heikkilä"), continue a generic compound ("Sairaala-alue"), or
//! separate two areas sharing one postal code ("Punavuori - Bulevardi").
//! A priority-ordered chain of merge rules decides which is which.

mod config;
mod engine;
mod registry;
mod rule;
mod types;

pub use config::{create_finnish_rule_chain, create_rule_chain, WordLists};
pub use engine::Segmenter;
pub use registry::RuleChain;
pub use rule::{
    CaseHeuristicRule, DualConjunctionRule, KnownPrefixRule, KnownSuffixRule, MergeRule,
};
pub use types::{split_segments, AlignmentPolicy, Segment};
