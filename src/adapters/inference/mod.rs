//! Inference provider adapters.

mod rule_based_provider;

pub use rule_based_provider::RuleBasedInferenceProvider;
