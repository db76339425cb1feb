use serde::{Deserialize, Serialize};

/// Tuning for team generation.
///
/// Every field has a default, so a partial JSON object deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalancerConfig {
    /// Number of randomized construction trials per generation call.
    pub trial_count: usize,
    /// A role excluded by at least this many selections is rejected before
    /// any trial runs.
    pub exclusion_threshold: usize,
    /// Worker threads sharing the trial budget. `0` and `1` both run inline.
    pub workers: usize,
    /// Fixed RNG seed for reproducible runs; seeded from the OS when absent.
    pub seed: Option<u64>,
}

impl BalancerConfig {
    pub const DEFAULT_TRIAL_COUNT: usize = 100;
    pub const DEFAULT_EXCLUSION_THRESHOLD: usize = 8;
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            trial_count: Self::DEFAULT_TRIAL_COUNT,
            exclusion_threshold: Self::DEFAULT_EXCLUSION_THRESHOLD,
            workers: 1,
            seed: None,
        }
    }
}

/// How session exclusions are treated during generation.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
    derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Exclusions are hard constraints and the feasibility pre-check runs.
    #[default]
    #[display("strict")]
    Strict,
    /// Exclusions are ignored; used after a strict run was rejected.
    #[display("relaxed")]
    Relaxed,
}
