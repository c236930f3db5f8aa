use crate::AbilityCategory;

/// When a usage count triggers the reset of the acting entity's counters.
///
/// Both variants compare against the largest positive limit change found
/// across the scanned trees.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResetPolicy {
    /// Reset when `usage == max`.
    #[default]
    AtMax,
    /// Reset one activation later, when `usage == max + 1`.
    PastMax,
}

/// Tunable parameters of the decision engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DbtConfig {
    pub reset_policy: ResetPolicy,
    /// Category reported for task nodes that never had one assigned.
    pub default_category: AbilityCategory,
    /// Upper bound applied to controller time limits.
    pub max_time_limit_secs: u32,
}

impl DbtConfig {
    pub const DEFAULT_MAX_TIME_LIMIT_SECS: u32 = 3600;

    pub fn new() -> Self {
        Self {
            reset_policy: ResetPolicy::default(),
            default_category: AbilityCategory::default(),
            max_time_limit_secs: Self::DEFAULT_MAX_TIME_LIMIT_SECS,
        }
    }

    pub fn with_reset_policy(mut self, reset_policy: ResetPolicy) -> Self {
        self.reset_policy = reset_policy;
        self
    }
}

impl Default for DbtConfig {
    fn default() -> Self {
        Self::new()
    }
}
