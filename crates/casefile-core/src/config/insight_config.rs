use serde::{Deserialize, Serialize};

use crate::constants;

/// Insight engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Aggregate result cap. Truncation is proportional across insight
    /// kinds, never silently favoring one category.
    pub max_insights: usize,
    /// Degree above which an entity is excluded from chain pair expansion.
    /// Skipped hubs are reported through diagnostics.
    pub max_hub_degree: usize,
    /// Run the four detectors on parallel tasks. Output is identical
    /// either way; sequential mode exists for deterministic debugging.
    pub parallel: bool,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            max_insights: constants::DEFAULT_MAX_INSIGHTS,
            max_hub_degree: constants::DEFAULT_MAX_HUB_DEGREE,
            parallel: true,
        }
    }
}
