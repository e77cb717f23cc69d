//! Workspace-wide default values.

/// Maximum number of insights returned by one analysis run.
pub const DEFAULT_MAX_INSIGHTS: usize = 200;

/// Entities with more adjacent relationships than this are excluded
/// from chain pair expansion and surfaced via diagnostics instead.
pub const DEFAULT_MAX_HUB_DEGREE: usize = 64;

/// Default strength for a relationship when none is given (0–100 scale).
pub const DEFAULT_RELATIONSHIP_STRENGTH: u8 = 50;

/// Relationship type used by bulk intake when the caller leaves it blank.
pub const DEFAULT_BULK_REL_TYPE: &str = "ASSOCIATED_WITH";
