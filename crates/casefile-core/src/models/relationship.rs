use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_RELATIONSHIP_STRENGTH;

/// A directed, typed, dated, weighted edge between two entities.
///
/// `from_id` and `to_id` need not reference distinct entities — self-loops
/// are representable and consumers must tolerate them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    pub from_id: String,
    pub to_id: String,
    /// Free-text label, e.g. "WORKED_AT".
    pub rel_type: String,
    /// Loosely formatted: empty, "YYYY", "YYYY-MM", or "YYYY-MM-DD".
    pub start_date: String,
    pub end_date: String,
    /// 0–100.
    pub strength: u8,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

impl Relationship {
    /// Given one endpoint, the other one. Falls back to `to_id` when the
    /// given id matches neither (callers pass an endpoint they got from
    /// this edge, so that branch only covers self-loops cleanly).
    pub fn other_endpoint(&self, entity_id: &str) -> &str {
        if self.from_id == entity_id {
            &self.to_id
        } else {
            &self.from_id
        }
    }

    pub fn default_strength() -> u8 {
        DEFAULT_RELATIONSHIP_STRENGTH
    }
}

impl PartialEq for Relationship {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}
