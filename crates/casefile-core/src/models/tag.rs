use serde::{Deserialize, Serialize};

/// A named attribute category, e.g. name "SSN" kind "IDENTIFIER".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    /// Unique across all tags.
    pub name: String,
    /// Free-text category, e.g. RISK, ROLE, GENERAL.
    pub kind: String,
}

/// A tag attached to an entity, optionally carrying a value.
/// Unique per (entity, tag) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagAssignment {
    pub entity_id: String,
    pub tag_name: String,
    pub value: Option<String>,
}
