use serde::{Deserialize, Serialize};

/// Which detector produced a finding. Variant order is the aggregation
/// priority: duplicates are the most actionable, coincidences the least.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InsightKind {
    Duplicate,
    Overlap,
    Chain,
    Coincidence,
}

impl InsightKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightKind::Duplicate => "DUPLICATE",
            InsightKind::Overlap => "OVERLAP",
            InsightKind::Chain => "CHAIN",
            InsightKind::Coincidence => "COINCIDENCE",
        }
    }

    /// All kinds in aggregation priority order.
    pub const ALL: [InsightKind; 4] = [
        InsightKind::Duplicate,
        InsightKind::Overlap,
        InsightKind::Chain,
        InsightKind::Coincidence,
    ];
}

/// A derived finding produced by the detection engine. Computed fresh on
/// every analysis run, never persisted; its only identity is its position
/// in the result list for that call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub kind: InsightKind,
    /// Human-readable summary.
    pub title: String,
    /// Human-readable explanation.
    pub details: String,
    /// Implicated entity ids, ordered for display linking.
    pub ids: Vec<String>,
}

impl Insight {
    /// Order-independent identity key: two insights with the same kind and
    /// the same set of ids are considered the same finding.
    pub fn identity(&self) -> (InsightKind, Vec<String>) {
        let mut ids = self.ids.clone();
        ids.sort();
        ids.dedup();
        (self.kind, ids)
    }
}
