//! # casefile-insights
//!
//! Batch insight-detection engine over the Casefile graph:
//! - Snapshot: one immutable in-memory read of the full graph
//! - Duplicates: entity pairs likely denoting the same subject
//! - Overlaps: relationships sharing an endpoint with intersecting dates
//! - Chains: two-hop paths between entities with no direct edge
//! - Coincidences: entities sharing a tagged attribute value
//! - Aggregation: deterministic merge, dedup, proportional cap

pub mod aggregate;
pub mod dates;
pub mod detectors;
pub mod engine;
pub mod snapshot;

pub use engine::{EngineDiagnostics, InsightEngine};
pub use snapshot::GraphSnapshot;
