//! # casefile-core
//!
//! Foundation crate for the Casefile investigative graph.
//! Defines all models, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::InsightConfig;
pub use errors::{CaseError, CaseResult};
pub use models::{
    Entity, EntityType, Evidence, EvidenceKind, Insight, InsightKind, Relationship, Tag,
    TagAssignment,
};
pub use traits::{ICaseRepository, IGraphStore};
