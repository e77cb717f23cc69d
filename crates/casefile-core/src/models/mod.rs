//! Domain models for the investigative graph.

pub mod entity;
pub mod evidence;
pub mod insight;
pub mod relationship;
pub mod tag;

pub use entity::{Entity, EntityType};
pub use evidence::{Evidence, EvidenceKind};
pub use insight::{Insight, InsightKind};
pub use relationship::Relationship;
pub use tag::{Tag, TagAssignment};
