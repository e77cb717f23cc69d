//! Trait seams between the engine, the store, and the presentation layer.

pub mod repository;
pub mod store;

pub use repository::{EntityFilter, EntityOrder, ICaseRepository, NewRelationship};
pub use store::IGraphStore;
