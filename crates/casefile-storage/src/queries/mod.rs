//! Query functions, one module per table family. All functions operate on
//! a borrowed connection and map rusqlite failures into the storage error
//! domain.

pub mod entity_ops;
pub mod evidence_ops;
pub mod relationship_ops;
pub mod tag_ops;
