//! Configuration structs.

pub mod insight_config;

pub use insight_config::InsightConfig;
