use crate::errors::CaseResult;
use crate::models::{Entity, Relationship, TagAssignment};

/// The insight engine's only read contract. One full read of the current
/// graph per analysis run; the engine never writes.
pub trait IGraphStore: Send + Sync {
    /// All entities.
    fn list_entities(&self) -> CaseResult<Vec<Entity>>;

    /// All relationships, endpoints unresolved. Dangling endpoints are
    /// the snapshot loader's problem, not the store's.
    fn list_relationships(&self) -> CaseResult<Vec<Relationship>>;

    /// All (entity, tag name, value) assignments.
    fn list_tag_assignments(&self) -> CaseResult<Vec<TagAssignment>>;

    /// Best-effort lookup used by the presentation layer to render names
    /// for the ids referenced by each insight. Missing ids are simply
    /// absent from the result.
    fn entities_by_ids(&self, ids: &[String]) -> CaseResult<Vec<Entity>>;
}
