use crate::errors::CaseResult;
use crate::models::{Entity, EntityType, Evidence, Relationship, TagAssignment};

/// Result ordering for entity listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityOrder {
    /// Name ascending, the browsing default.
    #[default]
    NameAsc,
    /// Most recently updated first, as the timeline lists events.
    UpdatedDesc,
}

/// Filter for entity listing. All fields optional; `None` means no
/// constraint. Name matching is a case-insensitive (Unicode case folded)
/// substring test — relevance ranking is out of scope.
#[derive(Debug, Clone, Default)]
pub struct EntityFilter {
    pub entity_type: Option<EntityType>,
    pub name_contains: Option<String>,
    pub order: EntityOrder,
    pub limit: Option<usize>,
}

/// Input for creating a relationship. The store assigns id and timestamps;
/// a missing strength falls back to the model default.
#[derive(Debug, Clone)]
pub struct NewRelationship {
    pub from_id: String,
    pub to_id: String,
    pub rel_type: String,
    pub start_date: String,
    pub end_date: String,
    pub strength: Option<u8>,
    pub notes: String,
}

/// Persisted-record I/O for the presentation layer: CRUD forms, bulk name
/// intake, tag/evidence attachment. No algorithmic content lives behind
/// this trait.
pub trait ICaseRepository: Send + Sync {
    // --- Entities ---
    fn create_entity(
        &self,
        entity_type: EntityType,
        name: &str,
        aliases: &str,
        notes: &str,
    ) -> CaseResult<Entity>;
    fn update_entity(&self, entity: &Entity) -> CaseResult<()>;
    /// Create the entity unless one with the same type and exact name
    /// already exists, in which case the existing record is returned.
    fn upsert_entity(&self, entity_type: EntityType, name: &str) -> CaseResult<Entity>;
    fn get_entity(&self, id: &str) -> CaseResult<Option<Entity>>;
    fn find_entities(&self, filter: &EntityFilter) -> CaseResult<Vec<Entity>>;

    // --- Bulk ---
    /// Paste-a-list intake: `names` splits on newlines and commas, one
    /// PERSON per non-empty trimmed name, each linked to the container
    /// entity by a relationship of `rel_type` (a blank type falls back to
    /// the default) spanning `start_date`..`end_date`. Names that already
    /// exist as a PERSON are not recreated but are still linked; repeats
    /// within the batch collapse to one. Returns the created-entity count.
    /// Fails with `NotFound` when the container does not exist.
    fn create_entities_bulk(
        &self,
        container_id: &str,
        rel_type: &str,
        start_date: &str,
        end_date: &str,
        names: &str,
    ) -> CaseResult<usize>;

    // --- Relationships ---
    fn create_relationship(&self, rel: &NewRelationship) -> CaseResult<Relationship>;
    fn update_relationship(&self, rel: &Relationship) -> CaseResult<()>;
    fn relationships_for_entity(&self, entity_id: &str) -> CaseResult<Vec<Relationship>>;

    // --- Tags ---
    /// Attach a tag (created on first use) to an entity. Re-attaching the
    /// same tag overwrites the value; the (entity, tag) pair stays unique.
    fn attach_tag(
        &self,
        entity_id: &str,
        tag_name: &str,
        kind: &str,
        value: Option<&str>,
    ) -> CaseResult<()>;
    fn tags_for_entity(&self, entity_id: &str) -> CaseResult<Vec<TagAssignment>>;

    // --- Evidence ---
    fn attach_evidence(&self, entity_id: &str, content: &str) -> CaseResult<Evidence>;
    fn evidence_for_entity(&self, entity_id: &str) -> CaseResult<Vec<Evidence>>;
}
