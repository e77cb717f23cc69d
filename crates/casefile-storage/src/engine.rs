//! StorageEngine — owns the connection, runs migrations on open,
//! implements ICaseRepository (presentation writes) and IGraphStore
//! (insight engine reads).

use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::Connection;
use uuid::Uuid;

use casefile_core::constants::DEFAULT_BULK_REL_TYPE;
use casefile_core::errors::{CaseResult, StorageError};
use casefile_core::models::{
    Entity, EntityType, Evidence, EvidenceKind, Relationship, TagAssignment,
};
use casefile_core::traits::{EntityFilter, ICaseRepository, IGraphStore, NewRelationship};

use crate::queries::{entity_ops, evidence_ops, relationship_ops, tag_ops};
use crate::{migrations, to_storage_err};

/// The main storage engine. One mutex-guarded connection is enough here:
/// the store serves synchronous form handlers and one full read per
/// analysis run, not a concurrent query workload.
pub struct StorageEngine {
    conn: Mutex<Connection>,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> CaseResult<Self> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        let engine = Self {
            conn: Mutex::new(conn),
        };
        engine.initialize()?;
        Ok(engine)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> CaseResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        let engine = Self {
            conn: Mutex::new(conn),
        };
        engine.initialize()?;
        Ok(engine)
    }

    fn initialize(&self) -> CaseResult<()> {
        self.with_conn(|conn| migrations::run_migrations(conn))
    }

    /// Run a closure against the guarded connection.
    fn with_conn<F, T>(&self, f: F) -> CaseResult<T>
    where
        F: FnOnce(&Connection) -> CaseResult<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| to_storage_err("connection mutex poisoned".to_string()))?;
        f(&conn)
    }
}

impl ICaseRepository for StorageEngine {
    // --- Entities ---

    fn create_entity(
        &self,
        entity_type: EntityType,
        name: &str,
        aliases: &str,
        notes: &str,
    ) -> CaseResult<Entity> {
        let now = Utc::now();
        let entity = Entity {
            id: Uuid::new_v4().to_string(),
            entity_type,
            name: name.trim().to_string(),
            aliases: aliases.trim().to_string(),
            notes: notes.to_string(),
            event_date: String::new(),
            created_at: now,
            updated_at: now,
        };
        self.with_conn(|conn| entity_ops::insert_entity(conn, &entity))?;
        tracing::debug!(id = %entity.id, entity_type = entity_type.as_str(), "entity created");
        Ok(entity)
    }

    fn update_entity(&self, entity: &Entity) -> CaseResult<()> {
        self.with_conn(|conn| entity_ops::update_entity(conn, entity))
    }

    fn upsert_entity(&self, entity_type: EntityType, name: &str) -> CaseResult<Entity> {
        let name = name.trim();
        let existing =
            self.with_conn(|conn| entity_ops::get_by_type_and_name(conn, entity_type, name))?;
        match existing {
            Some(entity) => Ok(entity),
            None => self.create_entity(entity_type, name, "", ""),
        }
    }

    fn get_entity(&self, id: &str) -> CaseResult<Option<Entity>> {
        self.with_conn(|conn| entity_ops::get_entity(conn, id))
    }

    fn find_entities(&self, filter: &EntityFilter) -> CaseResult<Vec<Entity>> {
        self.with_conn(|conn| entity_ops::find_entities(conn, filter))
    }

    // --- Bulk ---

    fn create_entities_bulk(
        &self,
        container_id: &str,
        rel_type: &str,
        start_date: &str,
        end_date: &str,
        names: &str,
    ) -> CaseResult<usize> {
        let container = self.get_entity(container_id)?.ok_or_else(|| {
            StorageError::NotFound {
                id: container_id.to_string(),
            }
        })?;
        let rel_type = match rel_type.trim() {
            "" => DEFAULT_BULK_REL_TYPE,
            t => t,
        };

        let mut created = 0;
        let mut seen = HashSet::new();
        for raw in names.split(['\n', ',']) {
            let name = raw.trim();
            if name.is_empty() || !seen.insert(name.to_string()) {
                continue;
            }
            let existing = self
                .with_conn(|conn| entity_ops::get_by_type_and_name(conn, EntityType::Person, name))?;
            let person = match existing {
                Some(entity) => entity,
                None => {
                    let entity = self.create_entity(EntityType::Person, name, "", "")?;
                    created += 1;
                    entity
                }
            };
            self.create_relationship(&NewRelationship {
                from_id: person.id,
                to_id: container.id.clone(),
                rel_type: rel_type.to_string(),
                start_date: start_date.to_string(),
                end_date: end_date.to_string(),
                strength: None,
                notes: "Bulk intake".to_string(),
            })?;
        }
        tracing::debug!(created, container = %container.id, "bulk intake complete");
        Ok(created)
    }

    // --- Relationships ---

    fn create_relationship(&self, rel: &NewRelationship) -> CaseResult<Relationship> {
        let relationship = Relationship {
            id: Uuid::new_v4().to_string(),
            from_id: rel.from_id.clone(),
            to_id: rel.to_id.clone(),
            rel_type: rel.rel_type.trim().to_string(),
            start_date: rel.start_date.trim().to_string(),
            end_date: rel.end_date.trim().to_string(),
            strength: rel.strength.unwrap_or_else(Relationship::default_strength),
            notes: rel.notes.clone(),
            created_at: Utc::now(),
        };
        self.with_conn(|conn| relationship_ops::insert_relationship(conn, &relationship))?;
        Ok(relationship)
    }

    fn update_relationship(&self, rel: &Relationship) -> CaseResult<()> {
        self.with_conn(|conn| relationship_ops::update_relationship(conn, rel))
    }

    fn relationships_for_entity(&self, entity_id: &str) -> CaseResult<Vec<Relationship>> {
        self.with_conn(|conn| relationship_ops::relationships_for_entity(conn, entity_id))
    }

    // --- Tags ---

    fn attach_tag(
        &self,
        entity_id: &str,
        tag_name: &str,
        kind: &str,
        value: Option<&str>,
    ) -> CaseResult<()> {
        self.with_conn(|conn| {
            let tag_id = tag_ops::upsert_tag(conn, tag_name.trim(), kind.trim())?;
            tag_ops::assign_tag(conn, entity_id, &tag_id, value)
        })
    }

    fn tags_for_entity(&self, entity_id: &str) -> CaseResult<Vec<TagAssignment>> {
        self.with_conn(|conn| tag_ops::tags_for_entity(conn, entity_id))
    }

    // --- Evidence ---

    fn attach_evidence(&self, entity_id: &str, content: &str) -> CaseResult<Evidence> {
        let evidence = Evidence {
            id: Uuid::new_v4().to_string(),
            entity_id: entity_id.to_string(),
            kind: EvidenceKind::infer(content),
            content: content.to_string(),
            created_at: Utc::now(),
        };
        self.with_conn(|conn| evidence_ops::insert_evidence(conn, &evidence))?;
        Ok(evidence)
    }

    fn evidence_for_entity(&self, entity_id: &str) -> CaseResult<Vec<Evidence>> {
        self.with_conn(|conn| evidence_ops::evidence_for_entity(conn, entity_id))
    }
}

impl IGraphStore for StorageEngine {
    fn list_entities(&self) -> CaseResult<Vec<Entity>> {
        self.with_conn(entity_ops::list_entities)
    }

    fn list_relationships(&self) -> CaseResult<Vec<Relationship>> {
        self.with_conn(relationship_ops::list_relationships)
    }

    fn list_tag_assignments(&self) -> CaseResult<Vec<TagAssignment>> {
        self.with_conn(tag_ops::list_tag_assignments)
    }

    fn entities_by_ids(&self, ids: &[String]) -> CaseResult<Vec<Entity>> {
        self.with_conn(|conn| entity_ops::get_entities_by_ids(conn, ids))
    }
}
