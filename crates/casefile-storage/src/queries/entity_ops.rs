//! Entity insert, update, lookup, filtered listing.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use casefile_core::errors::{CaseError, CaseResult, StorageError};
use casefile_core::models::{Entity, EntityType};
use casefile_core::traits::{EntityFilter, EntityOrder};

use crate::to_storage_err;

const ENTITY_COLUMNS: &str =
    "id, entity_type, name, aliases, notes, event_date, created_at, updated_at";

/// Parse an rfc3339 timestamp column, reporting the offending record on failure.
fn parse_timestamp(raw: &str, table: &str, id: &str) -> CaseResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            CaseError::from(StorageError::MalformedRecord {
                table: table.to_string(),
                id: id.to_string(),
                reason: format!("bad timestamp {raw:?}: {e}"),
            })
        })
}

/// Map one `entities` row into an [`Entity`].
pub(crate) fn parse_entity_row(row: &Row<'_>) -> CaseResult<Entity> {
    let id: String = row.get(0).map_err(|e| to_storage_err(e.to_string()))?;
    let type_str: String = row.get(1).map_err(|e| to_storage_err(e.to_string()))?;
    let entity_type = EntityType::from_str_name(&type_str).ok_or_else(|| {
        CaseError::from(StorageError::MalformedRecord {
            table: "entities".to_string(),
            id: id.clone(),
            reason: format!("unknown entity type {type_str:?}"),
        })
    })?;
    let created_raw: String = row.get(6).map_err(|e| to_storage_err(e.to_string()))?;
    let updated_raw: String = row.get(7).map_err(|e| to_storage_err(e.to_string()))?;
    Ok(Entity {
        entity_type,
        name: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
        aliases: row.get(3).map_err(|e| to_storage_err(e.to_string()))?,
        notes: row.get(4).map_err(|e| to_storage_err(e.to_string()))?,
        event_date: row.get(5).map_err(|e| to_storage_err(e.to_string()))?,
        created_at: parse_timestamp(&created_raw, "entities", &id)?,
        updated_at: parse_timestamp(&updated_raw, "entities", &id)?,
        id,
    })
}

pub fn insert_entity(conn: &Connection, entity: &Entity) -> CaseResult<()> {
    conn.execute(
        "INSERT INTO entities
            (id, entity_type, name, aliases, notes, event_date, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            entity.id,
            entity.entity_type.as_str(),
            entity.name,
            entity.aliases,
            entity.notes,
            entity.event_date,
            entity.created_at.to_rfc3339(),
            entity.updated_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Update every mutable field. The id is immutable by invariant.
pub fn update_entity(conn: &Connection, entity: &Entity) -> CaseResult<()> {
    let changed = conn
        .execute(
            "UPDATE entities
             SET entity_type = ?2, name = ?3, aliases = ?4, notes = ?5,
                 event_date = ?6, updated_at = ?7
             WHERE id = ?1",
            params![
                entity.id,
                entity.entity_type.as_str(),
                entity.name,
                entity.aliases,
                entity.notes,
                entity.event_date,
                Utc::now().to_rfc3339(),
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if changed == 0 {
        return Err(StorageError::NotFound {
            id: entity.id.clone(),
        }
        .into());
    }
    Ok(())
}

pub fn get_entity(conn: &Connection, id: &str) -> CaseResult<Option<Entity>> {
    let mut stmt = conn
        .prepare(&format!("SELECT {ENTITY_COLUMNS} FROM entities WHERE id = ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut rows = stmt
        .query_map(params![id], |row| Ok(parse_entity_row(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;
    match rows.next() {
        Some(row) => Ok(Some(row.map_err(|e| to_storage_err(e.to_string()))??)),
        None => Ok(None),
    }
}

/// Exact (type, name) lookup, used by upsert and bulk intake.
pub fn get_by_type_and_name(
    conn: &Connection,
    entity_type: EntityType,
    name: &str,
) -> CaseResult<Option<Entity>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {ENTITY_COLUMNS} FROM entities WHERE entity_type = ?1 AND name = ?2"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut rows = stmt
        .query_map(params![entity_type.as_str(), name], |row| {
            Ok(parse_entity_row(row))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    match rows.next() {
        Some(row) => Ok(Some(row.map_err(|e| to_storage_err(e.to_string()))??)),
        None => Ok(None),
    }
}

pub fn list_entities(conn: &Connection) -> CaseResult<Vec<Entity>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {ENTITY_COLUMNS} FROM entities ORDER BY created_at, id"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| Ok(parse_entity_row(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(results)
}

/// Best-effort bulk lookup: ids that do not exist are simply absent.
pub fn get_entities_by_ids(conn: &Connection, ids: &[String]) -> CaseResult<Vec<Entity>> {
    let mut results = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(entity) = get_entity(conn, id)? {
            results.push(entity);
        }
    }
    Ok(results)
}

/// Filtered listing: optional type constraint, case-insensitive substring
/// match on the name, configurable ordering. The name match folds case in
/// Rust rather than SQL — SQLite's `lower()` only folds ASCII, which would
/// miss names like "Müller".
pub fn find_entities(conn: &Connection, filter: &EntityFilter) -> CaseResult<Vec<Entity>> {
    let mut sql = format!("SELECT {ENTITY_COLUMNS} FROM entities WHERE 1=1");
    let mut params_vec: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    if let Some(entity_type) = filter.entity_type {
        params_vec.push(Box::new(entity_type.as_str().to_string()));
        sql.push_str(&format!(" AND entity_type = ?{}", params_vec.len()));
    }
    sql.push_str(match filter.order {
        EntityOrder::NameAsc => " ORDER BY name, id",
        EntityOrder::UpdatedDesc => " ORDER BY updated_at DESC, id",
    });

    let mut stmt = conn.prepare(&sql).map_err(|e| to_storage_err(e.to_string()))?;
    let params_refs: Vec<&dyn rusqlite::types::ToSql> =
        params_vec.iter().map(|p| p.as_ref()).collect();
    let rows = stmt
        .query_map(params_refs.as_slice(), |row| Ok(parse_entity_row(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let needle = filter.name_contains.as_ref().map(|n| n.to_lowercase());
    let mut results = Vec::new();
    for row in rows {
        let entity = row.map_err(|e| to_storage_err(e.to_string()))??;
        if let Some(needle) = &needle {
            if !entity.name.to_lowercase().contains(needle.as_str()) {
                continue;
            }
        }
        results.push(entity);
        if filter.limit.is_some_and(|limit| results.len() >= limit) {
            break;
        }
    }
    Ok(results)
}
