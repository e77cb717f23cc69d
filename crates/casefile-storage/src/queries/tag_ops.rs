//! Tag upsert, attachment, and assignment listing.

use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use casefile_core::errors::CaseResult;
use casefile_core::models::TagAssignment;

use crate::to_storage_err;

/// Get the id of the tag with this name, creating it on first use.
/// The unique name constraint makes the create race-safe: a concurrent
/// insert surfaces as a constraint error and the retry select wins.
pub fn upsert_tag(conn: &Connection, name: &str, kind: &str) -> CaseResult<String> {
    if let Some(id) = find_tag_id(conn, name)? {
        return Ok(id);
    }
    let id = Uuid::new_v4().to_string();
    match conn.execute(
        "INSERT INTO tags (id, name, kind) VALUES (?1, ?2, ?3)",
        params![id, name, kind],
    ) {
        Ok(_) => Ok(id),
        Err(insert_err) => match find_tag_id(conn, name)? {
            Some(existing) => Ok(existing),
            None => Err(to_storage_err(insert_err.to_string())),
        },
    }
}

fn find_tag_id(conn: &Connection, name: &str) -> CaseResult<Option<String>> {
    conn.query_row(
        "SELECT id FROM tags WHERE name = ?1",
        params![name],
        |row| row.get::<_, String>(0),
    )
    .optional()
    .map_err(|e| to_storage_err(e.to_string()))
}

/// Attach a tag to an entity. Re-attaching overwrites the value; the
/// (entity, tag) pair stays unique.
pub fn assign_tag(
    conn: &Connection,
    entity_id: &str,
    tag_id: &str,
    value: Option<&str>,
) -> CaseResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO entity_tags (entity_id, tag_id, value) VALUES (?1, ?2, ?3)",
        params![entity_id, tag_id, value],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// All (entity, tag name, value) triples, as the insight engine reads them.
pub fn list_tag_assignments(conn: &Connection) -> CaseResult<Vec<TagAssignment>> {
    let mut stmt = conn
        .prepare(
            "SELECT et.entity_id, t.name, et.value
             FROM entity_tags et
             JOIN tags t ON t.id = et.tag_id
             ORDER BY t.name, et.entity_id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| {
            Ok(TagAssignment {
                entity_id: row.get(0)?,
                tag_name: row.get(1)?,
                value: row.get(2)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(results)
}

/// Assignments for one entity.
pub fn tags_for_entity(conn: &Connection, entity_id: &str) -> CaseResult<Vec<TagAssignment>> {
    let mut stmt = conn
        .prepare(
            "SELECT et.entity_id, t.name, et.value
             FROM entity_tags et
             JOIN tags t ON t.id = et.tag_id
             WHERE et.entity_id = ?1
             ORDER BY t.name",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![entity_id], |row| {
            Ok(TagAssignment {
                entity_id: row.get(0)?,
                tag_name: row.get(1)?,
                value: row.get(2)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(results)
}
