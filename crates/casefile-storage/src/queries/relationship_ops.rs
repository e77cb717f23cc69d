//! Relationship insert and listing.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use casefile_core::errors::{CaseError, CaseResult, StorageError};
use casefile_core::models::Relationship;

use crate::to_storage_err;

const RELATIONSHIP_COLUMNS: &str =
    "id, from_id, to_id, rel_type, start_date, end_date, strength, notes, created_at";

pub(crate) fn parse_relationship_row(row: &Row<'_>) -> CaseResult<Relationship> {
    let id: String = row.get(0).map_err(|e| to_storage_err(e.to_string()))?;
    let strength: i64 = row.get(6).map_err(|e| to_storage_err(e.to_string()))?;
    if !(0..=100).contains(&strength) {
        return Err(CaseError::from(StorageError::MalformedRecord {
            table: "relationships".to_string(),
            id,
            reason: format!("strength {strength} outside 0..=100"),
        }));
    }
    let created_raw: String = row.get(8).map_err(|e| to_storage_err(e.to_string()))?;
    let created_at = DateTime::parse_from_rfc3339(&created_raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            CaseError::from(StorageError::MalformedRecord {
                table: "relationships".to_string(),
                id: id.clone(),
                reason: format!("bad timestamp {created_raw:?}: {e}"),
            })
        })?;
    Ok(Relationship {
        from_id: row.get(1).map_err(|e| to_storage_err(e.to_string()))?,
        to_id: row.get(2).map_err(|e| to_storage_err(e.to_string()))?,
        rel_type: row.get(3).map_err(|e| to_storage_err(e.to_string()))?,
        start_date: row.get(4).map_err(|e| to_storage_err(e.to_string()))?,
        end_date: row.get(5).map_err(|e| to_storage_err(e.to_string()))?,
        strength: strength as u8,
        notes: row.get(7).map_err(|e| to_storage_err(e.to_string()))?,
        created_at,
        id,
    })
}

pub fn insert_relationship(conn: &Connection, rel: &Relationship) -> CaseResult<()> {
    conn.execute(
        "INSERT INTO relationships
            (id, from_id, to_id, rel_type, start_date, end_date, strength, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            rel.id,
            rel.from_id,
            rel.to_id,
            rel.rel_type,
            rel.start_date,
            rel.end_date,
            rel.strength as i64,
            rel.notes,
            rel.created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Update every mutable field of an existing relationship.
pub fn update_relationship(conn: &Connection, rel: &Relationship) -> CaseResult<()> {
    let changed = conn
        .execute(
            "UPDATE relationships
             SET from_id = ?2, to_id = ?3, rel_type = ?4, start_date = ?5,
                 end_date = ?6, strength = ?7, notes = ?8
             WHERE id = ?1",
            params![
                rel.id,
                rel.from_id,
                rel.to_id,
                rel.rel_type,
                rel.start_date,
                rel.end_date,
                rel.strength as i64,
                rel.notes,
            ],
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    if changed == 0 {
        return Err(StorageError::NotFound { id: rel.id.clone() }.into());
    }
    Ok(())
}

pub fn list_relationships(conn: &Connection) -> CaseResult<Vec<Relationship>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {RELATIONSHIP_COLUMNS} FROM relationships ORDER BY created_at, id"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map([], |row| Ok(parse_relationship_row(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(results)
}

/// Relationships adjacent to an entity, both directions.
pub fn relationships_for_entity(conn: &Connection, entity_id: &str) -> CaseResult<Vec<Relationship>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {RELATIONSHIP_COLUMNS} FROM relationships
             WHERE from_id = ?1 OR to_id = ?1
             ORDER BY created_at, id"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![entity_id], |row| Ok(parse_relationship_row(row)))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(|e| to_storage_err(e.to_string()))??);
    }
    Ok(results)
}
