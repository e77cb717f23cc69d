//! Evidence attachment and listing.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use casefile_core::errors::{CaseError, CaseResult, StorageError};
use casefile_core::models::{Evidence, EvidenceKind};

use crate::to_storage_err;

pub fn insert_evidence(conn: &Connection, evidence: &Evidence) -> CaseResult<()> {
    let kind = match evidence.kind {
        EvidenceKind::Link => "LINK",
        EvidenceKind::Note => "NOTE",
    };
    conn.execute(
        "INSERT INTO evidence (id, entity_id, kind, content, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            evidence.id,
            evidence.entity_id,
            kind,
            evidence.content,
            evidence.created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn evidence_for_entity(conn: &Connection, entity_id: &str) -> CaseResult<Vec<Evidence>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, entity_id, kind, content, created_at
             FROM evidence WHERE entity_id = ?1
             ORDER BY created_at, id",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params![entity_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut results = Vec::new();
    for row in rows {
        let (id, entity_id, kind_str, content, created_raw) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        let kind = match kind_str.as_str() {
            "LINK" => EvidenceKind::Link,
            "NOTE" => EvidenceKind::Note,
            other => {
                return Err(CaseError::from(StorageError::MalformedRecord {
                    table: "evidence".to_string(),
                    id,
                    reason: format!("unknown evidence kind {other:?}"),
                }))
            }
        };
        let created_at = DateTime::parse_from_rfc3339(&created_raw)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| {
                CaseError::from(StorageError::MalformedRecord {
                    table: "evidence".to_string(),
                    id: id.clone(),
                    reason: format!("bad timestamp {created_raw:?}: {e}"),
                })
            })?;
        results.push(Evidence {
            id,
            entity_id,
            kind,
            content,
            created_at,
        });
    }
    Ok(results)
}
