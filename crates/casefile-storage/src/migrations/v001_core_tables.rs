//! v001: entities, relationships, tags, entity_tags, evidence.

use rusqlite::Connection;

use casefile_core::errors::{CaseError, CaseResult, StorageError};

pub fn migrate(conn: &Connection) -> CaseResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS entities (
            id          TEXT PRIMARY KEY,
            entity_type TEXT NOT NULL,
            name        TEXT NOT NULL,
            aliases     TEXT NOT NULL DEFAULT '',
            notes       TEXT NOT NULL DEFAULT '',
            event_date  TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_entities_type_name ON entities(entity_type, name);

        CREATE TABLE IF NOT EXISTS relationships (
            id          TEXT PRIMARY KEY,
            from_id     TEXT NOT NULL,
            to_id       TEXT NOT NULL,
            rel_type    TEXT NOT NULL,
            start_date  TEXT NOT NULL DEFAULT '',
            end_date    TEXT NOT NULL DEFAULT '',
            strength    INTEGER NOT NULL DEFAULT 50,
            notes       TEXT NOT NULL DEFAULT '',
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_relationships_from ON relationships(from_id);
        CREATE INDEX IF NOT EXISTS idx_relationships_to ON relationships(to_id);

        CREATE TABLE IF NOT EXISTS tags (
            id   TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            kind TEXT NOT NULL DEFAULT 'GENERAL'
        );

        CREATE TABLE IF NOT EXISTS entity_tags (
            entity_id TEXT NOT NULL,
            tag_id    TEXT NOT NULL,
            value     TEXT,
            PRIMARY KEY (entity_id, tag_id)
        );

        CREATE INDEX IF NOT EXISTS idx_entity_tags_tag ON entity_tags(tag_id);

        CREATE TABLE IF NOT EXISTS evidence (
            id         TEXT PRIMARY KEY,
            entity_id  TEXT NOT NULL,
            kind       TEXT NOT NULL,
            content    TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_evidence_entity ON evidence(entity_id);
        ",
    )
    .map_err(|e| {
        CaseError::from(StorageError::MigrationFailed {
            version: 1,
            reason: e.to_string(),
        })
    })?;
    Ok(())
}
