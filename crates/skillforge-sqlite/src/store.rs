// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite skill store.

use rusqlite::{params, OptionalExtension};
use skillforge_core::{SkillRecord, SkillStore, SkillforgeError};
use tracing::debug;

use crate::database::{storage_err, Database};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS skills (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    type TEXT NOT NULL,
    params TEXT NOT NULL DEFAULT '{}',
    project_id TEXT NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE (project_id, name)
);
";

const COLUMNS: &str = "id, name, type, params, project_id";

/// Persistent skill records.
///
/// `params` is stored as a JSON object; the `type` column is free text so
/// records of types no factory understands can still be stored and listed.
#[derive(Clone)]
pub struct SqliteSkillStore {
    db: Database,
}

impl SqliteSkillStore {
    /// Wraps `db`, creating the `skills` table if needed.
    pub fn new(db: Database) -> Result<Self, SkillforgeError> {
        db.call(|conn| conn.execute_batch(SCHEMA).map_err(storage_err))?;
        Ok(Self { db })
    }

    /// Inserts a record, or replaces the one with the same id.
    pub fn save(&self, record: &SkillRecord) -> Result<(), SkillforgeError> {
        let params_json = serde_json::Value::Object(record.params.clone()).to_string();
        let created_at = chrono::Utc::now().to_rfc3339();
        self.db.call(|conn| {
            conn.execute(
                "INSERT INTO skills (id, name, type, params, project_id, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6) \
                 ON CONFLICT(id) DO UPDATE SET \
                 name = excluded.name, type = excluded.type, \
                 params = excluded.params, project_id = excluded.project_id",
                params![
                    record.id,
                    record.name,
                    record.skill_type,
                    params_json,
                    record.project_id,
                    created_at
                ],
            )
            .map_err(storage_err)?;
            Ok(())
        })?;
        debug!(skill = %record.name, skill_type = %record.skill_type, "skill saved");
        Ok(())
    }

    /// Deletes a record, returning whether it existed.
    pub fn delete(&self, id: &str) -> Result<bool, SkillforgeError> {
        self.db.call(|conn| {
            let changed = conn
                .execute("DELETE FROM skills WHERE id = ?1", [id])
                .map_err(storage_err)?;
            Ok(changed > 0)
        })
    }
}

impl SkillStore for SqliteSkillStore {
    fn get(&self, id: &str) -> Result<Option<SkillRecord>, SkillforgeError> {
        self.db.call(|conn| {
            let raw = conn
                .query_row(
                    &format!("SELECT {COLUMNS} FROM skills WHERE id = ?1"),
                    [id],
                    RawRecord::from_row,
                )
                .optional()
                .map_err(storage_err)?;
            raw.map(RawRecord::into_record).transpose()
        })
    }

    fn get_by_name(
        &self,
        project_id: &str,
        name: &str,
    ) -> Result<Option<SkillRecord>, SkillforgeError> {
        self.db.call(|conn| {
            let raw = conn
                .query_row(
                    &format!("SELECT {COLUMNS} FROM skills WHERE project_id = ?1 AND name = ?2"),
                    params![project_id, name],
                    RawRecord::from_row,
                )
                .optional()
                .map_err(storage_err)?;
            raw.map(RawRecord::into_record).transpose()
        })
    }

    fn list(&self, project_id: Option<&str>) -> Result<Vec<SkillRecord>, SkillforgeError> {
        self.db.call(|conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT {COLUMNS} FROM skills \
                     WHERE ?1 IS NULL OR project_id = ?1 \
                     ORDER BY project_id, name"
                ))
                .map_err(storage_err)?;
            let raws = stmt
                .query_map([project_id], RawRecord::from_row)
                .map_err(storage_err)?
                .collect::<Result<Vec<_>, _>>()
                .map_err(storage_err)?;
            raws.into_iter().map(RawRecord::into_record).collect()
        })
    }
}

/// A `skills` row before its params JSON is parsed.
struct RawRecord {
    id: String,
    name: String,
    skill_type: String,
    params: String,
    project_id: String,
}

impl RawRecord {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            skill_type: row.get(2)?,
            params: row.get(3)?,
            project_id: row.get(4)?,
        })
    }

    fn into_record(self) -> Result<SkillRecord, SkillforgeError> {
        let params = match serde_json::from_str(&self.params) {
            Ok(serde_json::Value::Object(map)) => map,
            Ok(other) => {
                return Err(SkillforgeError::Storage {
                    source: format!("params of skill {} is not an object: {other}", self.id)
                        .into(),
                })
            }
            Err(e) => {
                return Err(SkillforgeError::Storage {
                    source: Box::new(e),
                })
            }
        };
        Ok(SkillRecord {
            id: self.id,
            name: self.name,
            skill_type: self.skill_type,
            params,
            project_id: self.project_id,
        })
    }
}
