// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite knowledge bases backed by FTS5.
//!
//! Chunks of every knowledge base live in one FTS5 table, tagged with their
//! project and knowledge base. A content-equality select is answered as an
//! FTS5 match of the question's terms, ranked by bm25.

use std::sync::Arc;

use rusqlite::{params, OptionalExtension};
use skillforge_core::{
    KnowledgeBaseController, KnowledgeBaseRow, KnowledgeBaseTable, QueryResult, Select,
    SkillforgeError, TableField, Target,
};
use tracing::debug;

use crate::database::{storage_err, Database};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS knowledge_bases (
    project_id TEXT NOT NULL,
    name TEXT NOT NULL,
    created_at TEXT NOT NULL,
    PRIMARY KEY (project_id, name)
);
CREATE VIRTUAL TABLE IF NOT EXISTS knowledge_base_chunks USING fts5(
    content,
    project_id UNINDEXED,
    kb_name UNINDEXED,
    chunk_id UNINDEXED,
    metadata UNINDEXED
);
";

/// Knowledge-base controller over a SQLite database.
#[derive(Clone)]
pub struct SqliteKnowledgeBases {
    db: Database,
}

impl SqliteKnowledgeBases {
    /// Wraps `db`, creating the knowledge-base tables if needed.
    pub fn new(db: Database) -> Result<Self, SkillforgeError> {
        db.call(|conn| conn.execute_batch(SCHEMA).map_err(storage_err))?;
        Ok(Self { db })
    }

    /// Creates an empty knowledge base. Creating an existing one is a no-op.
    pub fn create_knowledge_base(&self, project_id: &str, name: &str) -> Result<(), SkillforgeError> {
        let created_at = chrono::Utc::now().to_rfc3339();
        self.db.call(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO knowledge_bases (project_id, name, created_at) VALUES (?1, ?2, ?3)",
                params![project_id, name, created_at],
            )
            .map_err(storage_err)?;
            Ok(())
        })?;
        debug!(project = %project_id, knowledge_base = %name, "knowledge base created");
        Ok(())
    }

    /// Adds one chunk to an existing knowledge base.
    pub fn insert_chunk(
        &self,
        project_id: &str,
        name: &str,
        chunk_id: &str,
        content: &str,
        metadata: Option<&serde_json::Value>,
    ) -> Result<(), SkillforgeError> {
        let metadata = metadata.map(serde_json::Value::to_string);
        self.db.call(|conn| {
            if !knowledge_base_exists(conn, project_id, name)? {
                return Err(SkillforgeError::not_found("knowledge base", name));
            }
            conn.execute(
                "INSERT INTO knowledge_base_chunks (content, project_id, kb_name, chunk_id, metadata) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![content, project_id, name, chunk_id, metadata],
            )
            .map_err(storage_err)?;
            Ok(())
        })
    }

    /// Knowledge base names in a project, sorted.
    pub fn list(&self, project_id: &str) -> Result<Vec<String>, SkillforgeError> {
        self.db.call(|conn| {
            let mut stmt = conn
                .prepare("SELECT name FROM knowledge_bases WHERE project_id = ?1 ORDER BY name")
                .map_err(storage_err)?;
            let names = stmt
                .query_map([project_id], |row| row.get(0))
                .map_err(storage_err)?
                .collect::<Result<Vec<String>, _>>()
                .map_err(storage_err)?;
            Ok(names)
        })
    }
}

impl KnowledgeBaseController for SqliteKnowledgeBases {
    fn get_table(
        &self,
        name: &str,
        project_id: &str,
    ) -> Result<Arc<dyn KnowledgeBaseTable>, SkillforgeError> {
        let exists = self
            .db
            .call(|conn| knowledge_base_exists(conn, project_id, name))?;
        if !exists {
            return Err(SkillforgeError::not_found("knowledge base", name));
        }
        Ok(Arc::new(SqliteKnowledgeBaseTable {
            name: name.to_string(),
            project_id: project_id.to_string(),
            db: self.db.clone(),
        }))
    }
}

fn knowledge_base_exists(
    conn: &rusqlite::Connection,
    project_id: &str,
    name: &str,
) -> Result<bool, SkillforgeError> {
    conn.query_row(
        "SELECT 1 FROM knowledge_bases WHERE project_id = ?1 AND name = ?2",
        params![project_id, name],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
    .map_err(storage_err)
}

struct SqliteKnowledgeBaseTable {
    name: String,
    project_id: String,
    db: Database,
}

impl KnowledgeBaseTable for SqliteKnowledgeBaseTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn select(&self, query: &Select) -> Result<QueryResult, SkillforgeError> {
        check_targets(query)?;
        let limit = query
            .limit
            .map_or(-1, |l| i64::try_from(l).unwrap_or(i64::MAX));

        let rows = match (&query.filter, query.content_filter()) {
            (None, _) => self.db.call(|conn| {
                collect_rows(
                    conn,
                    "SELECT chunk_id, content, metadata FROM knowledge_base_chunks \
                     WHERE project_id = ?1 AND kb_name = ?2 ORDER BY rowid LIMIT ?3",
                    params![self.project_id, self.name, limit],
                )
            })?,
            (Some(_), Some(text)) => {
                let Some(expr) = match_expression(text) else {
                    return Ok(QueryResult::default());
                };
                self.db.call(|conn| {
                    collect_rows(
                        conn,
                        "SELECT chunk_id, content, metadata FROM knowledge_base_chunks \
                         WHERE knowledge_base_chunks MATCH ?1 AND project_id = ?2 AND kb_name = ?3 \
                         ORDER BY rank LIMIT ?4",
                        params![expr, self.project_id, self.name, limit],
                    )
                })?
            }
            (Some(_), None) => {
                return Err(SkillforgeError::query(format!(
                    "unsupported knowledge base query: {query}"
                )))
            }
        };

        debug!(
            knowledge_base = %self.name,
            project = %self.project_id,
            rows = rows.len(),
            "knowledge base select"
        );
        Ok(QueryResult { rows })
    }
}

fn check_targets(query: &Select) -> Result<(), SkillforgeError> {
    for target in &query.targets {
        if let Target::Column(column) = target {
            if column.parse::<TableField>().is_err() {
                return Err(SkillforgeError::query(format!(
                    "unknown knowledge base column: {column}"
                )));
            }
        }
    }
    Ok(())
}

/// FTS5 expression matching any term of `text`, each term quoted so FTS5
/// syntax in the question is taken literally. `None` when `text` has no
/// terms.
fn match_expression(text: &str) -> Option<String> {
    let terms: Vec<String> = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| format!("\"{t}\""))
        .collect();
    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" OR "))
    }
}

fn collect_rows(
    conn: &rusqlite::Connection,
    sql: &str,
    params: &[&dyn rusqlite::ToSql],
) -> Result<Vec<KnowledgeBaseRow>, SkillforgeError> {
    let mut stmt = conn.prepare(sql).map_err(storage_err)?;
    let rows = stmt
        .query_map(params, |row| {
            let metadata: Option<String> = row.get(2)?;
            Ok(KnowledgeBaseRow {
                id: row.get(0)?,
                content: row.get(1)?,
                metadata: metadata.and_then(|m| serde_json::from_str(&m).ok()),
            })
        })
        .map_err(storage_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(storage_err)?;
    Ok(rows)
}
