// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted SQL engine and database.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use skillforge_core::{SqlDatabase, SqlEngine, SkillforgeError};

use crate::lock;

/// A database with fixed tables and scripted query results.
///
/// Queries are matched by exact (trimmed) text. Anything unscripted fails
/// the way a SQL engine reports a syntax error.
#[derive(Clone)]
pub struct MockSqlDatabase {
    name: String,
    tables: BTreeMap<String, Vec<String>>,
    results: HashMap<String, String>,
    scope: Vec<String>,
    executed: Arc<Mutex<Vec<String>>>,
    column_lookups: Arc<Mutex<Vec<String>>>,
}

impl MockSqlDatabase {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tables: BTreeMap::new(),
            results: HashMap::new(),
            scope: Vec::new(),
            executed: Arc::new(Mutex::new(Vec::new())),
            column_lookups: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_table(mut self, table: &str, columns: &[&str]) -> Self {
        self.tables.insert(
            table.to_string(),
            columns.iter().map(|c| c.to_string()).collect(),
        );
        self
    }

    pub fn with_result(mut self, sql: &str, result: &str) -> Self {
        self.results.insert(sql.trim().to_string(), result.to_string());
        self
    }

    /// Every statement passed to `run`, in order (shared across scoped copies).
    pub fn executed(&self) -> Vec<String> {
        lock(&self.executed).clone()
    }

    /// Every table whose columns were requested.
    pub fn column_lookups(&self) -> Vec<String> {
        lock(&self.column_lookups).clone()
    }

    fn scoped(&self, include_tables: &[String]) -> Self {
        Self {
            scope: include_tables.to_vec(),
            ..self.clone()
        }
    }

    fn check_scope(&self, table: &str) -> Result<(), SkillforgeError> {
        if self.scope.iter().any(|t| t == table) && self.tables.contains_key(table) {
            Ok(())
        } else {
            Err(SkillforgeError::not_found("table", table))
        }
    }
}

impl SqlDatabase for MockSqlDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    fn dialect(&self) -> &str {
        "mock"
    }

    fn usable_tables(&self) -> Vec<String> {
        self.scope.clone()
    }

    fn table_columns(&self, table: &str) -> Result<Vec<String>, SkillforgeError> {
        lock(&self.column_lookups).push(table.to_string());
        self.check_scope(table)?;
        Ok(self.tables[table].clone())
    }

    fn table_info(&self, tables: &[String]) -> Result<String, SkillforgeError> {
        let tables = if tables.is_empty() {
            self.scope.clone()
        } else {
            tables.to_vec()
        };
        let mut out = Vec::new();
        for table in &tables {
            self.check_scope(table)?;
            out.push(format!(
                "CREATE TABLE {table} ({})",
                self.tables[table].join(", ")
            ));
        }
        Ok(out.join("\n\n"))
    }

    fn run(&self, sql: &str) -> Result<String, SkillforgeError> {
        let sql = sql.trim();
        lock(&self.executed).push(sql.to_string());
        self.results.get(sql).cloned().ok_or_else(|| {
            let token = sql.split_whitespace().next().unwrap_or("");
            SkillforgeError::query(format!("near \"{token}\": syntax error"))
        })
    }
}

/// Engine resolving names to [`MockSqlDatabase`]s.
#[derive(Default)]
pub struct MockSqlEngine {
    databases: HashMap<String, MockSqlDatabase>,
    requests: Mutex<Vec<(String, Vec<String>)>>,
}

impl MockSqlEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(mut self, database: MockSqlDatabase) -> Self {
        self.databases.insert(database.name.clone(), database);
        self
    }

    /// `(database, include_tables)` for every `database()` call.
    pub fn requests(&self) -> Vec<(String, Vec<String>)> {
        lock(&self.requests).clone()
    }
}

impl SqlEngine for MockSqlEngine {
    fn database(
        &self,
        name: &str,
        include_tables: &[String],
    ) -> Result<Arc<dyn SqlDatabase>, SkillforgeError> {
        lock(&self.requests).push((name.to_string(), include_tables.to_vec()));
        let database = self
            .databases
            .get(name)
            .ok_or_else(|| SkillforgeError::not_found("database", name))?;
        Ok(Arc::new(database.scoped(include_tables)))
    }
}
