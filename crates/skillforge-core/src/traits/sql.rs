// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQL execution traits.

use std::sync::Arc;

use crate::error::SkillforgeError;

/// Resolves named databases into handles scoped to a set of tables.
pub trait SqlEngine: Send + Sync {
    /// Returns a handle to `name` that only exposes `include_tables`.
    fn database(
        &self,
        name: &str,
        include_tables: &[String],
    ) -> Result<Arc<dyn SqlDatabase>, SkillforgeError>;
}

/// A database handle scoped to a fixed table set.
pub trait SqlDatabase: Send + Sync {
    /// Name of the database this handle points at.
    fn name(&self) -> &str;

    /// SQL dialect spoken by the backend (e.g. `sqlite`).
    fn dialect(&self) -> &str;

    /// Tables visible through this handle.
    fn usable_tables(&self) -> Vec<String>;

    /// Column names of `table`, in declaration order.
    fn table_columns(&self, table: &str) -> Result<Vec<String>, SkillforgeError>;

    /// Schema and sample rows for the given tables, as text for an LLM.
    fn table_info(&self, tables: &[String]) -> Result<String, SkillforgeError>;

    /// Runs `sql` and renders the result rows as text.
    fn run(&self, sql: &str) -> Result<String, SkillforgeError>;

    /// Runs `sql`, rendering any failure as an `Error: ...` string.
    fn run_no_throw(&self, sql: &str) -> String {
        match self.run(sql) {
            Ok(text) => text,
            Err(e) => format!("Error: {e}"),
        }
    }
}
