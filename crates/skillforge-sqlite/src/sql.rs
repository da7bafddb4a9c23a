// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite SQL engine.
//!
//! Databases are configured by name in the `[databases]` table. Handles are
//! opened read-only and only expose the tables a skill lists. Agent SQL runs
//! under an authorizer that denies reads of any other table.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use rusqlite::hooks::{AuthAction, AuthContext, Authorization};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OptionalExtension};
use skillforge_config::SkillforgeConfig;
use skillforge_core::{SkillforgeError, SqlDatabase, SqlEngine};
use tracing::debug;

use crate::database::{query_err, storage_err, Database};

/// Sample rows shown per table by [`SqlDatabase::table_info`].
const SAMPLE_ROWS: usize = 3;

/// Resolves configured database names to SQLite files.
pub struct SqliteEngine {
    databases: BTreeMap<String, PathBuf>,
}

impl SqliteEngine {
    pub fn new(databases: BTreeMap<String, PathBuf>) -> Self {
        Self { databases }
    }

    pub fn from_config(config: &SkillforgeConfig) -> Self {
        Self::new(
            config
                .databases
                .iter()
                .map(|(name, path)| (name.clone(), PathBuf::from(path)))
                .collect(),
        )
    }

    /// Configured database names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.databases.keys().map(String::as_str).collect()
    }
}

impl SqlEngine for SqliteEngine {
    fn database(
        &self,
        name: &str,
        include_tables: &[String],
    ) -> Result<Arc<dyn SqlDatabase>, SkillforgeError> {
        let path = self
            .databases
            .get(name)
            .ok_or_else(|| SkillforgeError::not_found("database", name))?;
        let database = SqliteDatabase::open(name, path, include_tables)?;
        Ok(Arc::new(database))
    }
}

/// A read-only handle scoped to a fixed set of tables.
pub struct SqliteDatabase {
    name: String,
    tables: Vec<String>,
    db: Database,
}

impl SqliteDatabase {
    /// Opens `path` read-only. Every table in `include_tables` must exist.
    pub fn open(
        name: &str,
        path: &std::path::Path,
        include_tables: &[String],
    ) -> Result<Self, SkillforgeError> {
        let db = Database::open_read_only(path)?;
        let missing: Vec<String> = db.call(|conn| {
            let mut missing = Vec::new();
            for table in include_tables {
                if !table_exists(conn, table)? {
                    missing.push(table.clone());
                }
            }
            Ok(missing)
        })?;
        if !missing.is_empty() {
            return Err(SkillforgeError::not_found("table", missing.join(", ")));
        }

        debug!(database = %name, tables = ?include_tables, "SQL database opened");
        Ok(Self {
            name: name.to_string(),
            tables: include_tables.to_vec(),
            db,
        })
    }

    fn check_scope(&self, table: &str) -> Result<(), SkillforgeError> {
        if self.tables.iter().any(|t| t == table) {
            Ok(())
        } else {
            Err(SkillforgeError::not_found("table", table))
        }
    }
}

impl SqlDatabase for SqliteDatabase {
    fn name(&self) -> &str {
        &self.name
    }

    fn dialect(&self) -> &str {
        "sqlite"
    }

    fn usable_tables(&self) -> Vec<String> {
        let mut tables = self.tables.clone();
        tables.sort();
        tables
    }

    fn table_columns(&self, table: &str) -> Result<Vec<String>, SkillforgeError> {
        self.check_scope(table)?;
        let columns: Vec<String> = self.db.call(|conn| {
            let mut stmt = conn
                .prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")
                .map_err(storage_err)?;
            let columns = stmt
                .query_map([table], |row| row.get(0))
                .map_err(storage_err)?
                .collect::<Result<Vec<String>, _>>()
                .map_err(storage_err)?;
            Ok(columns)
        })?;
        if columns.is_empty() {
            return Err(SkillforgeError::not_found("table", table));
        }
        Ok(columns)
    }

    fn table_info(&self, tables: &[String]) -> Result<String, SkillforgeError> {
        let tables = if tables.is_empty() {
            self.usable_tables()
        } else {
            tables.to_vec()
        };
        for table in &tables {
            self.check_scope(table)?;
        }

        self.db.call(|conn| {
            let mut sections = Vec::with_capacity(tables.len());
            for table in &tables {
                sections.push(describe_table(conn, table)?);
            }
            Ok(sections.join("\n\n"))
        })
    }

    fn run(&self, sql: &str) -> Result<String, SkillforgeError> {
        debug!(database = %self.name, sql = %sql, "running SQL");
        let scope = self.tables.clone();
        self.db.call(|conn| {
            conn.authorizer(Some(move |ctx: AuthContext<'_>| authorize(&scope, ctx)));
            let result = run_scoped(conn, sql);
            conn.authorizer(None::<fn(AuthContext<'_>) -> Authorization>);
            result
        })
    }
}

/// Allows reads of scoped tables and of views or triggers the scope names.
/// Pragmas and attaching other files are denied outright.
fn authorize(scope: &[String], ctx: AuthContext<'_>) -> Authorization {
    let in_scope = |name: &str| scope.iter().any(|t| t.eq_ignore_ascii_case(name));
    match ctx.action {
        AuthAction::Read { table_name, .. } => {
            if in_scope(table_name) || ctx.accessor.is_some_and(in_scope) {
                Authorization::Allow
            } else {
                Authorization::Deny
            }
        }
        AuthAction::Pragma { .. } | AuthAction::Attach { .. } => Authorization::Deny,
        _ => Authorization::Allow,
    }
}

fn run_scoped(conn: &Connection, sql: &str) -> Result<String, SkillforgeError> {
    let mut stmt = conn.prepare(sql).map_err(query_err)?;
    let column_count = stmt.column_count();
    if column_count == 0 {
        stmt.execute([]).map_err(query_err)?;
        return Ok(String::new());
    }

    let mut rows = stmt.query([]).map_err(query_err)?;
    let mut rendered = Vec::new();
    while let Some(row) = rows.next().map_err(query_err)? {
        let mut values = Vec::with_capacity(column_count);
        for i in 0..column_count {
            values.push(render_value(row.get_ref(i).map_err(query_err)?));
        }
        rendered.push(render_tuple(&values));
    }

    if rendered.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!("[{}]", rendered.join(", ")))
    }
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool, SkillforgeError> {
    conn.query_row(
        "SELECT 1 FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
        [table],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
    .map_err(storage_err)
}

/// DDL plus a few sample rows in a comment block.
fn describe_table(conn: &Connection, table: &str) -> Result<String, SkillforgeError> {
    let ddl: String = conn
        .query_row(
            "SELECT sql FROM sqlite_master WHERE name = ?1",
            [table],
            |row| row.get(0),
        )
        .map_err(storage_err)?;

    let mut stmt = conn
        .prepare(&format!(
            "SELECT * FROM {} LIMIT {SAMPLE_ROWS}",
            quote_identifier(table)
        ))
        .map_err(storage_err)?;
    let header = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect::<Vec<_>>()
        .join("\t");
    let column_count = stmt.column_count();

    let mut sample = Vec::new();
    let mut rows = stmt.query([]).map_err(storage_err)?;
    while let Some(row) = rows.next().map_err(storage_err)? {
        let mut values = Vec::with_capacity(column_count);
        for i in 0..column_count {
            values.push(render_plain(row.get_ref(i).map_err(storage_err)?));
        }
        sample.push(values.join("\t"));
    }

    let mut out = format!("{}\n\n/*\n", ddl.trim());
    let _ = writeln!(out, "{} rows from {table} table:", sample.len());
    let _ = writeln!(out, "{header}");
    for line in sample {
        let _ = writeln!(out, "{line}");
    }
    out.push_str("*/");
    Ok(out)
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// `(1, 'a')`, with the trailing comma for single values: `(1,)`.
fn render_tuple(values: &[String]) -> String {
    if values.len() == 1 {
        format!("({},)", values[0])
    } else {
        format!("({})", values.join(", "))
    }
}

/// Renders a value the way the agent expects to read it back in a result
/// list: quoted text, `None` for NULL.
fn render_value(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "None".to_string(),
        ValueRef::Integer(n) => n.to_string(),
        ValueRef::Real(f) => render_real(f),
        ValueRef::Text(bytes) => {
            let text = String::from_utf8_lossy(bytes);
            format!("'{}'", text.replace('\\', "\\\\").replace('\'', "\\'"))
        }
        ValueRef::Blob(bytes) => {
            let mut out = String::from("b'");
            for b in bytes {
                if (b.is_ascii_graphic() && *b != b'\'' && *b != b'\\') || *b == b' ' {
                    out.push(*b as char);
                } else {
                    let _ = write!(out, "\\x{b:02x}");
                }
            }
            out.push('\'');
            out
        }
    }
}

/// Unquoted rendering for sample rows.
fn render_plain(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => "None".to_string(),
        ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        ValueRef::Blob(bytes) => format!("<{} bytes>", bytes.len()),
        other => render_value(other),
    }
}

fn render_real(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        f.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn shop() -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shop.db");
        Connection::open(&path)
            .unwrap()
            .execute_batch(
                "CREATE TABLE orders (id INTEGER PRIMARY KEY, customer TEXT, total REAL);
                 INSERT INTO orders VALUES (1, 'ada', 12.5), (2, 'bob', 3.0), (3, NULL, 7.25),
                                           (4, 'o''hara', 1.0);
                 CREATE TABLE secrets (token TEXT);
                 INSERT INTO secrets VALUES ('hunter2');",
            )
            .unwrap();
        (dir, path)
    }

    fn engine(path: &std::path::Path) -> SqliteEngine {
        SqliteEngine::new(BTreeMap::from([("shop".to_string(), path.to_path_buf())]))
    }

    fn orders(path: &std::path::Path) -> Arc<dyn SqlDatabase> {
        engine(path)
            .database("shop", &["orders".to_string()])
            .unwrap()
    }

    #[test]
    fn unknown_database_is_not_found() {
        let (_dir, path) = shop();
        let err = engine(&path).database("warehouse", &[]).err().unwrap();
        assert_eq!(err.to_string(), "database not found: warehouse");
    }

    #[test]
    fn unknown_table_is_not_found() {
        let (_dir, path) = shop();
        let err = engine(&path)
            .database("shop", &["orders".into(), "ghosts".into()])
            .err()
            .unwrap();
        assert_eq!(err.to_string(), "table not found: ghosts");
    }

    #[test]
    fn columns_follow_declaration_order() {
        let (_dir, path) = shop();
        let db = orders(&path);
        assert_eq!(db.name(), "shop");
        assert_eq!(db.dialect(), "sqlite");
        assert_eq!(
            db.table_columns("orders").unwrap(),
            vec!["id", "customer", "total"]
        );
    }

    #[test]
    fn columns_outside_scope_are_not_found() {
        let (_dir, path) = shop();
        let err = orders(&path).table_columns("secrets").unwrap_err();
        assert!(matches!(err, SkillforgeError::NotFound { .. }));
    }

    #[test]
    fn run_renders_rows_as_tuples() {
        let (_dir, path) = shop();
        let db = orders(&path);
        assert_eq!(
            db.run("SELECT id, customer, total FROM orders ORDER BY id").unwrap(),
            "[(1, 'ada', 12.5), (2, 'bob', 3.0), (3, None, 7.25), (4, 'o\\'hara', 1.0)]"
        );
        assert_eq!(db.run("SELECT count(*) FROM orders").unwrap(), "[(4,)]");
    }

    #[test]
    fn run_with_no_rows_is_empty() {
        let (_dir, path) = shop();
        let db = orders(&path);
        assert_eq!(db.run("SELECT * FROM orders WHERE id > 100").unwrap(), "");
    }

    #[test]
    fn run_no_throw_returns_error_text() {
        let (_dir, path) = shop();
        let db = orders(&path);
        let text = db.run_no_throw("SELEC * FRM orders");
        assert!(text.starts_with("Error: "), "got: {text}");
        assert!(text.contains("syntax error"), "got: {text}");
    }

    #[test]
    fn writes_are_rejected() {
        let (_dir, path) = shop();
        let db = orders(&path);
        let text = db.run_no_throw("DELETE FROM orders");
        assert!(text.starts_with("Error: "), "got: {text}");
        assert_eq!(db.run("SELECT count(*) FROM orders").unwrap(), "[(4,)]");
    }

    #[test]
    fn run_denies_tables_outside_scope() {
        let (_dir, path) = shop();
        let db = orders(&path);
        assert!(db.run("SELECT token FROM secrets").is_err());
        for sql in [
            "SELECT * FROM secrets",
            "SELECT id, (SELECT token FROM secrets) FROM orders",
            "SELECT o.id FROM orders o JOIN secrets s ON s.token = o.customer",
            "SELECT name FROM sqlite_master",
            "PRAGMA table_info(secrets)",
        ] {
            let text = db.run_no_throw(sql);
            assert!(text.starts_with("Error: "), "{sql} got: {text}");
            assert!(!text.contains("hunter2"), "{sql} got: {text}");
        }
    }

    #[test]
    fn scoped_reads_still_work_after_a_denial() {
        let (_dir, path) = shop();
        let db = orders(&path);
        assert!(db.run("SELECT token FROM secrets").is_err());
        assert_eq!(db.run("SELECT count(*) FROM orders").unwrap(), "[(4,)]");
        assert_eq!(db.table_columns("orders").unwrap().len(), 3);
        assert!(db.table_info(&[]).unwrap().contains("CREATE TABLE orders"));
    }

    #[test]
    fn table_info_has_ddl_and_samples() {
        let (_dir, path) = shop();
        let info = orders(&path).table_info(&["orders".to_string()]).unwrap();
        assert!(info.starts_with("CREATE TABLE orders"), "got: {info}");
        assert!(info.contains("3 rows from orders table:"));
        assert!(info.contains("id\tcustomer\ttotal"));
        assert!(info.contains("1\tada\t12.5"));
        assert!(info.trim_end().ends_with("*/"));
    }

    #[test]
    fn table_info_defaults_to_all_scoped_tables() {
        let (_dir, path) = shop();
        let info = orders(&path).table_info(&[]).unwrap();
        assert!(info.contains("CREATE TABLE orders"));
        assert!(!info.contains("secrets"));
    }

    #[test]
    fn from_config_uses_databases_table() {
        let mut config = SkillforgeConfig::default();
        config
            .databases
            .insert("shop".into(), "/tmp/shop.db".into());
        let engine = SqliteEngine::from_config(&config);
        assert_eq!(engine.names(), vec!["shop"]);
    }

    #[test]
    fn real_rendering_keeps_decimal_point() {
        assert_eq!(render_real(3.0), "3.0");
        assert_eq!(render_real(0.25), "0.25");
        assert_eq!(render_value(ValueRef::Blob(b"a\x00")), "b'a\\x00'");
    }
}
