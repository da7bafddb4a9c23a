// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence and query backends for Skillforge.
//!
//! - [`SqliteEngine`] / [`SqliteDatabase`] run agent SQL against configured
//!   SQLite files, read-only and scoped to a skill's tables
//! - [`SqliteKnowledgeBases`] stores knowledge-base chunks in an FTS5 table
//!   and answers content queries ranked by bm25
//! - [`SqliteSkillStore`] persists skill records
//!
//! Every backend is synchronous and guards its connection with a mutex;
//! the tools call them from blocking threads.

pub mod database;
pub mod knowledge_base;
pub mod sql;
pub mod store;

pub use database::Database;
pub use knowledge_base::SqliteKnowledgeBases;
pub use sql::{SqliteDatabase, SqliteEngine};
pub use store::SqliteSkillStore;
