// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Skillforge.
//!
//! Mock collaborators that record what they were asked and answer from
//! pre-configured data, so factory and tool tests run without SQLite or a
//! model.
//!
//! # Components
//!
//! - [`MockSqlEngine`] / [`MockSqlDatabase`] - scripted SQL results and column lists
//! - [`MockKnowledgeBases`] - knowledge-base tables that log every select
//! - [`MockLanguageModel`] - FIFO completions
//! - [`MockSkillStore`] - in-memory skill records
//! - [`fixtures`] - skill record builders

pub mod fixtures;
pub mod mock_knowledge_base;
pub mod mock_llm;
pub mod mock_sql;
pub mod mock_store;

pub use mock_knowledge_base::{MockKnowledgeBases, RecordedSelect};
pub use mock_llm::MockLanguageModel;
pub use mock_sql::{MockSqlDatabase, MockSqlEngine};
pub use mock_store::MockSkillStore;

use std::sync::{Mutex, MutexGuard};

/// Locks a mock's log, ignoring poisoning from a panicking test thread.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
