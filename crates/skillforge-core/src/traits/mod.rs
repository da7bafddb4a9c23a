// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits the tool factories are built against.
//!
//! Every trait here fronts an external system: SQL execution, knowledge-base
//! retrieval, skill persistence and the language model. The SQL, knowledge
//! base and store traits are synchronous so tool construction never
//! suspends; tools move their calls onto blocking threads at invocation time.

pub mod knowledge_base;
pub mod llm;
pub mod sql;
pub mod store;

pub use knowledge_base::{KnowledgeBaseController, KnowledgeBaseTable};
pub use llm::LanguageModel;
pub use sql::{SqlDatabase, SqlEngine};
pub use store::SkillStore;
