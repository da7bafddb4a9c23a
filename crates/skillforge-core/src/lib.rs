// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Skillforge.
//!
//! This crate provides the error type, the persisted skill record, the
//! structured query representation handed to knowledge bases, and the
//! collaborator traits (SQL engine, knowledge-base controller, skill store,
//! language model) that the tool factories are built against.

pub mod error;
pub mod query;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::SkillforgeError;
pub use query::{BinaryOperation, Constant, Operator, QueryResult, Select, TableField, Target};
pub use types::{KnowledgeBaseRow, SkillRecord, SkillType};

// Re-export all collaborator traits at crate root.
pub use traits::{
    KnowledgeBaseController, KnowledgeBaseTable, LanguageModel, SkillStore, SqlDatabase,
    SqlEngine,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skillforge_error_has_all_variants() {
        let _config = SkillforgeError::Config("test".into());
        let _storage = SkillforgeError::Storage {
            source: Box::new(std::io::Error::other("test")),
        };
        let _unsupported = SkillforgeError::UnsupportedSkillType {
            skill_type: "foo".into(),
        };
        let _params = SkillforgeError::InvalidSkillParams {
            skill: "sales".into(),
            message: "missing tables".into(),
        };
        let _capability = SkillforgeError::MissingCapability {
            capability: "agent tools".into(),
            hint: "enable it".into(),
        };
        let _not_found = SkillforgeError::NotFound {
            kind: "knowledge base".into(),
            name: "docs".into(),
        };
        let _query = SkillforgeError::Query {
            message: "test".into(),
            source: None,
        };
        let _tool = SkillforgeError::Tool {
            message: "test".into(),
            source: None,
        };
        let _provider = SkillforgeError::Provider {
            message: "test".into(),
            source: None,
        };
        let _internal = SkillforgeError::Internal("test".into());
    }

    #[test]
    fn all_collaborator_traits_are_exported() {
        fn _assert_sql_engine<T: SqlEngine>() {}
        fn _assert_sql_database<T: SqlDatabase>() {}
        fn _assert_kb_controller<T: KnowledgeBaseController>() {}
        fn _assert_kb_table<T: KnowledgeBaseTable>() {}
        fn _assert_skill_store<T: SkillStore>() {}
        fn _assert_language_model<T: LanguageModel>() {}
    }
}
