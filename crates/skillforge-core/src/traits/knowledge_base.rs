// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge-base traits.

use std::sync::Arc;

use crate::error::SkillforgeError;
use crate::query::{QueryResult, Select};

/// Resolves knowledge-base tables by name within a project.
pub trait KnowledgeBaseController: Send + Sync {
    /// Returns the table for knowledge base `name` in `project_id`.
    ///
    /// Fails with [`SkillforgeError::NotFound`] when the project has no
    /// knowledge base of that name.
    fn get_table(
        &self,
        name: &str,
        project_id: &str,
    ) -> Result<Arc<dyn KnowledgeBaseTable>, SkillforgeError>;
}

/// A queryable knowledge-base table.
pub trait KnowledgeBaseTable: Send + Sync {
    fn name(&self) -> &str;

    /// Executes a structured select and returns the matching rows.
    fn select(&self, query: &Select) -> Result<QueryResult, SkillforgeError>;
}
