// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge-base controller that records every select.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use skillforge_core::{
    KnowledgeBaseController, KnowledgeBaseRow, KnowledgeBaseTable, QueryResult, Select,
    SkillforgeError,
};

use crate::lock;

/// One select issued against a mock table.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSelect {
    pub knowledge_base: String,
    pub project_id: String,
    pub query: Select,
}

/// Knowledge bases keyed by `(project_id, name)`.
///
/// Tables return their rows in insertion order, truncated to the query's
/// limit; they stand in for a similarity search, so the filter value does
/// not narrow the rows.
#[derive(Default)]
pub struct MockKnowledgeBases {
    tables: HashMap<(String, String), Vec<KnowledgeBaseRow>>,
    failing: bool,
    selects: Arc<Mutex<Vec<RecordedSelect>>>,
}

impl MockKnowledgeBases {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds knowledge base `name` in `project_id` with the given contents.
    pub fn with_knowledge_base(mut self, project_id: &str, name: &str, contents: &[&str]) -> Self {
        let rows = contents
            .iter()
            .enumerate()
            .map(|(i, content)| KnowledgeBaseRow {
                id: i.to_string(),
                content: content.to_string(),
                metadata: None,
            })
            .collect();
        self.tables
            .insert((project_id.to_string(), name.to_string()), rows);
        self
    }

    /// Makes every select fail.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn selects(&self) -> Vec<RecordedSelect> {
        lock(&self.selects).clone()
    }
}

impl KnowledgeBaseController for MockKnowledgeBases {
    fn get_table(
        &self,
        name: &str,
        project_id: &str,
    ) -> Result<Arc<dyn KnowledgeBaseTable>, SkillforgeError> {
        let rows = self
            .tables
            .get(&(project_id.to_string(), name.to_string()))
            .ok_or_else(|| SkillforgeError::not_found("knowledge base", name))?;
        Ok(Arc::new(MockKnowledgeBaseTable {
            name: name.to_string(),
            project_id: project_id.to_string(),
            rows: rows.clone(),
            failing: self.failing,
            selects: Arc::clone(&self.selects),
        }))
    }
}

struct MockKnowledgeBaseTable {
    name: String,
    project_id: String,
    rows: Vec<KnowledgeBaseRow>,
    failing: bool,
    selects: Arc<Mutex<Vec<RecordedSelect>>>,
}

impl KnowledgeBaseTable for MockKnowledgeBaseTable {
    fn name(&self) -> &str {
        &self.name
    }

    fn select(&self, query: &Select) -> Result<QueryResult, SkillforgeError> {
        lock(&self.selects).push(RecordedSelect {
            knowledge_base: self.name.clone(),
            project_id: self.project_id.clone(),
            query: query.clone(),
        });
        if self.failing {
            return Err(SkillforgeError::query("vector store unavailable"));
        }
        let limit = query
            .limit
            .map_or(self.rows.len(), |l| usize::try_from(l).unwrap_or(usize::MAX));
        Ok(QueryResult {
            rows: self.rows.iter().take(limit).cloned().collect(),
        })
    }
}
