// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory skill store.

use skillforge_core::{SkillRecord, SkillStore, SkillforgeError};

#[derive(Debug, Default, Clone)]
pub struct MockSkillStore {
    records: Vec<SkillRecord>,
}

impl MockSkillStore {
    pub fn new(records: Vec<SkillRecord>) -> Self {
        Self { records }
    }
}

impl SkillStore for MockSkillStore {
    fn get(&self, id: &str) -> Result<Option<SkillRecord>, SkillforgeError> {
        Ok(self.records.iter().find(|r| r.id == id).cloned())
    }

    fn get_by_name(
        &self,
        project_id: &str,
        name: &str,
    ) -> Result<Option<SkillRecord>, SkillforgeError> {
        Ok(self
            .records
            .iter()
            .find(|r| r.project_id == project_id && r.name == name)
            .cloned())
    }

    fn list(&self, project_id: Option<&str>) -> Result<Vec<SkillRecord>, SkillforgeError> {
        let mut records: Vec<SkillRecord> = self
            .records
            .iter()
            .filter(|r| project_id.is_none_or(|p| r.project_id == p))
            .cloned()
            .collect();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }
}
