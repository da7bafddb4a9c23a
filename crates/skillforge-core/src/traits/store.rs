// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read access to persisted skills.

use crate::error::SkillforgeError;
use crate::types::SkillRecord;

/// Read-only access to skill records.
pub trait SkillStore: Send + Sync {
    /// Looks up a skill by its identifier.
    fn get(&self, id: &str) -> Result<Option<SkillRecord>, SkillforgeError>;

    /// Looks up a skill by name within a project.
    fn get_by_name(
        &self,
        project_id: &str,
        name: &str,
    ) -> Result<Option<SkillRecord>, SkillforgeError>;

    /// Lists skills, optionally restricted to one project, ordered by name.
    fn list(&self, project_id: Option<&str>) -> Result<Vec<SkillRecord>, SkillforgeError>;
}
