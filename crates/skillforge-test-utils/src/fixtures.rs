// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Skill record builders.

use serde_json::json;
use skillforge_core::SkillRecord;

/// Project every fixture record belongs to.
pub const PROJECT_ID: &str = "proj-1";

/// A record with arbitrary type and params.
pub fn skill_record(name: &str, skill_type: &str, params: serde_json::Value) -> SkillRecord {
    SkillRecord {
        id: format!("{name}-id"),
        name: name.to_string(),
        skill_type: skill_type.to_string(),
        params: params.as_object().cloned().unwrap_or_default(),
        project_id: PROJECT_ID.to_string(),
    }
}

/// A `text_to_sql` record over `database` and `tables`.
pub fn text_to_sql_record(
    name: &str,
    database: &str,
    tables: &[&str],
    description: Option<&str>,
) -> SkillRecord {
    let mut params = json!({ "database": database, "tables": tables });
    if let Some(description) = description {
        params["description"] = json!(description);
    }
    skill_record(name, "text_to_sql", params)
}

/// A `knowledge_base` record reading from `source`.
pub fn knowledge_base_record(name: &str, source: &str, description: Option<&str>) -> SkillRecord {
    let mut params = json!({ "source": source });
    if let Some(description) = description {
        params["description"] = json!(description);
    }
    skill_record(name, "knowledge_base", params)
}
