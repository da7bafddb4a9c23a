// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the skill store, the factories and the backends.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The skill types that can be turned into tools.
///
/// Records carry their type as a free-form string; this enum is the set the
/// dispatcher understands. Parsing an unknown string fails, which is how
/// unsupported types are rejected.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    TextToSql,
    KnowledgeBase,
}

/// A persisted skill exactly as the store hands it back.
///
/// `params` is untyped here; its schema depends on `skill_type` and is
/// checked when the record is turned into a typed skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub skill_type: String,
    #[serde(default)]
    pub params: serde_json::Map<String, serde_json::Value>,
    pub project_id: String,
}

impl SkillRecord {
    /// Returns a string param, or `None` if absent or not a string.
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(|v| v.as_str())
    }
}

/// One row returned from a knowledge-base table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeBaseRow {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn skill_type_round_trips_through_strings() {
        for variant in [SkillType::TextToSql, SkillType::KnowledgeBase] {
            let s = variant.to_string();
            assert_eq!(SkillType::from_str(&s).unwrap(), variant);
        }
        assert_eq!(SkillType::TextToSql.to_string(), "text_to_sql");
        assert_eq!(SkillType::KnowledgeBase.to_string(), "knowledge_base");
    }

    #[test]
    fn skill_type_rejects_unknown_strings() {
        assert!(SkillType::from_str("foo").is_err());
    }

    #[test]
    fn skill_record_deserializes_type_field() {
        let record: SkillRecord = serde_json::from_value(serde_json::json!({
            "id": "1",
            "name": "sales",
            "type": "text_to_sql",
            "params": {"database": "shop", "tables": ["orders"]},
            "project_id": "p1"
        }))
        .unwrap();
        assert_eq!(record.skill_type, "text_to_sql");
        assert_eq!(record.param_str("database"), Some("shop"));
        assert_eq!(record.param_str("tables"), None);
    }
}
