// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed skills parsed from stored records.
//!
//! A record's `type` string picks the params schema. Parsing is the only
//! place the string is interpreted: unknown types fail here with
//! [`SkillforgeError::UnsupportedSkillType`], so the dispatcher can match
//! exhaustively on [`SkillKind`].

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use skillforge_core::{SkillRecord, SkillType, SkillforgeError};

/// Params of a `text_to_sql` skill.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TextToSqlParams {
    /// Database name the SQL engine resolves.
    pub database: String,
    /// Tables the tool may query. Never empty.
    pub tables: Vec<String>,
    /// What the data is about, shown to the agent.
    #[serde(default)]
    pub description: Option<String>,
}

/// Params of a `knowledge_base` skill.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KnowledgeBaseParams {
    /// Knowledge base name, resolved within the skill's project.
    pub source: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// The kind of a skill together with its params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkillKind {
    TextToSql(TextToSqlParams),
    KnowledgeBase(KnowledgeBaseParams),
}

impl SkillKind {
    pub fn skill_type(&self) -> SkillType {
        match self {
            SkillKind::TextToSql(_) => SkillType::TextToSql,
            SkillKind::KnowledgeBase(_) => SkillType::KnowledgeBase,
        }
    }
}

/// A validated skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub project_id: String,
    pub kind: SkillKind,
}

impl TryFrom<&SkillRecord> for Skill {
    type Error = SkillforgeError;

    fn try_from(record: &SkillRecord) -> Result<Self, Self::Error> {
        let skill_type = SkillType::from_str(&record.skill_type).map_err(|_| {
            SkillforgeError::UnsupportedSkillType {
                skill_type: record.skill_type.clone(),
            }
        })?;

        let kind = match skill_type {
            SkillType::TextToSql => {
                let mut params: TextToSqlParams = parse_params(record)?;
                if params.database.trim().is_empty() {
                    return Err(invalid(record, "`database` must not be empty"));
                }
                params.tables.retain(|t| !t.trim().is_empty());
                if params.tables.is_empty() {
                    return Err(invalid(record, "`tables` must list at least one table"));
                }
                params.description = non_blank(params.description);
                SkillKind::TextToSql(params)
            }
            SkillType::KnowledgeBase => {
                let mut params: KnowledgeBaseParams = parse_params(record)?;
                if params.source.trim().is_empty() {
                    return Err(invalid(record, "`source` must not be empty"));
                }
                params.description = non_blank(params.description);
                SkillKind::KnowledgeBase(params)
            }
        };

        Ok(Skill {
            id: record.id.clone(),
            name: record.name.clone(),
            project_id: record.project_id.clone(),
            kind,
        })
    }
}

fn parse_params<T: DeserializeOwned>(record: &SkillRecord) -> Result<T, SkillforgeError> {
    serde_json::from_value(serde_json::Value::Object(record.params.clone()))
        .map_err(|e| invalid(record, &e.to_string()))
}

fn invalid(record: &SkillRecord, message: &str) -> SkillforgeError {
    SkillforgeError::InvalidSkillParams {
        skill: record.name.clone(),
        message: message.to_string(),
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}
