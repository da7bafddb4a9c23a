// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.
//!
//! Every command returns the text to print so the output can be asserted in
//! tests without capturing stdout.

use std::fmt::Write as _;
use std::sync::Arc;

use skillforge_config::SkillforgeConfig;
use skillforge_core::{SkillRecord, SkillStore, SkillforgeError, SqlEngine};
use skillforge_skill::{make_tools_from_skill, ToolContext, ToolOutput, ToolRegistry};
use skillforge_sqlite::{Database, SqliteEngine, SqliteKnowledgeBases, SqliteSkillStore};
use tracing::{debug, info};

/// Stores and collaborators opened from configuration.
pub struct App {
    config: SkillforgeConfig,
    store: SqliteSkillStore,
    knowledge_bases: SqliteKnowledgeBases,
    engine: Arc<dyn SqlEngine>,
}

impl App {
    /// Opens the skill store and knowledge bases at `storage.database_path`.
    pub fn open(config: SkillforgeConfig) -> Result<Self, SkillforgeError> {
        let db = Database::open(&config.storage.database_path)?;
        let store = SqliteSkillStore::new(db.clone())?;
        let knowledge_bases = SqliteKnowledgeBases::new(db)?;
        let engine: Arc<dyn SqlEngine> = Arc::new(SqliteEngine::from_config(&config));
        info!(
            path = %config.storage.database_path,
            databases = config.databases.len(),
            "skill store opened"
        );
        Ok(Self {
            config,
            store,
            knowledge_bases,
            engine,
        })
    }

    fn context(&self) -> ToolContext {
        ToolContext::from_config(
            &self.config,
            Arc::clone(&self.engine),
            Arc::new(self.knowledge_bases.clone()),
        )
    }

    /// Finds a skill by name within `project`, or by id without one.
    pub fn resolve_skill(
        &self,
        skill: &str,
        project: Option<&str>,
    ) -> Result<SkillRecord, SkillforgeError> {
        let found = match project {
            Some(project) => self.store.get_by_name(project, skill)?,
            None => self.store.get(skill)?,
        };
        found.ok_or_else(|| SkillforgeError::not_found("skill", skill))
    }

    /// One line per skill: id, project, name, type.
    pub fn list_skills(&self, project: Option<&str>) -> Result<String, SkillforgeError> {
        let mut out = String::new();
        for record in self.store.list(project)? {
            let _ = writeln!(
                out,
                "{}\t{}\t{}\t{}",
                record.id, record.project_id, record.name, record.skill_type
            );
        }
        Ok(out)
    }

    /// Names and descriptions of the tools built from a skill.
    pub fn describe_tools(
        &self,
        skill: &str,
        project: Option<&str>,
    ) -> Result<String, SkillforgeError> {
        let registry = self.registry(skill, project)?;
        let mut out = String::new();
        for (name, description) in registry.list() {
            let _ = writeln!(out, "{name}");
            for line in description.lines() {
                let _ = writeln!(out, "    {line}");
            }
        }
        Ok(out)
    }

    /// Builds a skill's tools and invokes `tool` with `input`.
    ///
    /// Input that parses as a JSON object is passed through; anything else
    /// is sent as a bare string.
    pub async fn invoke(
        &self,
        skill: &str,
        project: Option<&str>,
        tool: &str,
        input: &str,
    ) -> Result<ToolOutput, SkillforgeError> {
        let registry = self.registry(skill, project)?;
        let tool = registry
            .get(tool)
            .ok_or_else(|| SkillforgeError::not_found("tool", tool))?;

        let input = serde_json::from_str::<serde_json::Value>(input)
            .ok()
            .filter(serde_json::Value::is_object)
            .unwrap_or_else(|| serde_json::Value::String(input.to_string()));
        debug!(tool = %tool.name(), "invoking tool");
        tool.invoke(input).await
    }

    fn registry(&self, skill: &str, project: Option<&str>) -> Result<ToolRegistry, SkillforgeError> {
        let record = self.resolve_skill(skill, project)?;
        let mut registry = ToolRegistry::new();
        for tool in make_tools_from_skill(&record, &self.context())? {
            registry.register(tool);
        }
        Ok(registry)
    }
}

/// The resolved configuration as TOML.
pub fn render_config(config: &SkillforgeConfig) -> Result<String, SkillforgeError> {
    toml::to_string_pretty(config).map_err(|e| SkillforgeError::Config(e.to_string()))
}
