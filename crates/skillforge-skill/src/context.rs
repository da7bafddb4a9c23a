// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborators handed to every factory.

use std::sync::Arc;

use skillforge_config::{SkillforgeConfig, SqlToolVariant};
use skillforge_core::{KnowledgeBaseController, LanguageModel, SqlEngine};

use crate::capability::Capabilities;

/// Everything a factory needs besides the skill itself.
///
/// Cloning is cheap: collaborators are shared behind `Arc`, and the tools a
/// factory builds keep their own `Arc` clones.
#[derive(Clone)]
pub struct ToolContext {
    pub sql_engine: Arc<dyn SqlEngine>,
    pub knowledge_bases: Arc<dyn KnowledgeBaseController>,
    pub llm: Option<Arc<dyn LanguageModel>>,
    pub capabilities: Capabilities,
    pub sql_variant: SqlToolVariant,
}

impl ToolContext {
    /// Context with every compiled capability and the default SQL variant.
    pub fn new(
        sql_engine: Arc<dyn SqlEngine>,
        knowledge_bases: Arc<dyn KnowledgeBaseController>,
    ) -> Self {
        Self {
            sql_engine,
            knowledge_bases,
            llm: None,
            capabilities: Capabilities::all(),
            sql_variant: SqlToolVariant::default(),
        }
    }

    /// Context whose capabilities and SQL variant come from configuration.
    pub fn from_config(
        config: &SkillforgeConfig,
        sql_engine: Arc<dyn SqlEngine>,
        knowledge_bases: Arc<dyn KnowledgeBaseController>,
    ) -> Self {
        Self {
            capabilities: Capabilities::detect(&config.capabilities),
            sql_variant: config.sql.variant,
            ..Self::new(sql_engine, knowledge_bases)
        }
    }

    pub fn with_llm(mut self, llm: Arc<dyn LanguageModel>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_sql_variant(mut self, variant: SqlToolVariant) -> Self {
        self.sql_variant = variant;
        self
    }
}
