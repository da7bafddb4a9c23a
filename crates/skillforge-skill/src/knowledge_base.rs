// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Knowledge-base retrieval tool.
//!
//! The tool resolves its table on every call, so a knowledge base created
//! after the tool was built is still reachable and a deleted one turns into
//! an error message rather than a stale handle.

use std::sync::Arc;

use async_trait::async_trait;
use skillforge_core::{Constant, KnowledgeBaseController, Select, SkillforgeError, TableField};
use tracing::debug;

use crate::capability::Capability;
use crate::context::ToolContext;
use crate::skill::{KnowledgeBaseParams, Skill};
use crate::tool::{run_blocking, single_string_schema, text_input, Tool, ToolOutput};

pub const KNOWLEDGE_BASE_TOOL_NAME: &str = "knowledge_base_retrieval";

/// Rows fetched per question.
pub const KNOWLEDGE_BASE_RESULT_LIMIT: u64 = 10;

const PURPOSE: &str = "knowledge base";

/// `SELECT * WHERE content = '<question>' LIMIT 10`.
pub fn retrieval_query(question: &str) -> Select {
    Select::star()
        .filter_eq(
            TableField::Content.to_string(),
            Constant::Text(question.to_string()),
        )
        .limit(KNOWLEDGE_BASE_RESULT_LIMIT)
}

/// Answers a question with newline-joined content from a knowledge base.
pub struct KnowledgeBaseTool {
    description: String,
    source: String,
    project_id: String,
    controller: Arc<dyn KnowledgeBaseController>,
}

impl KnowledgeBaseTool {
    pub fn new(
        description: Option<&str>,
        source: String,
        project_id: String,
        controller: Arc<dyn KnowledgeBaseController>,
    ) -> Self {
        Self {
            // Without a description, the source name is the topic.
            description: format!(
                "Use this tool to get more context or information to answer a question about {}. \
                 The input should be the exact question the user is asking.",
                description.unwrap_or(&source)
            ),
            source,
            project_id,
            controller,
        }
    }
}

#[async_trait]
impl Tool for KnowledgeBaseTool {
    fn name(&self) -> &str {
        KNOWLEDGE_BASE_TOOL_NAME
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters_schema(&self) -> serde_json::Value {
        single_string_schema("question", "The exact question the user is asking")
    }

    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, SkillforgeError> {
        let question = match text_input(&input, "question") {
            Ok(question) => question,
            Err(output) => return Ok(output),
        };

        let controller = Arc::clone(&self.controller);
        let source = self.source.clone();
        let project_id = self.project_id.clone();
        let result =
            run_blocking(move || retrieve(controller.as_ref(), &source, &project_id, &question))
                .await;

        Ok(match result {
            Ok(Ok(content)) => ToolOutput::text(content),
            Ok(Err(e)) | Err(e) => {
                debug!(knowledge_base = %self.source, error = %e, "knowledge base query failed");
                ToolOutput::error(format!("Error: {e}"))
            }
        })
    }
}

fn retrieve(
    controller: &dyn KnowledgeBaseController,
    source: &str,
    project_id: &str,
    question: &str,
) -> Result<String, SkillforgeError> {
    let query = retrieval_query(question);
    debug!(
        knowledge_base = %source,
        project = %project_id,
        query = %query,
        "querying knowledge base"
    );
    let table = controller.get_table(source, project_id)?;
    let result = table.select(&query)?;
    Ok(result.content().join("\n"))
}

/// Builds the retrieval tool for a `knowledge_base` skill.
pub fn make_knowledge_base_tools(
    skill: &Skill,
    params: &KnowledgeBaseParams,
    ctx: &ToolContext,
) -> Result<Vec<Arc<dyn Tool>>, SkillforgeError> {
    ctx.capabilities.require(Capability::AgentTools, PURPOSE)?;

    debug!(skill = %skill.name, source = %params.source, "built knowledge base tool");
    Ok(vec![Arc::new(KnowledgeBaseTool::new(
        params.description.as_deref(),
        params.source.clone(),
        skill.project_id.clone(),
        Arc::clone(&ctx.knowledge_bases),
    ))])
}
