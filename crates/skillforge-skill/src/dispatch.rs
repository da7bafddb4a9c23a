// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Skill type dispatch.

use std::sync::Arc;

use skillforge_core::{SkillRecord, SkillforgeError};
use tracing::{debug, warn};

use crate::context::ToolContext;
use crate::knowledge_base::make_knowledge_base_tools;
use crate::skill::{Skill, SkillKind};
use crate::sql::make_text_to_sql_tools;
use crate::tool::{Tool, ToolRegistry};

/// Builds the tools for one stored skill.
///
/// Unknown skill types fail with [`SkillforgeError::UnsupportedSkillType`];
/// there is no fallback tool. Every call builds fresh tool instances.
pub fn make_tools_from_skill(
    record: &SkillRecord,
    ctx: &ToolContext,
) -> Result<Vec<Arc<dyn Tool>>, SkillforgeError> {
    let skill = Skill::try_from(record)?;
    debug!(skill = %skill.name, skill_type = %skill.kind.skill_type(), "building tools");

    match &skill.kind {
        SkillKind::TextToSql(params) => make_text_to_sql_tools(&skill, params, ctx),
        SkillKind::KnowledgeBase(params) => make_knowledge_base_tools(&skill, params, ctx),
    }
}

/// Builds the tools for several skills, stopping at the first failure.
pub fn make_tools_from_skills(
    records: &[SkillRecord],
    ctx: &ToolContext,
) -> Result<Vec<Arc<dyn Tool>>, SkillforgeError> {
    let mut tools = Vec::new();
    for record in records {
        tools.extend(make_tools_from_skill(record, ctx)?);
    }
    Ok(tools)
}

/// Builds and registers the tools for `records`, returning how many were
/// registered.
///
/// A tool whose name is already taken replaces the earlier one.
pub fn register_skill_tools(
    registry: &mut ToolRegistry,
    records: &[SkillRecord],
    ctx: &ToolContext,
) -> Result<usize, SkillforgeError> {
    let mut count = 0;
    for record in records {
        for tool in make_tools_from_skill(record, ctx)? {
            let name = tool.name().to_string();
            if registry.register(tool).is_some() {
                warn!(tool = %name, skill = %record.name, "tool name already registered, replacing");
            }
            count += 1;
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use skillforge_test_utils::fixtures::{
        knowledge_base_record, skill_record, text_to_sql_record, PROJECT_ID,
    };
    use skillforge_test_utils::{MockKnowledgeBases, MockSqlDatabase, MockSqlEngine};
    use tracing_test::traced_test;

    use crate::capability::Capabilities;
    use crate::knowledge_base::KNOWLEDGE_BASE_TOOL_NAME;
    use crate::sql::SQL_QUERY_TOOL_NAME;

    fn context() -> ToolContext {
        let engine = MockSqlEngine::new().with_database(
            MockSqlDatabase::new("shop")
                .with_table("t1", &["id", "name"])
                .with_table("t2", &["id", "total"]),
        );
        let kbs = MockKnowledgeBases::new().with_knowledge_base(PROJECT_ID, "docs", &["alpha"]);
        ToolContext::new(Arc::new(engine), Arc::new(kbs))
    }

    #[test]
    fn text_to_sql_description_has_tables_and_user_text() {
        let record = text_to_sql_record("sales", "shop", &["t1", "t2"], Some("quarterly revenue"));
        let tools = make_tools_from_skill(&record, &context()).unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name(), SQL_QUERY_TOOL_NAME);
        let description = tools[0].description();
        assert!(description.contains("t1"));
        assert!(description.contains("t2"));
        assert!(description.contains("quarterly revenue"));
    }

    #[test]
    fn knowledge_base_skill_builds_retrieval_tool() {
        let record = knowledge_base_record("docs-skill", "docs", None);
        let tools = make_tools_from_skill(&record, &context()).unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].name(), KNOWLEDGE_BASE_TOOL_NAME);
    }

    #[test]
    fn unknown_type_names_the_type() {
        let record = skill_record("mystery", "foo", json!({}));
        match make_tools_from_skill(&record, &context()) {
            Err(err @ SkillforgeError::UnsupportedSkillType { .. }) => {
                assert!(err.to_string().contains("foo"));
            }
            Err(other) => panic!("expected UnsupportedSkillType, got {other:?}"),
            Ok(tools) => panic!("expected an error, got {} tools", tools.len()),
        }
    }

    #[test]
    fn missing_capability_fails_both_kinds() {
        let ctx = context().with_capabilities(Capabilities::none());
        for record in [
            text_to_sql_record("sales", "shop", &["t1"], None),
            knowledge_base_record("docs-skill", "docs", None),
        ] {
            let result = make_tools_from_skill(&record, &ctx);
            assert!(
                matches!(result, Err(SkillforgeError::MissingCapability { .. })),
                "skill {}",
                record.name
            );
        }
    }

    #[test]
    fn separate_calls_build_independent_tools() {
        let record = text_to_sql_record("sales", "shop", &["t1"], None);
        let ctx = context();
        let first = make_tools_from_skill(&record, &ctx).unwrap();
        let second = make_tools_from_skill(&record, &ctx).unwrap();
        assert!(!Arc::ptr_eq(&first[0], &second[0]));
        assert_eq!(first[0].description(), second[0].description());
    }

    #[test]
    fn many_skills_stop_at_first_failure() {
        let ctx = context();
        let ok = vec![
            text_to_sql_record("sales", "shop", &["t1"], None),
            knowledge_base_record("docs-skill", "docs", None),
        ];
        assert_eq!(make_tools_from_skills(&ok, &ctx).unwrap().len(), 2);

        let mut bad = ok.clone();
        bad.insert(1, skill_record("mystery", "foo", json!({})));
        assert!(make_tools_from_skills(&bad, &ctx).is_err());
    }

    #[test]
    #[traced_test]
    fn duplicate_tool_names_are_replaced_with_warning() {
        let ctx = context();
        let records = vec![
            text_to_sql_record("sales", "shop", &["t1"], Some("first")),
            text_to_sql_record("totals", "shop", &["t2"], Some("second")),
        ];
        let mut registry = ToolRegistry::new();
        let registered = register_skill_tools(&mut registry, &records, &ctx).unwrap();

        assert_eq!(registered, 2);
        assert_eq!(registry.len(), 1);
        let tool = registry.get(SQL_QUERY_TOOL_NAME).unwrap();
        assert!(tool.description().contains("second"));
        assert!(logs_contain("tool name already registered"));
    }
}
