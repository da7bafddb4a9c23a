// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text-to-SQL tools.
//!
//! [`make_text_to_sql_tools`] resolves the skill's database through the SQL
//! engine, scoped to the skill's tables, and builds either the introspected
//! single-tool variant or the toolkit variant.
//!
//! The introspected variant fetches every table's columns at construction
//! time so the agent sees the schema without a round trip; construction
//! cost grows with the table count. The toolkit variant skips that and
//! gives the agent schema tools instead.

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;
use skillforge_config::SqlToolVariant;
use skillforge_core::{SqlDatabase, SkillforgeError};
use tracing::debug;

use crate::capability::Capability;
use crate::context::ToolContext;
use crate::skill::{Skill, TextToSqlParams};
use crate::tool::{run_blocking, single_string_schema, text_input, Tool, ToolOutput};

/// Name of the query tool in both variants.
pub const SQL_QUERY_TOOL_NAME: &str = "sql_db_query";

pub(crate) const PURPOSE: &str = "text-to-SQL";

/// Instructions every query tool description carries.
pub const SQL_QUERY_PREAMBLE: &str = "Use the conversation context to decide which table to query. \
Input to this tool is a detailed and correct SQL query, output is a result from the database. \
If the query is not correct, an error message will be returned. \
If an error is returned, rewrite the query, check the query, and try again. ";

/// Executes agent-written SQL against a scoped database.
///
/// Never fails on bad SQL: the database's error text is returned as the
/// tool output with `is_error` set.
pub struct SqlQueryTool {
    description: String,
    database: Arc<dyn SqlDatabase>,
}

impl SqlQueryTool {
    pub fn new(description: String, database: Arc<dyn SqlDatabase>) -> Self {
        Self {
            description,
            database,
        }
    }
}

#[async_trait]
impl Tool for SqlQueryTool {
    fn name(&self) -> &str {
        SQL_QUERY_TOOL_NAME
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters_schema(&self) -> serde_json::Value {
        single_string_schema("query", "A detailed and correct SQL query")
    }

    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, SkillforgeError> {
        let query = match text_input(&input, "query") {
            Ok(query) => query,
            Err(output) => return Ok(output),
        };
        if query.trim().is_empty() {
            return Ok(ToolOutput::error("Error: empty SQL query"));
        }

        let database = Arc::clone(&self.database);
        let result = run_blocking(move || database.run(&query)).await;

        Ok(match result {
            Ok(Ok(rows)) => ToolOutput::text(rows),
            Ok(Err(e)) | Err(e) => {
                debug!(database = %self.database.name(), error = %e, "SQL query failed");
                ToolOutput::error(format!("Error: {e}"))
            }
        })
    }
}

/// Builds the tools for a `text_to_sql` skill using the context's variant.
pub fn make_text_to_sql_tools(
    skill: &Skill,
    params: &TextToSqlParams,
    ctx: &ToolContext,
) -> Result<Vec<Arc<dyn Tool>>, SkillforgeError> {
    ctx.capabilities.require(Capability::AgentTools, PURPOSE)?;

    match ctx.sql_variant {
        SqlToolVariant::Introspected => make_introspected_tools(skill, params, ctx),
        SqlToolVariant::Toolkit => {
            #[cfg(feature = "sql-toolkit")]
            {
                crate::toolkit::make_toolkit_tools(skill, params, ctx)
            }
            #[cfg(not(feature = "sql-toolkit"))]
            {
                tracing::warn!(skill = %skill.name, "SQL toolkit requested but not compiled in");
                Err(Capability::SqlToolkit.missing(PURPOSE))
            }
        }
    }
}

/// One `sql_db_query` tool whose description lists every table's columns.
pub fn make_introspected_tools(
    skill: &Skill,
    params: &TextToSqlParams,
    ctx: &ToolContext,
) -> Result<Vec<Arc<dyn Tool>>, SkillforgeError> {
    let database = ctx.sql_engine.database(&params.database, &params.tables)?;

    let mut description = description_prefix(params.description.as_deref());
    description.push_str(SQL_QUERY_PREAMBLE);
    let _ = writeln!(
        description,
        "These are the available tables: {}",
        params.tables.join(",")
    );
    for table in &params.tables {
        let columns = database.table_columns(table)?;
        let _ = writeln!(
            description,
            "Table name: \"{table}\", columns [{}]",
            columns.join(", ")
        );
    }

    debug!(
        skill = %skill.name,
        database = %params.database,
        tables = params.tables.len(),
        "built introspected SQL tool"
    );
    Ok(vec![Arc::new(SqlQueryTool::new(description, database))])
}

/// `"Use this tool if you need data about X. "`, or empty without a description.
pub(crate) fn description_prefix(description: Option<&str>) -> String {
    match description {
        Some(d) => format!("Use this tool if you need data about {d}. "),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillforge_core::SqlEngine;
    use skillforge_test_utils::fixtures::text_to_sql_record;
    use skillforge_test_utils::{MockKnowledgeBases, MockSqlDatabase, MockSqlEngine};

    use crate::capability::Capabilities;
    use crate::skill::SkillKind;

    fn shop() -> MockSqlDatabase {
        MockSqlDatabase::new("shop")
            .with_table("t1", &["id", "name"])
            .with_table("t2", &["id", "total"])
            .with_result("SELECT count(*) FROM t1", "[(3,)]")
    }

    fn context(engine: MockSqlEngine) -> ToolContext {
        ToolContext::new(Arc::new(engine), Arc::new(MockKnowledgeBases::new()))
    }

    fn parse(record: &skillforge_core::SkillRecord) -> (Skill, TextToSqlParams) {
        let skill = Skill::try_from(record).unwrap();
        match &skill.kind {
            SkillKind::TextToSql(params) => {
                let params = params.clone();
                (skill, params)
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn description_lists_tables_columns_and_user_text() {
        let record = text_to_sql_record("sales", "shop", &["t1", "t2"], Some("monthly sales"));
        let (skill, params) = parse(&record);
        let database = shop();
        let engine = MockSqlEngine::new().with_database(database.clone());
        let tools = make_text_to_sql_tools(&skill, &params, &context(engine)).unwrap();

        assert_eq!(tools.len(), 1);
        assert_eq!(database.column_lookups(), vec!["t1", "t2"]);
        let description = tools[0].description();
        assert!(description.starts_with("Use this tool if you need data about monthly sales. "));
        assert!(description.contains(SQL_QUERY_PREAMBLE));
        assert!(description.contains("These are the available tables: t1,t2\n"));
        assert!(description.contains("Table name: \"t1\", columns [id, name]\n"));
        assert!(description.contains("Table name: \"t2\", columns [id, total]\n"));
    }

    #[test]
    fn no_description_means_no_prefix() {
        let record = text_to_sql_record("sales", "shop", &["t1"], None);
        let (skill, params) = parse(&record);
        let tools =
            make_introspected_tools(&skill, &params, &context(MockSqlEngine::new().with_database(shop())))
                .unwrap();
        assert!(tools[0].description().starts_with(SQL_QUERY_PREAMBLE));
    }

    #[test]
    fn database_is_scoped_to_skill_tables() {
        let engine = Arc::new(MockSqlEngine::new().with_database(shop()));
        let ctx = ToolContext::new(
            Arc::clone(&engine) as Arc<dyn SqlEngine>,
            Arc::new(MockKnowledgeBases::new()),
        );
        let record = text_to_sql_record("sales", "shop", &["t2"], None);
        let (skill, params) = parse(&record);
        make_text_to_sql_tools(&skill, &params, &ctx).unwrap();
        assert_eq!(
            engine.requests(),
            vec![("shop".to_string(), vec!["t2".to_string()])]
        );
    }

    #[test]
    fn column_lookup_failure_propagates() {
        let record = text_to_sql_record("sales", "shop", &["missing"], None);
        let (skill, params) = parse(&record);
        let result =
            make_text_to_sql_tools(&skill, &params, &context(MockSqlEngine::new().with_database(shop())));
        assert!(matches!(result, Err(SkillforgeError::NotFound { .. })));
    }

    #[test]
    fn unknown_database_propagates() {
        let record = text_to_sql_record("sales", "nowhere", &["t1"], None);
        let (skill, params) = parse(&record);
        let result = make_text_to_sql_tools(&skill, &params, &context(MockSqlEngine::new()));
        assert!(matches!(result, Err(SkillforgeError::NotFound { .. })));
    }

    #[test]
    fn missing_agent_tools_capability_fails_with_hint() {
        let record = text_to_sql_record("sales", "shop", &["t1"], None);
        let (skill, params) = parse(&record);
        let ctx = context(MockSqlEngine::new().with_database(shop()))
            .with_capabilities(Capabilities::none());
        let err = make_text_to_sql_tools(&skill, &params, &ctx)
            .err()
            .expect("construction should fail");
        assert!(matches!(err, SkillforgeError::MissingCapability { .. }));
        assert!(err.to_string().contains("capabilities.agent_tools = true"));
    }

    #[tokio::test]
    async fn query_tool_returns_rows() {
        let database = MockSqlDatabase::new("shop").with_result("SELECT count(*) FROM t1", "[(3,)]");
        let tool = SqlQueryTool::new("d".into(), Arc::new(database.clone()));
        let output = tool
            .invoke(serde_json::json!({"query": "SELECT count(*) FROM t1"}))
            .await
            .unwrap();
        assert_eq!(output, ToolOutput::text("[(3,)]"));
        assert_eq!(database.executed(), vec!["SELECT count(*) FROM t1"]);
    }

    #[tokio::test]
    async fn malformed_query_returns_error_text() {
        let tool = SqlQueryTool::new("d".into(), Arc::new(MockSqlDatabase::new("shop")));
        let output = tool
            .invoke(serde_json::json!("SELEC * FRM t1"))
            .await
            .expect("bad SQL must not fail the call");
        assert!(output.is_error);
        assert!(output.content.starts_with("Error: "));
        assert!(output.content.contains("syntax error"));
    }

    #[tokio::test]
    async fn empty_query_returns_error_text() {
        let tool = SqlQueryTool::new("d".into(), Arc::new(MockSqlDatabase::new("shop")));
        let output = tool.invoke(serde_json::json!({"query": "  "})).await.unwrap();
        assert!(output.is_error);
        assert!(!output.content.is_empty());
    }

    #[tokio::test]
    async fn missing_query_field_returns_error_text() {
        let database = MockSqlDatabase::new("shop");
        let tool = SqlQueryTool::new("d".into(), Arc::new(database.clone()));
        let output = tool
            .invoke(serde_json::json!({"sql": "SELECT 1"}))
            .await
            .unwrap();
        assert!(output.is_error);
        assert_eq!(output.content, "Error: missing required 'query' parameter");
        assert!(database.executed().is_empty());
    }
}
