// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The SQL toolkit variant.
//!
//! Builds four tools over one scoped database: query, schema, list tables
//! and (with a language model) a query checker. The agent is expected to
//! list tables, read the schema, check its query and then run it.

use std::sync::Arc;

use async_trait::async_trait;
use skillforge_core::{LanguageModel, SqlDatabase, SkillforgeError};
use tracing::debug;

use crate::capability::Capability;
use crate::context::ToolContext;
use crate::skill::{Skill, TextToSqlParams};
use crate::sql::{description_prefix, SqlQueryTool, PURPOSE, SQL_QUERY_TOOL_NAME};
use crate::tool::{run_blocking, single_string_schema, text_input, Tool, ToolOutput};

pub const SQL_SCHEMA_TOOL_NAME: &str = "sql_db_schema";
pub const SQL_LIST_TABLES_TOOL_NAME: &str = "sql_db_list_tables";
pub const SQL_QUERY_CHECKER_TOOL_NAME: &str = "sql_db_query_checker";

const QUERY_TOOL_DESCRIPTION: &str = "Input to this tool is a detailed and correct SQL query, \
output is a result from the database. If the query is not correct, an error message will be \
returned. If an error is returned, rewrite the query, check the query, and try again. If you \
encounter an unknown column error, use sql_db_schema to look up the correct table fields.";

const SCHEMA_TOOL_DESCRIPTION: &str = "Input to this tool is a comma-separated list of tables, \
output is the schema and sample rows for those tables. Make sure the tables exist by calling \
sql_db_list_tables first! Example Input: table1, table2, table3";

const LIST_TABLES_TOOL_DESCRIPTION: &str =
    "Input is an empty string, output is a comma-separated list of tables in the database.";

const QUERY_CHECKER_TOOL_DESCRIPTION: &str = "Use this tool to double check if your query is \
correct before executing it. Always use this tool before executing a query with sql_db_query!";

/// Builds the toolkit tools for a `text_to_sql` skill.
pub fn make_toolkit_tools(
    skill: &Skill,
    params: &TextToSqlParams,
    ctx: &ToolContext,
) -> Result<Vec<Arc<dyn Tool>>, SkillforgeError> {
    ctx.capabilities.require(Capability::SqlToolkit, PURPOSE)?;

    let database = ctx.sql_engine.database(&params.database, &params.tables)?;

    let query_description = format!(
        "{}Use the conversation context to decide which table to query. \
         These are the available tables: {}.\n{QUERY_TOOL_DESCRIPTION}",
        description_prefix(params.description.as_deref()),
        params.tables.join(","),
    );

    let mut tools: Vec<Arc<dyn Tool>> = vec![
        Arc::new(SqlQueryTool::new(query_description, Arc::clone(&database))),
        Arc::new(SqlSchemaTool {
            database: Arc::clone(&database),
        }),
        Arc::new(SqlListTablesTool {
            database: Arc::clone(&database),
        }),
    ];

    match &ctx.llm {
        Some(llm) => tools.push(Arc::new(SqlQueryCheckerTool {
            dialect: database.dialect().to_string(),
            llm: Arc::clone(llm),
        })),
        None => debug!(skill = %skill.name, "no language model; skipping query checker"),
    }

    debug!(
        skill = %skill.name,
        database = %params.database,
        tools = tools.len(),
        "built SQL toolkit"
    );
    Ok(tools)
}

/// Returns DDL and sample rows for the requested tables.
pub struct SqlSchemaTool {
    database: Arc<dyn SqlDatabase>,
}

#[async_trait]
impl Tool for SqlSchemaTool {
    fn name(&self) -> &str {
        SQL_SCHEMA_TOOL_NAME
    }

    fn description(&self) -> &str {
        SCHEMA_TOOL_DESCRIPTION
    }

    fn parameters_schema(&self) -> serde_json::Value {
        single_string_schema("tables", "Comma-separated list of table names")
    }

    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, SkillforgeError> {
        let tables = match text_input(&input, "tables") {
            Ok(tables) => tables,
            Err(output) => return Ok(output),
        };
        let tables: Vec<String> = tables
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        let database = Arc::clone(&self.database);
        let result = run_blocking(move || database.table_info(&tables)).await;
        Ok(match result {
            Ok(Ok(info)) => ToolOutput::text(info),
            Ok(Err(e)) | Err(e) => ToolOutput::error(format!("Error: {e}")),
        })
    }
}

/// Lists the tables the skill may query.
pub struct SqlListTablesTool {
    database: Arc<dyn SqlDatabase>,
}

#[async_trait]
impl Tool for SqlListTablesTool {
    fn name(&self) -> &str {
        SQL_LIST_TABLES_TOOL_NAME
    }

    fn description(&self) -> &str {
        LIST_TABLES_TOOL_DESCRIPTION
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({ "type": "object", "properties": {} })
    }

    async fn invoke(&self, _input: serde_json::Value) -> Result<ToolOutput, SkillforgeError> {
        Ok(ToolOutput::text(self.database.usable_tables().join(", ")))
    }
}

/// Asks the language model to review a query for common mistakes.
pub struct SqlQueryCheckerTool {
    dialect: String,
    llm: Arc<dyn LanguageModel>,
}

impl SqlQueryCheckerTool {
    fn prompt(&self, query: &str) -> String {
        format!(
            "{query}\n\
             Double check the {dialect} query above for common mistakes, including:\n\
             - Using NOT IN with NULL values\n\
             - Using UNION when UNION ALL should have been used\n\
             - Using BETWEEN for exclusive ranges\n\
             - Data type mismatch in predicates\n\
             - Properly quoting identifiers\n\
             - Using the correct number of arguments for functions\n\
             - Casting to the correct data type\n\
             - Using the proper columns for joins\n\
             \n\
             If there are any of the above mistakes, rewrite the query. \
             If there are no mistakes, just reproduce the original query.\n\
             \n\
             Output the final SQL query only.\n\
             \n\
             SQL Query: ",
            dialect = self.dialect,
        )
    }
}

#[async_trait]
impl Tool for SqlQueryCheckerTool {
    fn name(&self) -> &str {
        SQL_QUERY_CHECKER_TOOL_NAME
    }

    fn description(&self) -> &str {
        QUERY_CHECKER_TOOL_DESCRIPTION
    }

    fn parameters_schema(&self) -> serde_json::Value {
        single_string_schema("query", "The SQL query to check")
    }

    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, SkillforgeError> {
        let query = match text_input(&input, "query") {
            Ok(query) => query,
            Err(output) => return Ok(output),
        };
        debug!(model = %self.llm.name(), "checking SQL query");
        Ok(match self.llm.complete(&self.prompt(&query)).await {
            Ok(checked) => ToolOutput::text(checked.trim()),
            Err(e) => {
                debug!(model = %self.llm.name(), error = %e, "SQL query check failed");
                ToolOutput::error(format!("Error: {e}"))
            }
        })
    }
}
