// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns stored skills into tools an agent can call.
//!
//! A skill record names a data source. [`make_tools_from_skill`] parses the
//! record into a typed [`Skill`] and hands it to the matching factory:
//!
//! - `text_to_sql` skills become [`sql::SqlQueryTool`] (plus the toolkit
//!   tools when the toolkit variant is selected)
//! - `knowledge_base` skills become [`knowledge_base::KnowledgeBaseTool`]
//!
//! Every tool implements the [`Tool`] trait and can be collected in a
//! [`ToolRegistry`].

pub mod capability;
pub mod context;
pub mod dispatch;
pub mod knowledge_base;
pub mod skill;
pub mod sql;
#[cfg(feature = "sql-toolkit")]
pub mod toolkit;
pub mod tool;

pub use capability::{Capabilities, Capability};
pub use context::ToolContext;
pub use dispatch::{make_tools_from_skill, make_tools_from_skills, register_skill_tools};
pub use skill::{KnowledgeBaseParams, Skill, SkillKind, TextToSqlParams};
pub use tool::{Tool, ToolOutput, ToolRegistry};
