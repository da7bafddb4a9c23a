// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! Every section struct uses `#[serde(deny_unknown_fields)]` so a typo in a
//! key is reported at startup instead of silently ignored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Top-level Skillforge configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SkillforgeConfig {
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Skill and knowledge-base storage.
    #[serde(default)]
    pub storage: StorageConfig,

    /// SQL databases skills may reference, by name. Values are SQLite paths.
    #[serde(default)]
    pub databases: BTreeMap<String, String>,

    /// Text-to-SQL tool settings.
    #[serde(default)]
    pub sql: SqlConfig,

    /// Optional tool-building capabilities.
    #[serde(default)]
    pub capabilities: CapabilitiesConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// SQLite file holding the `skills` table and knowledge bases.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("skillforge").join("skillforge.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("skillforge.db"))
        .to_string_lossy()
        .into_owned()
}

/// Which text-to-SQL tool set to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlToolVariant {
    /// One `sql_db_query` tool whose description lists every table's columns.
    #[default]
    Introspected,
    /// The full SQL toolkit: query, schema, list-tables and query-checker tools.
    Toolkit,
}

/// Text-to-SQL configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SqlConfig {
    #[serde(default)]
    pub variant: SqlToolVariant,
}

/// Capability switches.
///
/// A disabled capability makes the factories that need it fail with an
/// instructive error instead of building tools.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CapabilitiesConfig {
    /// Building any agent tool at all.
    #[serde(default = "default_true")]
    pub agent_tools: bool,

    /// The SQL toolkit variant. Also requires the `sql-toolkit` cargo feature.
    #[serde(default = "default_true")]
    pub sql_toolkit: bool,
}

impl Default for CapabilitiesConfig {
    fn default() -> Self {
        Self {
            agent_tools: true,
            sql_toolkit: true,
        }
    }
}

fn default_true() -> bool {
    true
}
