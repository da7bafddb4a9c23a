// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the configuration system.

use skillforge_config::diagnostic::ConfigError;
use skillforge_config::model::SqlToolVariant;
use skillforge_config::{load_and_validate_str, load_config_from_str};

#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[log]
level = "debug"

[storage]
database_path = "/tmp/skills.db"

[databases]
shop = "/data/shop.db"
crm = "/data/crm.db"

[sql]
variant = "toolkit"

[capabilities]
agent_tools = true
sql_toolkit = false
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.storage.database_path, "/tmp/skills.db");
    assert_eq!(config.databases.len(), 2);
    assert_eq!(config.databases["shop"], "/data/shop.db");
    assert_eq!(config.sql.variant, SqlToolVariant::Toolkit);
    assert!(config.capabilities.agent_tools);
    assert!(!config.capabilities.sql_toolkit);
}

#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty config is valid");
    assert_eq!(config.log.level, "info");
    assert!(config.databases.is_empty());
    assert_eq!(config.sql.variant, SqlToolVariant::Introspected);
    assert!(config.capabilities.agent_tools);
    assert!(config.capabilities.sql_toolkit);
    assert!(config.storage.database_path.ends_with("skillforge.db"));
}

#[test]
fn unknown_field_produces_suggestion() {
    let toml = r#"
[capabilities]
sql_tolkit = false
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    let unknown = errors
        .iter()
        .find_map(|e| match e {
            ConfigError::UnknownKey {
                key, suggestion, ..
            } => Some((key.clone(), suggestion.clone())),
            _ => None,
        })
        .expect("should contain an UnknownKey error");
    assert_eq!(unknown.0, "sql_tolkit");
    assert_eq!(unknown.1.as_deref(), Some("sql_toolkit"));
}

#[test]
fn unknown_top_level_section_is_rejected() {
    let toml = r#"
[sqll]
variant = "toolkit"
"#;
    let err = load_config_from_str(toml).expect_err("should reject unknown section");
    assert!(err.to_string().contains("sqll"));
}

#[test]
fn unknown_sql_variant_is_rejected() {
    let toml = r#"
[sql]
variant = "langchain"
"#;
    let errors = load_and_validate_str(toml).expect_err("should reject bad variant");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::InvalidValue { detail, .. } if detail.contains("langchain"))));
}

#[test]
fn wrong_type_produces_invalid_type() {
    let toml = r#"
[capabilities]
agent_tools = "yes"
"#;
    let errors = load_and_validate_str(toml).expect_err("should reject string for bool");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("agent_tools"))));
}

#[test]
fn validation_runs_after_deserialization() {
    let toml = r#"
[log]
level = "chatty"
"#;
    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(matches!(&errors[0], ConfigError::Validation { message } if message.contains("chatty")));
}
