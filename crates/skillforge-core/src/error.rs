// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Skillforge.

use thiserror::Error;

/// The primary error type used across all Skillforge crates.
///
/// Construction-time failures (unsupported skill type, bad parameters,
/// missing capability) propagate through this type. Query execution failures
/// inside a tool are turned into tool output text instead; the `Query`
/// variant is what collaborators return before that conversion happens.
#[derive(Debug, Error)]
pub enum SkillforgeError {
    /// Configuration errors (invalid TOML, bad values, unknown database names).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (database connection, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The skill record declares a type no factory handles.
    #[error("skill of type {skill_type} is not supported as a tool")]
    UnsupportedSkillType { skill_type: String },

    /// The skill's params do not match the schema its type requires.
    #[error("invalid params for skill `{skill}`: {message}")]
    InvalidSkillParams { skill: String, message: String },

    /// An optional capability needed to build a tool is not available.
    #[error("{capability} is not available: {hint}")]
    MissingCapability { capability: String, hint: String },

    /// A named entity (database, knowledge base, skill) does not exist.
    #[error("{kind} not found: {name}")]
    NotFound { kind: String, name: String },

    /// SQL or knowledge-base query execution failed.
    #[error("query error: {message}")]
    Query {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Tool invocation errors (bad input shape).
    #[error("tool error: {message}")]
    Tool {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Language model errors.
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SkillforgeError {
    /// Shorthand for a [`SkillforgeError::Query`] without a source.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a [`SkillforgeError::NotFound`].
    pub fn not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_type_message_names_the_type() {
        let err = SkillforgeError::UnsupportedSkillType {
            skill_type: "foo".into(),
        };
        assert_eq!(err.to_string(), "skill of type foo is not supported as a tool");
    }

    #[test]
    fn missing_capability_message_carries_hint() {
        let err = SkillforgeError::MissingCapability {
            capability: "sql toolkit".into(),
            hint: "build with `--features sql-toolkit`".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("sql toolkit"));
        assert!(msg.contains("--features sql-toolkit"));
    }
}
