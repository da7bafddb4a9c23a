// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured select queries handed to knowledge-base tables.
//!
//! A [`Select`] is built per tool invocation and never stored. Backends
//! translate it into whatever their engine speaks; `Display` renders it as
//! SQL-ish text for logs.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::types::KnowledgeBaseRow;

/// Well-known columns of a knowledge-base table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum TableField {
    Id,
    Content,
    Metadata,
}

/// A projection target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    /// All fields.
    Star,
    Column(String),
}

/// Comparison operator of a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Eq,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Eq => f.write_str("="),
        }
    }
}

/// A literal on the right-hand side of a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Constant {
    Text(String),
    Integer(i64),
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Constant::Integer(n) => write!(f, "{n}"),
        }
    }
}

/// `column <op> constant`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryOperation {
    pub op: Operator,
    pub column: String,
    pub value: Constant,
}

/// A select over a single, separately resolved table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Select {
    pub targets: Vec<Target>,
    pub filter: Option<BinaryOperation>,
    pub limit: Option<u64>,
}

impl Select {
    /// `SELECT *` with no filter and no limit.
    pub fn star() -> Self {
        Self {
            targets: vec![Target::Star],
            filter: None,
            limit: None,
        }
    }

    /// Adds an equality filter, replacing any previous filter.
    pub fn filter_eq(mut self, column: impl Into<String>, value: Constant) -> Self {
        self.filter = Some(BinaryOperation {
            op: Operator::Eq,
            column: column.into(),
            value,
        });
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The text literal this query compares the content column against, if
    /// the filter has that shape.
    pub fn content_filter(&self) -> Option<&str> {
        match &self.filter {
            Some(BinaryOperation {
                op: Operator::Eq,
                column,
                value: Constant::Text(text),
            }) if column == &TableField::Content.to_string() => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let targets = self
            .targets
            .iter()
            .map(|t| match t {
                Target::Star => "*".to_string(),
                Target::Column(c) => c.clone(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "SELECT {targets}")?;
        if let Some(filter) = &self.filter {
            write!(f, " WHERE {} {} {}", filter.column, filter.op, filter.value)?;
        }
        if let Some(limit) = self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        Ok(())
    }
}

/// Rows returned by a knowledge-base select.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub rows: Vec<KnowledgeBaseRow>,
}

impl QueryResult {
    /// The content field of every row, in order.
    pub fn content(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.content.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn select_renders_star_filter_and_limit() {
        let query = Select::star()
            .filter_eq(TableField::Content.to_string(), Constant::Text("hello".into()))
            .limit(10);
        assert_eq!(query.to_string(), "SELECT * WHERE content = 'hello' LIMIT 10");
    }

    #[test]
    fn content_filter_only_matches_content_column() {
        let query = Select::star().filter_eq("id", Constant::Text("x".into()));
        assert_eq!(query.content_filter(), None);

        let query = Select::star().filter_eq("content", Constant::Integer(3));
        assert_eq!(query.content_filter(), None);

        let query = Select::star().filter_eq("content", Constant::Text("q".into()));
        assert_eq!(query.content_filter(), Some("q"));
    }

    #[test]
    fn query_result_content_preserves_order() {
        let result = QueryResult {
            rows: vec![
                KnowledgeBaseRow {
                    id: "1".into(),
                    content: "first".into(),
                    metadata: None,
                },
                KnowledgeBaseRow {
                    id: "2".into(),
                    content: "second".into(),
                    metadata: None,
                },
            ],
        };
        assert_eq!(result.content(), vec!["first", "second"]);
    }

    proptest! {
        #[test]
        fn text_constant_escapes_quotes(s in ".*") {
            let rendered = Constant::Text(s.clone()).to_string();
            prop_assert!(rendered.starts_with('\'') && rendered.ends_with('\''));
            let inner = &rendered[1..rendered.len() - 1];
            prop_assert_eq!(inner.replace("''", "'"), s);
        }
    }
}
