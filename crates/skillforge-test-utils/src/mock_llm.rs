// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock language model with queued completions.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use skillforge_core::{LanguageModel, SkillforgeError};

/// A language model that answers from a FIFO queue.
///
/// When the queue is empty it echoes the last line of the prompt. Every
/// prompt is recorded.
#[derive(Default)]
pub struct MockLanguageModel {
    responses: Arc<Mutex<VecDeque<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
    failing: bool,
}

impl MockLanguageModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
            ..Self::default()
        }
    }

    /// A model whose every completion fails with a provider error.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    fn name(&self) -> &str {
        "mock-llm"
    }

    async fn complete(&self, prompt: &str) -> Result<String, SkillforgeError> {
        self.prompts.lock().await.push(prompt.to_string());
        if self.failing {
            return Err(SkillforgeError::Provider {
                message: "model unavailable".into(),
                source: None,
            });
        }
        let next = self.responses.lock().await.pop_front();
        Ok(next.unwrap_or_else(|| prompt.lines().last().unwrap_or("").trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn responses_are_fifo_then_echo() {
        let llm = MockLanguageModel::with_responses(vec!["first".into()]);
        assert_eq!(llm.complete("p1").await.unwrap(), "first");
        assert_eq!(llm.complete("a\nSELECT 1").await.unwrap(), "SELECT 1");
        assert_eq!(llm.prompts().await.len(), 2);
    }

    #[tokio::test]
    async fn failing_model_records_prompt_and_errors() {
        let llm = MockLanguageModel::failing();
        let err = llm.complete("SELECT 1").await.unwrap_err();
        assert!(matches!(err, SkillforgeError::Provider { .. }));
        assert_eq!(llm.prompts().await, vec!["SELECT 1"]);
    }
}
