// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Language model handle.

use async_trait::async_trait;

use crate::error::SkillforgeError;

/// Opaque handle to a language model.
///
/// Only the SQL toolkit's query checker calls it; every other factory passes
/// it through untouched.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Model identifier, for logs.
    fn name(&self) -> &str;

    /// Completes a single prompt and returns the generated text.
    async fn complete(&self, prompt: &str) -> Result<String, SkillforgeError>;
}
