// SPDX-FileCopyrightText: 2026 Skillforge Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optional capabilities the factories depend on.
//!
//! Capabilities are computed once from configuration and compile-time
//! features, then checked each time a factory runs. A missing capability
//! becomes [`SkillforgeError::MissingCapability`] with a hint that names the
//! exact setting or build flag to change.

use skillforge_config::model::CapabilitiesConfig;
use skillforge_core::SkillforgeError;
use tracing::debug;

/// A capability a factory may require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Building agent tools at all. Needed by every factory.
    AgentTools,
    /// The multi-tool SQL toolkit.
    SqlToolkit,
}

impl Capability {
    pub fn label(self) -> &'static str {
        match self {
            Capability::AgentTools => "agent tool support",
            Capability::SqlToolkit => "the SQL toolkit",
        }
    }

    /// Whether the capability was compiled into this build.
    pub fn compiled(self) -> bool {
        match self {
            Capability::AgentTools => true,
            Capability::SqlToolkit => cfg!(feature = "sql-toolkit"),
        }
    }

    /// The error a factory building a `purpose` skill reports when this
    /// capability is unavailable.
    pub fn missing(self, purpose: &str) -> SkillforgeError {
        let hint = match self {
            Capability::AgentTools => format!(
                "to use the {purpose} skill, set `capabilities.agent_tools = true` in skillforge.toml"
            ),
            Capability::SqlToolkit if !self.compiled() => format!(
                "to use the {purpose} skill with the toolkit variant, rebuild with \
                 `cargo build --features sql-toolkit`, or set `sql.variant = \"introspected\"`"
            ),
            Capability::SqlToolkit => format!(
                "to use the {purpose} skill with the toolkit variant, set \
                 `capabilities.sql_toolkit = true` in skillforge.toml, or set \
                 `sql.variant = \"introspected\"`"
            ),
        };
        SkillforgeError::MissingCapability {
            capability: self.label().to_string(),
            hint,
        }
    }
}

/// The set of enabled capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    agent_tools: bool,
    sql_toolkit: bool,
}

impl Capabilities {
    /// Everything this build was compiled with.
    pub fn all() -> Self {
        Self {
            agent_tools: true,
            sql_toolkit: true,
        }
    }

    pub fn none() -> Self {
        Self {
            agent_tools: false,
            sql_toolkit: false,
        }
    }

    /// Capabilities enabled by configuration, intersected with the build.
    pub fn detect(config: &CapabilitiesConfig) -> Self {
        let caps = Self {
            agent_tools: config.agent_tools,
            sql_toolkit: config.sql_toolkit,
        };
        debug!(
            agent_tools = caps.has(Capability::AgentTools),
            sql_toolkit = caps.has(Capability::SqlToolkit),
            "capabilities detected"
        );
        caps
    }

    pub fn without(mut self, capability: Capability) -> Self {
        match capability {
            Capability::AgentTools => self.agent_tools = false,
            Capability::SqlToolkit => self.sql_toolkit = false,
        }
        self
    }

    pub fn has(&self, capability: Capability) -> bool {
        let enabled = match capability {
            Capability::AgentTools => self.agent_tools,
            Capability::SqlToolkit => self.sql_toolkit,
        };
        enabled && capability.compiled()
    }

    /// Fails with an instructive error if `capability` is unavailable.
    pub fn require(&self, capability: Capability, purpose: &str) -> Result<(), SkillforgeError> {
        if self.has(capability) {
            Ok(())
        } else {
            Err(capability.missing(purpose))
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_lacks_every_capability() {
        let caps = Capabilities::none();
        assert!(!caps.has(Capability::AgentTools));
        assert!(!caps.has(Capability::SqlToolkit));
    }

    #[test]
    fn detect_follows_config() {
        let config = CapabilitiesConfig {
            agent_tools: true,
            sql_toolkit: false,
        };
        let caps = Capabilities::detect(&config);
        assert!(caps.has(Capability::AgentTools));
        assert!(!caps.has(Capability::SqlToolkit));
    }

    #[test]
    fn require_reports_setting_to_change() {
        let err = Capabilities::none()
            .require(Capability::AgentTools, "knowledge base")
            .unwrap_err();
        match err {
            SkillforgeError::MissingCapability { capability, hint } => {
                assert_eq!(capability, "agent tool support");
                assert!(hint.contains("knowledge base"));
                assert!(hint.contains("capabilities.agent_tools = true"));
            }
            other => panic!("expected MissingCapability, got {other:?}"),
        }
    }

    #[test]
    fn toolkit_hint_matches_build() {
        let err = Capability::SqlToolkit.missing("text-to-SQL");
        let msg = err.to_string();
        if cfg!(feature = "sql-toolkit") {
            assert!(msg.contains("capabilities.sql_toolkit = true"));
        } else {
            assert!(msg.contains("--features sql-toolkit"));
        }
    }

    #[test]
    fn without_removes_one_capability() {
        let caps = Capabilities::all().without(Capability::SqlToolkit);
        assert!(caps.has(Capability::AgentTools));
        assert!(!caps.has(Capability::SqlToolkit));
    }
}
