//! Partial layer schema.
//!
//! Every field is optional: a layer only states what it wants to change, and
//! an absent field never erases a value set by a less specific layer. Absence
//! is always modeled as `Option::None` or an empty collection, never as a
//! sentinel value that could be confused with an explicit setting.
//!
//! Unknown top-level keys are tolerated on parse (forward compatibility);
//! [`crate::validate`] reports them as warnings without rejecting the layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One layer's worth of configuration, as written in a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerSchema {
    /// Parent profile name. Only meaningful in profile files.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    /// Package manager the generated instructions should tell the agent to
    /// use (`npm`, `pnpm`, `yarn`, `cargo`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<String>,

    pub model: ModelSection,
    pub skills: ToggleSection,
    pub hooks: ToggleSection,
    pub mcp: ToggleSection,
    pub budget: BudgetSection,

    /// Per-agent overrides, deep-merged key by key across layers.
    pub agents: BTreeMap<String, AgentOverride>,
}

impl LayerSchema {
    /// Returns `true` if the layer states nothing at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Model selection: a default plus a routing table mapping agent roles to
/// model names. Routing entries merge per key, not wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    pub routing: BTreeMap<String, String>,
}

/// Enabled/disabled name lists for skills, hooks, or MCP servers.
///
/// Both lists union across layers; when the same name ends up in both, the
/// most specific layer that mentioned it decides its effective state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleSection {
    pub enabled: Vec<String>,
    pub disabled: Vec<String>,
}

impl ToggleSection {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty() && self.disabled.is_empty()
    }
}

/// Cost ceilings, in USD. Scalars: last-defined-wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_session_usd: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warn_at_usd: Option<f64>,
}

/// Overrides applied to a single named agent. Merged field-wise: a later
/// layer's `Some` wins, its `None` leaves the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Extra instruction text appended to the agent's prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_turns: Option<u32>,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_parses_to_default() {
        let layer: LayerSchema = toml::from_str("").unwrap();
        assert!(layer.is_empty());
    }

    #[test]
    fn partial_layer_parses() {
        let layer: LayerSchema = toml::from_str(
            r#"
            package_manager = "pnpm"

            [model]
            default = "sonnet"

            [model.routing]
            planner = "opus"

            [skills]
            enabled = ["executor"]

            [agents.reviewer]
            model = "haiku"
            "#,
        )
        .unwrap();
        assert_eq!(layer.package_manager.as_deref(), Some("pnpm"));
        assert_eq!(layer.model.default.as_deref(), Some("sonnet"));
        assert_eq!(layer.model.routing["planner"], "opus");
        assert_eq!(layer.skills.enabled, vec!["executor"]);
        assert!(layer.skills.disabled.is_empty());
        assert_eq!(layer.agents["reviewer"].model.as_deref(), Some("haiku"));
        assert!(layer.agents["reviewer"].instructions.is_none());
    }

    #[test]
    fn unknown_top_level_keys_are_tolerated() {
        let layer: LayerSchema = toml::from_str(
            r#"
            some_future_key = true

            [model]
            default = "sonnet"
            "#,
        )
        .unwrap();
        assert_eq!(layer.model.default.as_deref(), Some("sonnet"));
    }
}
