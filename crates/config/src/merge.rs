//! Deep merge engine.
//!
//! Folds an ordered list of layers, least specific first, into one
//! [`MergedConfig`]. One engine serves both folds: the profile inheritance
//! chain and the five top-level layers.
//!
//! Per-field rules:
//! - scalars: last-defined-wins, absent never erases;
//! - enabled/disabled sets: union each side independently, and the most
//!   specific layer that mentioned a name decides its effective state;
//! - keyed maps (model routing, agent overrides): deep-merge per key.
//!
//! All output collections are ordered (`BTreeMap`/`BTreeSet`) so merging the
//! same layers twice is bit-identical.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{
    layer::ConfigLayer,
    resolve::ActiveProfile,
    schema::{AgentOverride, ToggleSection},
};

/// Effective state of one toggled name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    Enabled,
    Disabled,
}

/// Union of every layer's enabled/disabled mentions for one toggle family
/// (skills, hooks, or MCP servers), plus the per-name winner.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ToggleState {
    /// Every name any layer enabled.
    pub enabled: BTreeSet<String>,
    /// Every name any layer disabled.
    pub disabled: BTreeSet<String>,
    /// Most-specific-mention-wins classification for each name.
    state: BTreeMap<String, Toggle>,
}

impl ToggleState {
    fn apply(&mut self, section: &ToggleSection) {
        for name in &section.enabled {
            self.enabled.insert(name.clone());
            self.state.insert(name.clone(), Toggle::Enabled);
        }
        for name in &section.disabled {
            self.disabled.insert(name.clone());
            self.state.insert(name.clone(), Toggle::Disabled);
        }
    }

    /// Effective state of `name`: the classification from the most specific
    /// layer that mentioned it, or `None` if no layer did.
    #[must_use]
    pub fn state(&self, name: &str) -> Option<Toggle> {
        self.state.get(name).copied()
    }

    /// Names whose effective state is enabled. This is the set downstream
    /// consumers act on; `enabled` alone still contains names a more specific
    /// layer has since disabled.
    #[must_use]
    pub fn effective_enabled(&self) -> BTreeSet<String> {
        self.state
            .iter()
            .filter(|(_, t)| **t == Toggle::Enabled)
            .map(|(n, _)| n.clone())
            .collect()
    }

    /// Names whose effective state is disabled.
    #[must_use]
    pub fn effective_disabled(&self) -> BTreeSet<String> {
        self.state
            .iter()
            .filter(|(_, t)| **t == Toggle::Disabled)
            .map(|(n, _)| n.clone())
            .collect()
    }
}

/// The single resolved configuration. Recomputed fresh on every resolution;
/// the layer files remain the source of truth.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergedConfig {
    pub model_default: Option<String>,
    pub model_routing: BTreeMap<String, String>,
    pub skills: ToggleState,
    pub hooks: ToggleState,
    pub mcp: ToggleState,
    pub max_session_usd: Option<f64>,
    pub warn_at_usd: Option<f64>,
    pub package_manager: Option<String>,
    pub agents: BTreeMap<String, AgentOverride>,
    /// Which profile (if any) contributed the `profile` layer, and how it
    /// was selected. Filled in by the resolution facade.
    pub active_profile: Option<ActiveProfile>,
}

/// Fold `layers` (least specific first) into one [`MergedConfig`].
#[must_use]
pub fn merge(layers: &[ConfigLayer]) -> MergedConfig {
    let mut merged = MergedConfig::default();
    for layer in layers {
        apply(&mut merged, layer);
    }
    merged
}

fn apply(merged: &mut MergedConfig, layer: &ConfigLayer) {
    let schema = &layer.schema;

    // Scalars: a later layer's Some wins, its None leaves the value alone.
    override_scalar(&mut merged.model_default, &schema.model.default);
    override_scalar(&mut merged.package_manager, &schema.package_manager);
    override_scalar(&mut merged.max_session_usd, &schema.budget.max_session_usd);
    override_scalar(&mut merged.warn_at_usd, &schema.budget.warn_at_usd);

    // Routing table: per-key override, earlier keys survive.
    for (role, model) in &schema.model.routing {
        merged.model_routing.insert(role.clone(), model.clone());
    }

    merged.skills.apply(&schema.skills);
    merged.hooks.apply(&schema.hooks);
    merged.mcp.apply(&schema.mcp);

    // Agent overrides: deep-merge field-wise per agent, never replacing the
    // whole map or a whole entry.
    for (name, incoming) in &schema.agents {
        let entry = merged.agents.entry(name.clone()).or_default();
        override_scalar(&mut entry.model, &incoming.model);
        override_scalar(&mut entry.instructions, &incoming.instructions);
        override_scalar(&mut entry.max_turns, &incoming.max_turns);
    }
}

fn override_scalar<T: Clone>(target: &mut Option<T>, incoming: &Option<T>) {
    if let Some(value) = incoming {
        *target = Some(value.clone());
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        layer::{ConfigLayer, LayerOrigin},
        schema::LayerSchema,
    };

    fn layer(origin: LayerOrigin, toml: &str) -> ConfigLayer {
        let schema: LayerSchema = toml::from_str(toml).unwrap();
        ConfigLayer {
            origin,
            source: None,
            profile: None,
            schema,
        }
    }

    #[test]
    fn later_scalar_wins() {
        let merged = merge(&[
            layer(LayerOrigin::Default, "[model]\ndefault = \"sonnet\""),
            layer(LayerOrigin::Project, "[model]\ndefault = \"opus\""),
        ]);
        assert_eq!(merged.model_default.as_deref(), Some("opus"));
    }

    #[test]
    fn absent_scalar_never_erases() {
        let merged = merge(&[
            layer(LayerOrigin::Default, "package_manager = \"pnpm\""),
            layer(LayerOrigin::Project, "[model]\ndefault = \"opus\""),
        ]);
        assert_eq!(merged.package_manager.as_deref(), Some("pnpm"));
    }

    #[test]
    fn toggle_sets_union_and_dedupe() {
        let merged = merge(&[
            layer(LayerOrigin::Global, "[skills]\nenabled = [\"a\", \"b\"]"),
            layer(LayerOrigin::Project, "[skills]\nenabled = [\"b\", \"c\"]"),
        ]);
        let want: BTreeSet<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(merged.skills.enabled, want);
    }

    #[test]
    fn most_specific_mention_wins_either_direction() {
        let enable_then_disable = merge(&[
            layer(LayerOrigin::Global, "[skills]\nenabled = [\"x\"]"),
            layer(LayerOrigin::Project, "[skills]\ndisabled = [\"x\"]"),
        ]);
        assert_eq!(enable_then_disable.skills.state("x"), Some(Toggle::Disabled));
        // Both mentions remain visible in the unions.
        assert!(enable_then_disable.skills.enabled.contains("x"));
        assert!(enable_then_disable.skills.disabled.contains("x"));

        let disable_then_enable = merge(&[
            layer(LayerOrigin::Global, "[skills]\ndisabled = [\"x\"]"),
            layer(LayerOrigin::Project, "[skills]\nenabled = [\"x\"]"),
        ]);
        assert_eq!(disable_then_enable.skills.state("x"), Some(Toggle::Enabled));
    }

    #[test]
    fn routing_table_merges_per_key() {
        let merged = merge(&[
            layer(
                LayerOrigin::Default,
                "[model.routing]\nplanner = \"opus\"\nreviewer = \"sonnet\"",
            ),
            layer(LayerOrigin::Project, "[model.routing]\nreviewer = \"haiku\""),
        ]);
        assert_eq!(merged.model_routing["planner"], "opus");
        assert_eq!(merged.model_routing["reviewer"], "haiku");
    }

    #[test]
    fn agent_overrides_merge_field_wise() {
        let merged = merge(&[
            layer(
                LayerOrigin::Global,
                "[agents.reviewer]\nmodel = \"haiku\"\nmax_turns = 4",
            ),
            layer(
                LayerOrigin::Project,
                "[agents.reviewer]\ninstructions = \"be strict\"",
            ),
        ]);
        let reviewer = &merged.agents["reviewer"];
        assert_eq!(reviewer.model.as_deref(), Some("haiku"));
        assert_eq!(reviewer.instructions.as_deref(), Some("be strict"));
        assert_eq!(reviewer.max_turns, Some(4));
    }

    #[test]
    fn merge_is_deterministic() {
        let layers = [
            layer(
                LayerOrigin::Global,
                "[skills]\nenabled = [\"z\", \"a\"]\n[model.routing]\nb = \"x\"\na = \"y\"",
            ),
            layer(LayerOrigin::Project, "[skills]\ndisabled = [\"m\"]"),
        ];
        let first = merge(&layers);
        let second = merge(&layers);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn empty_layer_changes_nothing() {
        let base = merge(&[layer(
            LayerOrigin::Default,
            "[model]\ndefault = \"sonnet\"\n[skills]\nenabled = [\"executor\"]",
        )]);
        let with_empty = merge(&[
            layer(
                LayerOrigin::Default,
                "[model]\ndefault = \"sonnet\"\n[skills]\nenabled = [\"executor\"]",
            ),
            ConfigLayer::empty(LayerOrigin::Local),
        ]);
        assert_eq!(base, with_empty);
    }
}
