//! Renders the managed instructions block from a resolved configuration.
//!
//! Output must be deterministic: same `MergedConfig`, same bytes, so the
//! sync writer's no-op detection holds across runs.

use loadout_config::MergedConfig;

/// The markdown block spliced into the instructions file's managed section.
#[must_use]
pub fn instructions_block(merged: &MergedConfig) -> String {
    let mut out = String::from("## Loadout\n\n");

    match &merged.active_profile {
        Some(p) => out.push_str(&format!("Active profile: `{}`\n", p.name)),
        None => out.push_str("Active profile: none\n"),
    }
    if let Some(pm) = &merged.package_manager {
        out.push_str(&format!("Package manager: `{pm}`\n"));
    }
    if let Some(model) = &merged.model_default {
        out.push_str(&format!("Default model: `{model}`\n"));
    }
    if !merged.model_routing.is_empty() {
        out.push_str("\n### Model routing\n\n");
        for (role, model) in &merged.model_routing {
            out.push_str(&format!("- {role}: `{model}`\n"));
        }
    }

    let skills = merged.skills.effective_enabled();
    if !skills.is_empty() {
        out.push_str("\n### Enabled skills\n\n");
        for skill in &skills {
            out.push_str(&format!("- {skill}\n"));
        }
    }

    let mcp = merged.mcp.effective_enabled();
    if !mcp.is_empty() {
        out.push_str("\n### MCP servers\n\n");
        for server in &mcp {
            out.push_str(&format!("- {server}\n"));
        }
    }

    for (agent, overrides) in &merged.agents {
        out.push_str(&format!("\n### Agent: {agent}\n\n"));
        if let Some(model) = &overrides.model {
            out.push_str(&format!("- model: `{model}`\n"));
        }
        if let Some(turns) = overrides.max_turns {
            out.push_str(&format!("- max turns: {turns}\n"));
        }
        if let Some(instructions) = &overrides.instructions {
            out.push_str(&format!("\n{instructions}\n"));
        }
    }

    out.trim_end().to_string()
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use loadout_config::{ConfigLayer, LayerOrigin, LayerSchema, merge};

    use super::*;

    fn merged_from(build: impl FnOnce(&mut LayerSchema)) -> MergedConfig {
        let mut schema = LayerSchema::default();
        build(&mut schema);
        merge(&[ConfigLayer {
            origin: LayerOrigin::Global,
            source: None,
            profile: None,
            schema,
        }])
    }

    #[test]
    fn render_is_deterministic() {
        let merged = merged_from(|s| {
            s.model.default = Some("sonnet".into());
            s.skills.enabled = vec!["executor".into(), "architect".into()];
        });
        assert_eq!(instructions_block(&merged), instructions_block(&merged));
    }

    #[test]
    fn lists_effective_skills_only() {
        let merged = merged_from(|s| {
            s.skills.enabled = vec!["executor".into(), "architect".into()];
            s.skills.disabled = vec!["architect".into()];
        });
        let block = instructions_block(&merged);
        assert!(block.starts_with("## Loadout"));
        assert!(block.contains("- executor\n"));
        assert!(!block.contains("- architect"));
    }

    #[test]
    fn empty_config_renders_header_only() {
        let block = instructions_block(&MergedConfig::default());
        assert!(block.contains("Active profile: none"));
        assert!(!block.contains("### "));
    }
}
