//! The `show` and `validate` commands.

use loadout_config::{Resolver, Severity, validate::validate as validate_layers};

pub fn show(resolver: &Resolver, profile: Option<&str>, json: bool) -> anyhow::Result<()> {
    let active = resolver.active_profile(profile)?;
    let merged = resolver.resolve(active)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&merged)?);
        return Ok(());
    }

    match &merged.active_profile {
        Some(p) => println!("profile: {} ({:?})", p.name, p.source),
        None => println!("profile: (none)"),
    }
    println!(
        "model: {}",
        merged.model_default.as_deref().unwrap_or("(unset)")
    );
    for (role, model) in &merged.model_routing {
        println!("  route {role} -> {model}");
    }
    if let Some(pm) = &merged.package_manager {
        println!("package manager: {pm}");
    }
    if let Some(max) = merged.max_session_usd {
        println!("budget: max {max} USD (warn at {:?})", merged.warn_at_usd);
    }

    for (family, state) in [
        ("skills", &merged.skills),
        ("hooks", &merged.hooks),
        ("mcp", &merged.mcp),
    ] {
        let enabled = state.effective_enabled();
        let disabled = state.effective_disabled();
        if enabled.is_empty() && disabled.is_empty() {
            continue;
        }
        println!("{family}:");
        for name in &enabled {
            println!("  + {name}");
        }
        for name in &disabled {
            println!("  - {name}");
        }
    }

    for (agent, overrides) in &merged.agents {
        println!("agent {agent}:");
        if let Some(model) = &overrides.model {
            println!("  model: {model}");
        }
        if let Some(turns) = overrides.max_turns {
            println!("  max turns: {turns}");
        }
    }
    Ok(())
}

pub fn validate(resolver: &Resolver) -> anyhow::Result<()> {
    let store = resolver.profile_store();
    let result = validate_layers(resolver.paths(), &store);

    for d in &result.diagnostics {
        match &d.file {
            Some(file) => println!("{}: [{}] {} ({})", d.severity, d.category, d.message, file.display()),
            None => println!("{}: [{}] {}", d.severity, d.category, d.message),
        }
    }

    let errors = result.count(Severity::Error);
    let warnings = result.count(Severity::Warning);
    println!("{errors} error(s), {warnings} warning(s)");

    if result.has_errors() {
        anyhow::bail!("validation failed");
    }
    Ok(())
}
