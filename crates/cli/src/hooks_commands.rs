//! Hook inspection commands.

use {
    clap::Subcommand,
    loadout_config::Resolver,
    loadout_hooks::{FsHookDiscovery, compose},
};

#[derive(Subcommand)]
pub enum HookAction {
    /// List composed hooks per event, in the order they will run.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Show one discovered hook in detail.
    Info { name: String },
}

pub fn handle(resolver: &Resolver, profile: Option<&str>, action: &HookAction) -> anyhow::Result<()> {
    let paths = resolver.paths();
    let discovery = FsHookDiscovery::new(paths.global_hooks_dir(), paths.project_hooks_dir());

    match action {
        HookAction::List { json } => {
            let active = resolver.active_profile(profile)?;
            let merged = resolver.resolve(active)?;
            let set = compose(discovery.discover()?, &merged.hooks.effective_disabled())?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&set)?);
                return Ok(());
            }
            if set.total() == 0 {
                println!("no hooks compose for the current configuration");
                return Ok(());
            }
            for (event, hooks) in &set.events {
                println!("{event}:");
                for hook in hooks {
                    println!("  {} [{}] -> {}", hook.name, hook.matcher, hook.command);
                }
            }
        },
        HookAction::Info { name } => {
            let discovered = discovery.discover()?;
            // Last mention wins, mirroring composition's override rule.
            let found = discovered
                .iter()
                .rev()
                .find(|(h, _)| h.metadata.name == *name);
            let Some((hook, scope)) = found else {
                anyhow::bail!("no hook named `{name}` in any scope");
            };
            let meta = &hook.metadata;
            println!("name:     {}", meta.name);
            println!("scope:    {scope}");
            println!("event:    {}", meta.event);
            println!("matcher:  {}", meta.matcher);
            println!("command:  {}", meta.command);
            println!("priority: {}", meta.priority);
            println!("enabled:  {}", meta.enabled);
            if !meta.description.is_empty() {
                println!("\n{}", meta.description);
            }
            if !hook.body.is_empty() {
                println!("\n{}", hook.body);
            }
        },
    }
    Ok(())
}
