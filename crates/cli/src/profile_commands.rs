//! Profile management commands.

use {
    clap::Subcommand,
    loadout_config::{Resolver, merge},
};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// List profiles; the active one is starred.
    List,
    /// Show a profile's folded configuration (its full inheritance chain).
    Show {
        /// Profile name; defaults to the active profile.
        name: Option<String>,
    },
    /// Create a new profile.
    Create {
        name: String,
        /// Clone the body of an existing profile.
        #[arg(long)]
        from: Option<String>,
    },
    /// Make a profile the active one.
    Use { name: String },
    /// Delete a profile (refused while it is active).
    Delete { name: String },
}

pub fn handle(resolver: &Resolver, action: &ProfileAction) -> anyhow::Result<()> {
    let store = resolver.profile_store();

    match action {
        ProfileAction::List => {
            let active = store.active()?;
            let names = store.list()?;
            if names.is_empty() {
                println!("no profiles yet; `loadout profile create <name>` makes one");
                return Ok(());
            }
            for name in names {
                let marker = if active.as_deref() == Some(name.as_str()) {
                    "*"
                } else {
                    " "
                };
                println!("{marker} {name}");
            }
        },
        ProfileAction::Show { name } => {
            let name = match name.clone().or(store.active()?) {
                Some(n) => n,
                None => anyhow::bail!("no profile named and none active"),
            };
            // The profile fold: the chain pushed through the same merge
            // engine the full resolution uses.
            let chain = store.resolve_chain(&name)?;
            let ancestors: Vec<_> = chain
                .iter()
                .filter_map(|l| l.profile.clone())
                .collect();
            println!("chain: {}", ancestors.join(" -> "));

            let folded = merge(&chain);
            println!("{}", serde_json::to_string_pretty(&folded)?);
        },
        ProfileAction::Create { name, from } => {
            let path = store.create(name, from.as_deref())?;
            println!("created {}", path.display());
        },
        ProfileAction::Use { name } => {
            store.set_active(name)?;
            println!("active profile: {name}");
        },
        ProfileAction::Delete { name } => {
            store.delete(name)?;
            println!("deleted profile {name}");
        },
    }
    Ok(())
}
