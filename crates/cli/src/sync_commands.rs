//! The `sync` command: resolve, compose, and regenerate both artifacts.

use {
    loadout_config::Resolver,
    loadout_hooks::{FsHookDiscovery, compose, settings},
    loadout_sync::{Markers, SyncOutcome, SyncWriter},
};

pub fn sync(resolver: &Resolver, profile: Option<&str>, check: bool) -> anyhow::Result<()> {
    let paths = resolver.paths();
    let active = resolver.active_profile(profile)?;
    let merged = resolver.resolve(active)?;

    let discovery = FsHookDiscovery::new(paths.global_hooks_dir(), paths.project_hooks_dir());
    let composed = compose(discovery.discover()?, &merged.hooks.effective_disabled())?;

    // Markers are whole lines; wrap the block in newlines so the section
    // reads as its own paragraph.
    let instructions = format!("\n{}\n", crate::render::instructions_block(&merged));
    let settings_doc = settings::to_settings_string(&composed);

    let writer = SyncWriter::new(Markers::default(), Some(paths.backups_dir()));

    if check {
        // Dry run: splice in memory and compare, writing nothing.
        let mut dirty = false;
        for (name, path, next) in [
            ("instructions", paths.instructions_file(), {
                let existing = std::fs::read_to_string(paths.instructions_file()).ok();
                loadout_sync::splice(&Markers::default(), existing.as_deref(), &instructions)?
            }),
            ("settings", paths.settings_file(), settings_doc.clone()),
        ] {
            let current = std::fs::read_to_string(&path).unwrap_or_default();
            if current != next {
                println!("{name} would change: {}", path.display());
                dirty = true;
            }
        }
        if !dirty {
            println!("everything up to date");
        }
        return Ok(());
    }

    let outcome = writer.sync_managed(&paths.instructions_file(), &instructions)?;
    describe("instructions", &paths.instructions_file(), &outcome);

    let outcome = writer.sync_full(&paths.settings_file(), &settings_doc)?;
    describe("settings", &paths.settings_file(), &outcome);

    Ok(())
}

fn describe(name: &str, path: &std::path::Path, outcome: &SyncOutcome) {
    match outcome {
        SyncOutcome::Created => println!("{name}: created {}", path.display()),
        SyncOutcome::Updated { backup } => {
            println!("{name}: updated {}", path.display());
            if let Some(backup) = backup {
                println!("{name}: previous version saved to {}", backup.display());
            }
        },
        SyncOutcome::Unchanged => println!("{name}: unchanged"),
    }
}
