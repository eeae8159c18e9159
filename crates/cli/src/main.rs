mod config_commands;
mod hooks_commands;
mod profile_commands;
mod render;
mod sync_commands;

use std::{path::PathBuf, process::ExitCode};

use {
    clap::{Parser, Subcommand},
    loadout_config::{ConfigError, ConfigPaths, Resolver},
    loadout_hooks::HookError,
    loadout_sync::SyncError,
    tracing_subscriber::EnvFilter,
};

#[derive(Parser)]
#[command(name = "loadout", about = "Resolve and sync coding-agent loadout configuration")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Custom config directory (overrides ~/.config/loadout/).
    #[arg(long, global = true, env = "LOADOUT_CONFIG_DIR")]
    config_dir: Option<PathBuf>,

    /// Workspace root (defaults to the current directory).
    #[arg(long, global = true, env = "LOADOUT_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Resolve with this profile instead of the active one.
    #[arg(long, global = true)]
    profile: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the fully resolved configuration.
    Show {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Check every layer and profile without applying anything.
    Validate,
    /// Profile management.
    Profile {
        #[command(subcommand)]
        action: profile_commands::ProfileAction,
    },
    /// Hook inspection.
    Hooks {
        #[command(subcommand)]
        action: hooks_commands::HookAction,
    },
    /// Regenerate the instructions and hook-settings artifacts.
    Sync {
        /// Report what would change without writing.
        #[arg(long)]
        check: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(cli.log_level.clone())),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let workspace = match &cli.workspace {
        Some(path) => path.clone(),
        None => std::env::current_dir()?,
    };
    let paths = match &cli.config_dir {
        Some(dir) => ConfigPaths::new(dir.clone(), workspace),
        None => ConfigPaths::discover(&workspace),
    };
    let resolver = Resolver::new(paths);
    tracing::debug!(
        config_dir = %resolver.paths().config_dir.display(),
        workspace = %resolver.paths().workspace_root.display(),
        "resolved directory layout"
    );

    match &cli.command {
        Commands::Show { json } => config_commands::show(&resolver, cli.profile.as_deref(), *json),
        Commands::Validate => config_commands::validate(&resolver),
        Commands::Profile { action } => profile_commands::handle(&resolver, action),
        Commands::Hooks { action } => {
            hooks_commands::handle(&resolver, cli.profile.as_deref(), action)
        },
        Commands::Sync { check } => sync_commands::sync(&resolver, cli.profile.as_deref(), *check),
    }
}

/// Map a failure to an exit code and, where the error is one the user can fix
/// directly, a remediation hint.
fn report(err: &anyhow::Error) -> ExitCode {
    eprintln!("error: {err:#}");

    let code = if let Some(config) = err.downcast_ref::<ConfigError>() {
        match config {
            ConfigError::CircularInheritance { .. } => {
                eprintln!("hint: break the cycle by removing one `extends` line");
            },
            ConfigError::ProfileNotFound { .. } | ConfigError::MissingAncestor { .. } => {
                eprintln!("hint: `loadout profile list` shows the profiles that exist");
            },
            ConfigError::Parse { path, .. } => {
                eprintln!("hint: fix the TOML in {}", path.display());
            },
            _ => {},
        }
        2
    } else if err.downcast_ref::<HookError>().is_some() {
        3
    } else if let Some(sync) = err.downcast_ref::<SyncError>() {
        if matches!(sync, SyncError::MalformedSection { .. }) {
            eprintln!("hint: restore both managed-section markers, or delete the file to regenerate it");
        }
        4
    } else {
        1
    };
    ExitCode::from(code)
}
