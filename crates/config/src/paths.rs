//! Filesystem locations for all layers, profiles, hooks, and artifacts.

use std::path::{Path, PathBuf};

/// Resolved directory layout for one invocation.
///
/// Both roots can be overridden (CLI flag or environment), so every consumer
/// takes a `ConfigPaths` instead of recomputing locations.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// User-global configuration directory (`~/.config/loadout/`).
    pub config_dir: PathBuf,
    /// Workspace root (where `.loadout/` and generated artifacts live).
    pub workspace_root: PathBuf,
}

impl ConfigPaths {
    pub fn new(config_dir: impl Into<PathBuf>, workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            workspace_root: workspace_root.into(),
        }
    }

    /// Default layout: platform config dir plus the current directory.
    #[must_use]
    pub fn discover(workspace_root: &Path) -> Self {
        let config_dir = directories::ProjectDirs::from("", "", "loadout")
            .map(|d| d.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".loadout-home"));
        Self::new(config_dir, workspace_root)
    }

    #[must_use]
    pub fn global_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    #[must_use]
    pub fn profiles_dir(&self) -> PathBuf {
        self.config_dir.join("profiles")
    }

    #[must_use]
    pub fn profile_file(&self, name: &str) -> PathBuf {
        self.profiles_dir().join(format!("{name}.toml"))
    }

    /// Single-line pointer file naming the active profile.
    #[must_use]
    pub fn active_profile_file(&self) -> PathBuf {
        self.config_dir.join("active-profile")
    }

    #[must_use]
    pub fn project_file(&self) -> PathBuf {
        self.workspace_root.join(".loadout/config.toml")
    }

    #[must_use]
    pub fn local_file(&self) -> PathBuf {
        self.workspace_root.join(".loadout/config.local.toml")
    }

    #[must_use]
    pub fn global_hooks_dir(&self) -> PathBuf {
        self.config_dir.join("hooks")
    }

    #[must_use]
    pub fn project_hooks_dir(&self) -> PathBuf {
        self.workspace_root.join(".loadout/hooks")
    }

    /// Generated hook settings consumed by the downstream agent.
    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.workspace_root.join(".agent/settings.json")
    }

    /// Instructions file with the managed section.
    #[must_use]
    pub fn instructions_file(&self) -> PathBuf {
        self.workspace_root.join("AGENTS.md")
    }

    /// Snapshots taken before overwriting generated artifacts.
    #[must_use]
    pub fn backups_dir(&self) -> PathBuf {
        self.config_dir.join("backups")
    }
}
