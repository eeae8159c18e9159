use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by configuration loading, profile resolution, and merging.
///
/// Every variant carries enough structured context for the CLI layer to print
/// an actionable message; nothing in this crate prints directly.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A layer file exists but is not valid TOML. The underlying error's
    /// display includes line/column information.
    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    /// A required layer file (built-in defaults, or a profile requested by
    /// name) could not be found.
    #[error("required configuration layer missing: {}", .path.display())]
    MissingLayer { path: PathBuf },

    /// A directly requested profile does not exist on disk.
    #[error("profile `{name}` not found (looked in {})", .searched.display())]
    ProfileNotFound { name: String, searched: PathBuf },

    /// A profile named by another profile's `extends` does not exist.
    #[error("profile `{name}` not found (required by `extends` in profile `{requested_by}`)")]
    MissingAncestor {
        name: String,
        requested_by: String,
        searched: PathBuf,
    },

    /// A profile `extends` chain loops back on itself. The cycle lists every
    /// profile involved, ending with the repeated name: `a -> b -> a`.
    #[error("circular profile inheritance: {}", .cycle.join(" -> "))]
    CircularInheritance { cycle: Vec<String> },

    /// The active profile cannot be deleted while it is active.
    #[error("profile `{name}` is the active profile and cannot be deleted")]
    ProfileActive { name: String },

    /// A profile with this name already exists.
    #[error("profile `{name}` already exists at {}", .path.display())]
    ProfileExists { name: String, path: PathBuf },

    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
