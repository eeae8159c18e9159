//! Configuration layers and their origins.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::schema::LayerSchema;

/// Where a layer came from, in increasing order of specificity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerOrigin {
    /// Built-in defaults compiled into the binary.
    Default,
    /// `~/.config/loadout/config.toml`.
    Global,
    /// A file in the profile directory, part of the active inheritance chain.
    Profile,
    /// `.loadout/config.toml` in the workspace.
    Project,
    /// `.loadout/config.local.toml` in the workspace (untracked).
    Local,
}

impl std::fmt::Display for LayerOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Global => write!(f, "global"),
            Self::Profile => write!(f, "profile"),
            Self::Project => write!(f, "project"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// Reference to a loadable layer: origin plus, for file-backed layers, the
/// path to read. The built-in defaults have no path.
#[derive(Debug, Clone)]
pub enum LayerRef {
    Default,
    Global(PathBuf),
    Profile { name: String, path: PathBuf },
    Project(PathBuf),
    Local(PathBuf),
}

impl LayerRef {
    #[must_use]
    pub fn origin(&self) -> LayerOrigin {
        match self {
            Self::Default => LayerOrigin::Default,
            Self::Global(_) => LayerOrigin::Global,
            Self::Profile { .. } => LayerOrigin::Profile,
            Self::Project(_) => LayerOrigin::Project,
            Self::Local(_) => LayerOrigin::Local,
        }
    }

    /// Missing files are an error only for required layers: the built-in
    /// defaults (can't be missing) and profiles requested by name.
    #[must_use]
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Default | Self::Profile { .. })
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Default => None,
            Self::Global(p) | Self::Project(p) | Self::Local(p) => Some(p),
            Self::Profile { path, .. } => Some(path),
        }
    }
}

/// A loaded, immutable configuration layer. Re-read on every invocation; the
/// process keeps no state between runs.
#[derive(Debug, Clone)]
pub struct ConfigLayer {
    pub origin: LayerOrigin,
    /// Source file, `None` for the built-in defaults and empty layers.
    pub source: Option<PathBuf>,
    /// Profile name, for `Profile` layers.
    pub profile: Option<String>,
    pub schema: LayerSchema,
}

impl ConfigLayer {
    /// An empty layer standing in for an absent optional file.
    #[must_use]
    pub fn empty(origin: LayerOrigin) -> Self {
        Self {
            origin,
            source: None,
            profile: None,
            schema: LayerSchema::default(),
        }
    }
}
