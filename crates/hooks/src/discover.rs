//! Hook discovery from filesystem scopes.
//!
//! Each scope is a directory of hook directories, each containing a
//! `HOOK.md`. Scopes are scanned in fixed precedence order (built-in, global,
//! project) and entries within a scope are sorted by name, so discovery order
//! is deterministic across runs. Unlike config layers, a later scope with the
//! same hook name replaces the earlier definition wholesale.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    builtin,
    error::{HookError, Result},
    metadata::{ParsedHook, parse_hook_md},
};

/// Scope a hook was discovered in, least specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HookScope {
    Builtin,
    Global,
    Project,
}

impl std::fmt::Display for HookScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin => write!(f, "builtin"),
            Self::Global => write!(f, "global"),
            Self::Project => write!(f, "project"),
        }
    }
}

/// Filesystem hook discovery across the two file-backed scopes, seeded with
/// the compiled-in definitions.
#[derive(Debug, Clone)]
pub struct FsHookDiscovery {
    global_dir: PathBuf,
    project_dir: PathBuf,
}

impl FsHookDiscovery {
    pub fn new(global_dir: impl Into<PathBuf>, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            global_dir: global_dir.into(),
            project_dir: project_dir.into(),
        }
    }

    /// Discover every hook definition in scope precedence order. Fails
    /// closed: one unreadable or malformed HOOK.md aborts the pass.
    pub fn discover(&self) -> Result<Vec<(ParsedHook, HookScope)>> {
        let mut hooks: Vec<(ParsedHook, HookScope)> = builtin::builtin_hooks()?
            .into_iter()
            .map(|h| (h, HookScope::Builtin))
            .collect();

        scan_dir(&self.global_dir, HookScope::Global, &mut hooks)?;
        scan_dir(&self.project_dir, HookScope::Project, &mut hooks)?;
        Ok(hooks)
    }
}

fn scan_dir(
    base: &Path,
    scope: HookScope,
    hooks: &mut Vec<(ParsedHook, HookScope)>,
) -> Result<()> {
    let entries = match std::fs::read_dir(base) {
        Ok(e) => e,
        // An absent scope directory simply contributes nothing.
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(source) => {
            return Err(HookError::Read {
                path: base.to_path_buf(),
                source,
            });
        },
    };

    // read_dir order is platform-dependent; sort for deterministic output.
    let mut dirs: Vec<PathBuf> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();

    for hook_dir in dirs {
        let hook_md = hook_dir.join("HOOK.md");
        if !hook_md.is_file() {
            continue;
        }
        let content = std::fs::read_to_string(&hook_md).map_err(|source| HookError::Read {
            path: hook_md.clone(),
            source,
        })?;
        let parsed = parse_hook_md(&content, &hook_md)?;
        debug!(name = %parsed.metadata.name, %scope, "discovered hook");
        hooks.push((parsed, scope));
    }
    Ok(())
}
