//! Configuration validation.
//!
//! Checks every present layer without applying any of it: TOML syntax,
//! unknown top-level keys, self-contradictory toggle lists, budget sanity,
//! and profile-chain health. Produces diagnostics for the CLI to print.

use std::path::{Path, PathBuf};

use crate::{
    error::ConfigError,
    paths::ConfigPaths,
    profiles::ProfileStore,
    schema::LayerSchema,
};

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// A single validation finding.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Category: "syntax", "unknown-field", "toggle-conflict", "budget",
    /// "profile".
    pub category: &'static str,
    pub file: Option<PathBuf>,
    pub message: String,
}

/// Everything found across all layers.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    fn push(
        &mut self,
        severity: Severity,
        category: &'static str,
        file: Option<&Path>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(Diagnostic {
            severity,
            category,
            file: file.map(Path::to_path_buf),
            message: message.into(),
        });
    }
}

/// Top-level keys the schema understands. Anything else is reported as a
/// warning, never an error (forward compatibility).
const KNOWN_TOP_LEVEL: &[&str] = &[
    "agents",
    "budget",
    "extends",
    "hooks",
    "mcp",
    "model",
    "package_manager",
    "skills",
];

/// Validate every present layer plus the profile directory.
pub fn validate(paths: &ConfigPaths, store: &ProfileStore) -> ValidationResult {
    let mut result = ValidationResult::default();

    for file in [
        paths.global_file(),
        paths.project_file(),
        paths.local_file(),
    ] {
        validate_file(&file, &mut result);
    }

    match store.list() {
        Ok(names) => {
            for name in &names {
                validate_file(&store.profile_path(name), &mut result);
            }
            validate_chains(store, &names, &mut result);
        },
        Err(e) => result.push(Severity::Error, "profile", None, e.to_string()),
    }

    result
}

fn validate_file(path: &Path, result: &mut ValidationResult) {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        // Optional layers may simply not exist.
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
        Err(e) => {
            result.push(Severity::Error, "syntax", Some(path), e.to_string());
            return;
        },
    };

    let value: toml::Value = match toml::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            result.push(Severity::Error, "syntax", Some(path), e.to_string());
            return;
        },
    };

    if let Some(table) = value.as_table() {
        for key in table.keys() {
            if !KNOWN_TOP_LEVEL.contains(&key.as_str()) {
                result.push(
                    Severity::Warning,
                    "unknown-field",
                    Some(path),
                    format!("unknown key `{key}` (ignored)"),
                );
            }
        }
    }

    let schema: LayerSchema = match toml::from_str(&raw) {
        Ok(s) => s,
        Err(e) => {
            result.push(Severity::Error, "syntax", Some(path), e.to_string());
            return;
        },
    };

    for (family, section) in [
        ("skills", &schema.skills),
        ("hooks", &schema.hooks),
        ("mcp", &schema.mcp),
    ] {
        for name in &section.enabled {
            if section.disabled.contains(name) {
                result.push(
                    Severity::Warning,
                    "toggle-conflict",
                    Some(path),
                    format!("`{name}` is both enabled and disabled in [{family}]"),
                );
            }
        }
    }

    for (key, value) in [
        ("budget.max_session_usd", schema.budget.max_session_usd),
        ("budget.warn_at_usd", schema.budget.warn_at_usd),
    ] {
        if let Some(v) = value
            && v < 0.0
        {
            result.push(
                Severity::Warning,
                "budget",
                Some(path),
                format!("{key} is negative ({v})"),
            );
        }
    }
}

fn validate_chains(store: &ProfileStore, names: &[String], result: &mut ValidationResult) {
    for name in names {
        match store.resolve_chain(name) {
            Ok(_) => {},
            Err(
                e @ (ConfigError::CircularInheritance { .. } | ConfigError::MissingAncestor { .. }),
            ) => {
                result.push(
                    Severity::Error,
                    "profile",
                    Some(&store.profile_path(name)),
                    e.to_string(),
                );
            },
            // Syntax problems are already reported per-file above.
            Err(_) => {},
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn setup(tmp: &tempfile::TempDir) -> (ConfigPaths, ProfileStore) {
        let paths = ConfigPaths::new(tmp.path().join("home"), tmp.path().join("work"));
        std::fs::create_dir_all(paths.profiles_dir()).unwrap();
        std::fs::create_dir_all(paths.workspace_root.join(".loadout")).unwrap();
        let store = ProfileStore::new(paths.profiles_dir(), paths.active_profile_file());
        (paths, store)
    }

    #[test]
    fn clean_tree_validates() {
        let tmp = tempfile::tempdir().unwrap();
        let (paths, store) = setup(&tmp);
        std::fs::write(paths.global_file(), "[model]\ndefault = \"sonnet\"\n").unwrap();
        let result = validate(&paths, &store);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn syntax_error_is_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let (paths, store) = setup(&tmp);
        std::fs::write(paths.project_file(), "[model\n").unwrap();
        let result = validate(&paths, &store);
        assert!(result.has_errors());
        assert_eq!(result.diagnostics[0].category, "syntax");
    }

    #[test]
    fn unknown_key_is_a_warning() {
        let tmp = tempfile::tempdir().unwrap();
        let (paths, store) = setup(&tmp);
        std::fs::write(paths.global_file(), "future_key = 1\n").unwrap();
        let result = validate(&paths, &store);
        assert!(!result.has_errors());
        assert_eq!(result.count(Severity::Warning), 1);
        assert_eq!(result.diagnostics[0].category, "unknown-field");
    }

    #[test]
    fn toggle_conflict_within_one_layer_warns() {
        let tmp = tempfile::tempdir().unwrap();
        let (paths, store) = setup(&tmp);
        std::fs::write(
            paths.local_file(),
            "[skills]\nenabled = [\"x\"]\ndisabled = [\"x\"]\n",
        )
        .unwrap();
        let result = validate(&paths, &store);
        assert_eq!(result.count(Severity::Warning), 1);
        assert_eq!(result.diagnostics[0].category, "toggle-conflict");
    }

    #[test]
    fn profile_cycle_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let (paths, store) = setup(&tmp);
        std::fs::write(store.profile_path("a"), "extends = \"b\"\n").unwrap();
        std::fs::write(store.profile_path("b"), "extends = \"a\"\n").unwrap();
        let result = validate(&paths, &store);
        assert!(result.has_errors());
        assert!(
            result
                .diagnostics
                .iter()
                .any(|d| d.category == "profile" && d.message.contains("circular"))
        );
    }
}
