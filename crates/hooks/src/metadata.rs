//! HOOK.md metadata parsing.
//!
//! Hook metadata is TOML frontmatter delimited by `+++` lines:
//! ```text
//! +++
//! name = "audit-bash"
//! event = "PreToolUse"
//! matcher = "Bash"
//! command = "./audit.sh"
//! priority = 10
//! +++
//!
//! # Audit Bash
//! Extended docs go here.
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::{HookError, Result},
    event::HookEvent,
};

/// Metadata parsed from a HOOK.md frontmatter block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookMetadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// The single event this hook registers for.
    pub event: HookEvent,
    /// Matcher pattern; validated at composition time.
    #[serde(default = "default_matcher")]
    pub matcher: String,
    /// Handler invoked by the downstream agent when the hook fires.
    pub command: String,
    /// Higher runs first. Ties break on scope specificity, then discovery
    /// order.
    #[serde(default)]
    pub priority: i32,
    /// A definition can opt itself out; the disable list in config is the
    /// other way hooks get excluded.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_matcher() -> String {
    "*".to_string()
}

fn default_enabled() -> bool {
    true
}

/// Full parsed hook: metadata plus the markdown body.
#[derive(Debug, Clone)]
pub struct ParsedHook {
    pub metadata: HookMetadata,
    pub body: String,
    pub source_path: PathBuf,
}

/// Parse HOOK.md content into metadata + body.
pub fn parse_hook_md(content: &str, source_path: &Path) -> Result<ParsedHook> {
    let trimmed = content.trim_start();
    if !trimmed.starts_with("+++") {
        return Err(HookError::MissingFrontmatter {
            path: source_path.to_path_buf(),
        });
    }

    let after_first = &trimmed[3..];
    let end = after_first
        .find("\n+++")
        .ok_or_else(|| HookError::UnclosedFrontmatter {
            path: source_path.to_path_buf(),
        })?;

    let toml_str = after_first[..end].trim();
    let body = after_first
        .get(end + 4..)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    let metadata: HookMetadata =
        toml::from_str(toml_str).map_err(|source| HookError::Frontmatter {
            path: source_path.to_path_buf(),
            source: Box::new(source),
        })?;

    Ok(ParsedHook {
        metadata,
        body,
        source_path: source_path.to_path_buf(),
    })
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_hook_md() {
        let content = r#"+++
name = "audit-bash"
description = "Audits shell commands"
event = "PreToolUse"
matcher = "Bash"
command = "./audit.sh"
priority = 10
enabled = false
+++

# Audit Bash

This is the body.
"#;
        let parsed = parse_hook_md(content, Path::new("/tmp/hook")).unwrap();
        assert_eq!(parsed.metadata.name, "audit-bash");
        assert_eq!(parsed.metadata.event, HookEvent::PreToolUse);
        assert_eq!(parsed.metadata.matcher, "Bash");
        assert_eq!(parsed.metadata.command, "./audit.sh");
        assert_eq!(parsed.metadata.priority, 10);
        assert!(!parsed.metadata.enabled);
        assert!(parsed.body.contains("# Audit Bash"));
    }

    #[test]
    fn parse_minimal_hook_md() {
        let content = r#"+++
name = "minimal"
event = "SessionStart"
command = "./go.sh"
+++
"#;
        let parsed = parse_hook_md(content, Path::new("/tmp/minimal")).unwrap();
        assert_eq!(parsed.metadata.matcher, "*");
        assert_eq!(parsed.metadata.priority, 0);
        assert!(parsed.metadata.enabled);
        assert!(parsed.body.is_empty());
    }

    #[test]
    fn missing_frontmatter_fails() {
        let err = parse_hook_md("# no frontmatter", Path::new("/tmp/bad")).unwrap_err();
        assert!(matches!(err, HookError::MissingFrontmatter { .. }));
    }

    #[test]
    fn unclosed_frontmatter_fails() {
        let err = parse_hook_md("+++\nname = \"bad\"\n", Path::new("/tmp/bad")).unwrap_err();
        assert!(matches!(err, HookError::UnclosedFrontmatter { .. }));
    }

    #[test]
    fn unknown_event_fails() {
        let content = "+++\nname = \"x\"\nevent = \"BeforeLunch\"\ncommand = \"./x\"\n+++\n";
        let err = parse_hook_md(content, Path::new("/tmp/bad")).unwrap_err();
        assert!(matches!(err, HookError::Frontmatter { .. }));
    }
}
