//! Hook definitions shipped with the tool.
//!
//! Stored in the same HOOK.md format as user hooks so the whole pipeline
//! treats them uniformly; a global or project hook with the same name
//! replaces them, and the config disable list can drop them.

use crate::{
    error::Result,
    metadata::{ParsedHook, parse_hook_md},
};

const SESSION_CONTEXT: &str = r#"+++
name = "session-context"
description = "Injects resolved loadout context at session start"
event = "SessionStart"
matcher = "*"
command = "loadout-session-context"
priority = 100
+++

Prints the active profile and effective skill set so the agent starts each
session with the current loadout.
"#;

const AUDIT_BASH: &str = r#"+++
name = "audit-bash"
description = "Records every shell command the agent runs"
event = "PreToolUse"
matcher = "Bash"
command = "loadout-audit-bash"
priority = 50
+++

Appends the proposed command line to the session audit log before execution.
"#;

/// Parse the compiled-in definitions. The unit test below keeps a bad edit
/// from shipping.
pub fn builtin_hooks() -> Result<Vec<ParsedHook>> {
    [SESSION_CONTEXT, AUDIT_BASH]
        .iter()
        .map(|content| parse_hook_md(content, std::path::Path::new("<built-in>")))
        .collect()
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_hooks_parse() {
        let hooks = builtin_hooks().unwrap();
        assert_eq!(hooks.len(), 2);
        assert!(hooks.iter().all(|h| h.metadata.enabled));
    }
}
