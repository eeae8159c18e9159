//! Serialization of a composed hook set into the downstream agent's
//! settings schema.
//!
//! Output shape:
//! ```json
//! {
//!   "hooks": {
//!     "PreToolUse": [
//!       { "matcher": "Bash", "hooks": [{ "type": "command", "command": "./audit.sh" }] }
//!     ]
//!   }
//! }
//! ```
//! serde_json's default map is ordered, so repeated serialization of the same
//! set is byte-identical.

use serde_json::{Value, json};

use crate::compose::ComposedHookSet;

/// Build the settings document for `set`.
#[must_use]
pub fn to_settings_json(set: &ComposedHookSet) -> Value {
    let mut events = serde_json::Map::new();
    for (event, hooks) in &set.events {
        let entries: Vec<Value> = hooks
            .iter()
            .map(|h| {
                json!({
                    "matcher": h.matcher,
                    "hooks": [{ "type": "command", "command": h.command }],
                })
            })
            .collect();
        events.insert(event.to_string(), Value::Array(entries));
    }
    json!({ "hooks": events })
}

/// The settings document as the string written to disk.
#[must_use]
pub fn to_settings_string(set: &ComposedHookSet) -> String {
    let mut out = serde_json::to_string_pretty(&to_settings_json(set)).unwrap_or_default();
    out.push('\n');
    out
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compose::ComposedHook, event::HookEvent};

    fn sample() -> ComposedHookSet {
        let mut set = ComposedHookSet::default();
        set.events.insert(
            HookEvent::PreToolUse,
            vec![
                ComposedHook {
                    name: "audit".into(),
                    matcher: "Bash".into(),
                    command: "./audit.sh".into(),
                },
                ComposedHook {
                    name: "mcp-log".into(),
                    matcher: "mcp__*".into(),
                    command: "./mcp-log.sh".into(),
                },
            ],
        );
        set
    }

    #[test]
    fn settings_shape_and_order() {
        let value = to_settings_json(&sample());
        let entries = value["hooks"]["PreToolUse"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["matcher"], "Bash");
        assert_eq!(entries[0]["hooks"][0]["type"], "command");
        assert_eq!(entries[0]["hooks"][0]["command"], "./audit.sh");
        assert_eq!(entries[1]["matcher"], "mcp__*");
    }

    #[test]
    fn serialization_is_stable() {
        assert_eq!(to_settings_string(&sample()), to_settings_string(&sample()));
    }

    #[test]
    fn empty_set_serializes_to_empty_hooks_object() {
        let value = to_settings_json(&ComposedHookSet::default());
        assert!(value["hooks"].as_object().unwrap().is_empty());
    }
}
