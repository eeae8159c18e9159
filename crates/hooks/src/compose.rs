//! Hook composition: discovery output to per-event ordered lists.
//!
//! Same-named definitions replace wholesale across scopes (deliberately not
//! the field-merge the config layers use); the disable list and per-definition
//! `enabled` flag filter; matchers are syntax-checked; each event's hooks are
//! stably sorted by priority, then scope specificity, then discovery order,
//! so unchanged inputs always compose to byte-identical output.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::{
    discover::HookScope,
    error::{HookError, Result},
    event::HookEvent,
    matcher::Matcher,
    metadata::ParsedHook,
};

/// One entry in the composed output, ready for settings serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComposedHook {
    pub name: String,
    pub matcher: String,
    pub command: String,
}

/// Per-event ordered hook lists. Derived fresh on every composition pass and
/// discarded after the settings write.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComposedHookSet {
    pub events: BTreeMap<HookEvent, Vec<ComposedHook>>,
}

impl ComposedHookSet {
    #[must_use]
    pub fn total(&self) -> usize {
        self.events.values().map(Vec::len).sum()
    }
}

struct Candidate {
    hook: ParsedHook,
    scope: HookScope,
    discovery_index: usize,
}

/// Compose discovered hooks (already in scope precedence order) into the
/// final per-event set, excluding names in `disabled`.
pub fn compose(
    discovered: Vec<(ParsedHook, HookScope)>,
    disabled: &BTreeSet<String>,
) -> Result<ComposedHookSet> {
    // Whole-definition override by name: a later scope's definition replaces
    // an earlier one entirely, taking its own position in discovery order.
    let mut by_name: Vec<Candidate> = Vec::new();
    for (discovery_index, (hook, scope)) in discovered.into_iter().enumerate() {
        by_name.retain(|c| c.hook.metadata.name != hook.metadata.name);
        by_name.push(Candidate {
            hook,
            scope,
            discovery_index,
        });
    }

    let mut events: BTreeMap<HookEvent, Vec<(Candidate, ComposedHook)>> = BTreeMap::new();
    for candidate in by_name {
        let meta = &candidate.hook.metadata;
        if !meta.enabled || disabled.contains(&meta.name) {
            continue;
        }
        if Matcher::parse(&meta.matcher).is_none() {
            return Err(HookError::InvalidMatcher {
                hook: meta.name.clone(),
                pattern: meta.matcher.clone(),
            });
        }
        let event = meta.event;
        let composed = ComposedHook {
            name: meta.name.clone(),
            matcher: meta.matcher.clone(),
            command: meta.command.clone(),
        };
        events.entry(event).or_default().push((candidate, composed));
    }

    let mut set = ComposedHookSet::default();
    for (event, mut entries) in events {
        // Stable sort: priority desc, scope specificity desc, discovery
        // order asc.
        entries.sort_by(|(a, _), (b, _)| {
            b.hook
                .metadata
                .priority
                .cmp(&a.hook.metadata.priority)
                .then(b.scope.cmp(&a.scope))
                .then(a.discovery_index.cmp(&b.discovery_index))
        });
        set.events
            .insert(event, entries.into_iter().map(|(_, c)| c).collect());
    }
    Ok(set)
}
