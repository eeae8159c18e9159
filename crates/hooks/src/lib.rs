//! Hook discovery and composition.
//!
//! Hooks are defined as `HOOK.md` files (TOML frontmatter between `+++`
//! lines) under three scopes: built-in, global, and project. Composition
//! discovers them in that order, lets later scopes replace same-named
//! definitions wholesale, drops disabled ones, validates matcher syntax, and
//! emits a per-event, priority-ordered [`compose::ComposedHookSet`] ready for
//! serialization into the downstream agent's settings file.

pub mod builtin;
pub mod compose;
pub mod discover;
pub mod error;
pub mod event;
pub mod matcher;
pub mod metadata;
pub mod settings;

pub use {
    compose::{ComposedHook, ComposedHookSet, compose},
    discover::{FsHookDiscovery, HookScope},
    error::HookError,
    event::HookEvent,
    matcher::Matcher,
    metadata::{HookMetadata, ParsedHook, parse_hook_md},
    settings::to_settings_json,
};
