//! Layered configuration resolution for the loadout CLI.
//!
//! Configuration is declared in five layers of increasing specificity:
//! built-in defaults, `~/.config/loadout/config.toml`, the active profile's
//! inheritance chain, `.loadout/config.toml`, and `.loadout/config.local.toml`.
//! Layers are partial; [`merge::merge`] folds an ordered list of them into one
//! [`merge::MergedConfig`]. Resolution is all-or-nothing: any layer that fails
//! to load or parse aborts the whole run.

pub mod error;
pub mod layer;
pub mod loader;
pub mod merge;
pub mod paths;
pub mod profiles;
pub mod resolve;
pub mod schema;
pub mod validate;

pub use {
    error::ConfigError,
    layer::{ConfigLayer, LayerOrigin, LayerRef},
    merge::{MergedConfig, Toggle, ToggleState, merge},
    paths::ConfigPaths,
    profiles::{ProfileDefinition, ProfileStore},
    resolve::{ActiveProfile, ProfileSource, Resolver},
    schema::{AgentOverride, BudgetSection, LayerSchema, ModelSection, ToggleSection},
    validate::{Diagnostic, Severity, ValidationResult},
};
