//! Config resolution facade.
//!
//! Orchestrates the layer loader, the profile chain resolver, and the merge
//! engine across the fixed precedence order
//! `[default, global, profile chain…, project, local]`. All-or-nothing: any
//! sub-step error propagates unchanged and no partial config is returned.

use serde::Serialize;

use crate::{
    error::Result,
    layer::{ConfigLayer, LayerRef},
    loader,
    merge::{MergedConfig, merge},
    paths::ConfigPaths,
    profiles::ProfileStore,
};

/// How the active profile was selected for this resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileSource {
    /// Read from the `active-profile` pointer file.
    Pointer,
    /// Passed explicitly (e.g. a `--profile` flag).
    Explicit,
}

/// The profile driving the `profile` layer of a resolution, with provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveProfile {
    pub name: String,
    pub source: ProfileSource,
}

/// One resolution run over a fixed directory layout.
///
/// The active profile is an explicit input rather than ambient state: given
/// the same layer contents and the same `active`, [`Resolver::resolve`] is a
/// pure function of the filesystem.
#[derive(Debug, Clone)]
pub struct Resolver {
    paths: ConfigPaths,
}

impl Resolver {
    #[must_use]
    pub fn new(paths: ConfigPaths) -> Self {
        Self { paths }
    }

    #[must_use]
    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    #[must_use]
    pub fn profile_store(&self) -> ProfileStore {
        ProfileStore::new(
            self.paths.profiles_dir(),
            self.paths.active_profile_file(),
        )
    }

    /// Determine the active profile: an explicit name wins over the pointer
    /// file. Returns `None` when neither selects a profile.
    pub fn active_profile(&self, explicit: Option<&str>) -> Result<Option<ActiveProfile>> {
        if let Some(name) = explicit {
            return Ok(Some(ActiveProfile {
                name: name.to_string(),
                source: ProfileSource::Explicit,
            }));
        }
        Ok(self.profile_store().active()?.map(|name| ActiveProfile {
            name,
            source: ProfileSource::Pointer,
        }))
    }

    /// Resolve the full five-layer configuration.
    pub fn resolve(&self, active: Option<ActiveProfile>) -> Result<MergedConfig> {
        let mut layers: Vec<ConfigLayer> = Vec::new();

        layers.push(loader::load(&LayerRef::Default)?);
        layers.push(loader::load(&LayerRef::Global(self.paths.global_file()))?);

        // The profile chain folds through the same merge engine as the outer
        // layers; splicing it here in ancestor-first order is that fold.
        if let Some(active) = &active {
            let chain = self.profile_store().resolve_chain(&active.name)?;
            layers.extend(chain);
        }

        layers.push(loader::load(&LayerRef::Project(self.paths.project_file()))?);
        layers.push(loader::load(&LayerRef::Local(self.paths.local_file()))?);

        let mut merged = merge(&layers);
        merged.active_profile = active;
        Ok(merged)
    }
}
