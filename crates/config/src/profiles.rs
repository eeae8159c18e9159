//! Named profiles: storage, the active-profile pointer, and inheritance
//! chain resolution with cycle detection.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    layer::{ConfigLayer, LayerRef},
    loader,
    schema::LayerSchema,
};

/// A profile as stored on disk: `<profiles_dir>/<name>.toml`. Identity is the
/// file stem; the body is an ordinary partial layer plus optional `extends`.
#[derive(Debug, Clone)]
pub struct ProfileDefinition {
    pub name: String,
    pub path: PathBuf,
    pub layer: ConfigLayer,
}

impl ProfileDefinition {
    #[must_use]
    pub fn extends(&self) -> Option<&str> {
        self.layer.schema.extends.as_deref()
    }
}

/// Access to the profile directory and the active-profile pointer file.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    profiles_dir: PathBuf,
    pointer_file: PathBuf,
}

impl ProfileStore {
    pub fn new(profiles_dir: impl Into<PathBuf>, pointer_file: impl Into<PathBuf>) -> Self {
        Self {
            profiles_dir: profiles_dir.into(),
            pointer_file: pointer_file.into(),
        }
    }

    #[must_use]
    pub fn profile_path(&self, name: &str) -> PathBuf {
        self.profiles_dir.join(format!("{name}.toml"))
    }

    /// Load one profile by name. Missing file is an error: a profile is only
    /// ever loaded because something requested it by name.
    pub fn load(&self, name: &str) -> Result<ProfileDefinition> {
        let path = self.profile_path(name);
        let layer = loader::load(&LayerRef::Profile {
            name: name.to_string(),
            path: path.clone(),
        })?;
        Ok(ProfileDefinition {
            name: name.to_string(),
            path,
            layer,
        })
    }

    /// All profile names on disk, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match std::fs::read_dir(&self.profiles_dir) {
            Ok(e) => e,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.profiles_dir.clone(),
                    source,
                });
            },
        };

        let mut names: Vec<String> = entries
            .flatten()
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                    return None;
                }
                path.file_stem().and_then(|s| s.to_str()).map(String::from)
            })
            .collect();
        names.sort();
        Ok(names)
    }

    /// Create a new profile, optionally cloning an existing one's body.
    pub fn create(&self, name: &str, from: Option<&str>) -> Result<PathBuf> {
        let path = self.profile_path(name);
        if path.exists() {
            return Err(ConfigError::ProfileExists {
                name: name.to_string(),
                path,
            });
        }

        let schema = match from {
            Some(source) => self.load(source)?.layer.schema,
            None => LayerSchema::default(),
        };
        let body = toml::to_string_pretty(&schema).map_err(|e| ConfigError::Write {
            path: path.clone(),
            source: std::io::Error::other(e),
        })?;

        write_creating_parent(&path, &body)?;
        debug!(profile = name, path = %path.display(), "created profile");
        Ok(path)
    }

    /// Delete a profile. Refused while the profile is active; switch first.
    pub fn delete(&self, name: &str) -> Result<()> {
        if self.active()?.as_deref() == Some(name) {
            return Err(ConfigError::ProfileActive {
                name: name.to_string(),
            });
        }
        let path = self.profile_path(name);
        if !path.exists() {
            return Err(ConfigError::ProfileNotFound {
                name: name.to_string(),
                searched: path,
            });
        }
        std::fs::remove_file(&path).map_err(|source| ConfigError::Write { path, source })
    }

    /// Read the active-profile pointer file. Absent or blank means no
    /// profile is active.
    pub fn active(&self) -> Result<Option<String>> {
        let raw = match std::fs::read_to_string(&self.pointer_file) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.pointer_file.clone(),
                    source,
                });
            },
        };
        let name = raw.trim();
        Ok((!name.is_empty()).then(|| name.to_string()))
    }

    /// Point the active-profile file at `name`. Verifies the profile exists.
    pub fn set_active(&self, name: &str) -> Result<()> {
        self.load(name)?;
        write_creating_parent(&self.pointer_file, &format!("{name}\n"))
    }

    /// Resolve `name`'s inheritance chain: most distant ancestor first, the
    /// requested profile last.
    ///
    /// Cycle detection is the only depth limit. The `visiting` list doubles
    /// as the diagnostic: on a cycle it already holds the path from the
    /// requested profile down to the repeated name.
    pub fn resolve_chain(&self, name: &str) -> Result<Vec<ConfigLayer>> {
        let mut visiting: Vec<String> = Vec::new();
        let mut chain: Vec<ConfigLayer> = Vec::new();
        self.walk(name, None, &mut visiting, &mut chain)?;
        Ok(chain)
    }

    fn walk(
        &self,
        name: &str,
        requested_by: Option<&str>,
        visiting: &mut Vec<String>,
        chain: &mut Vec<ConfigLayer>,
    ) -> Result<()> {
        if visiting.iter().any(|seen| seen == name) {
            let mut cycle = visiting.clone();
            cycle.push(name.to_string());
            return Err(ConfigError::CircularInheritance { cycle });
        }
        visiting.push(name.to_string());

        let definition = match self.load(name) {
            Ok(definition) => definition,
            // A broken `extends` target reports both ends of the reference.
            Err(ConfigError::ProfileNotFound { name, searched }) => {
                return Err(match requested_by {
                    Some(requester) => ConfigError::MissingAncestor {
                        name,
                        requested_by: requester.to_string(),
                        searched,
                    },
                    None => ConfigError::ProfileNotFound { name, searched },
                });
            },
            Err(other) => return Err(other),
        };

        // Parent first, so ancestors precede descendants in the chain.
        if let Some(parent) = definition.extends() {
            let parent = parent.to_string();
            self.walk(&parent, Some(name), visiting, chain)?;
        }
        chain.push(definition.layer);
        Ok(())
    }
}

fn write_creating_parent(path: &Path, body: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, body).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}
