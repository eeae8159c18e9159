//! Layer loading: one file (or the embedded defaults) to one [`ConfigLayer`].

use std::path::Path;

use tracing::debug;

use crate::{
    error::{ConfigError, Result},
    layer::{ConfigLayer, LayerOrigin, LayerRef},
    schema::LayerSchema,
};

/// Built-in defaults, compiled into the binary. Always parseable; covered by
/// a test below so a bad edit fails CI rather than every user.
pub const DEFAULT_CONFIG: &str = include_str!("../defaults.toml");

/// Load a single layer.
///
/// A missing file yields an empty layer for optional layers (global, project,
/// local) and an error for required ones (a profile requested by name). Parse
/// failures are always errors; a malformed layer is never partially applied.
pub fn load(layer_ref: &LayerRef) -> Result<ConfigLayer> {
    let origin = layer_ref.origin();

    let LayerRef::Default = layer_ref else {
        return load_file(layer_ref, origin);
    };

    let schema = parse_str(DEFAULT_CONFIG, Path::new("<built-in defaults>"))?;
    Ok(ConfigLayer {
        origin,
        source: None,
        profile: None,
        schema,
    })
}

fn load_file(layer_ref: &LayerRef, origin: LayerOrigin) -> Result<ConfigLayer> {
    // Required layers other than Default always carry a path.
    let Some(path) = layer_ref.path() else {
        return Ok(ConfigLayer::empty(origin));
    };

    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if layer_ref.is_required() {
                return Err(missing(layer_ref));
            }
            debug!(path = %path.display(), %origin, "optional layer missing, treating as empty");
            return Ok(ConfigLayer::empty(origin));
        },
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        },
    };

    let schema = parse_str(&raw, path)?;
    debug!(path = %path.display(), %origin, "loaded layer");

    let profile = match layer_ref {
        LayerRef::Profile { name, .. } => Some(name.clone()),
        _ => None,
    };
    Ok(ConfigLayer {
        origin,
        source: Some(path.to_path_buf()),
        profile,
        schema,
    })
}

fn missing(layer_ref: &LayerRef) -> ConfigError {
    match layer_ref {
        LayerRef::Profile { name, path } => ConfigError::ProfileNotFound {
            name: name.clone(),
            searched: path.clone(),
        },
        other => ConfigError::MissingLayer {
            path: other.path().map(Path::to_path_buf).unwrap_or_default(),
        },
    }
}

fn parse_str(raw: &str, path: &Path) -> Result<LayerSchema> {
    toml::from_str(raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source: Box::new(source),
    })
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_defaults_parse() {
        let layer = load(&LayerRef::Default).unwrap();
        assert_eq!(layer.origin, LayerOrigin::Default);
        assert_eq!(layer.schema.model.default.as_deref(), Some("sonnet"));
    }

    #[test]
    fn missing_optional_layer_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let layer = load(&LayerRef::Global(tmp.path().join("nope.toml"))).unwrap();
        assert_eq!(layer.origin, LayerOrigin::Global);
        assert!(layer.schema.is_empty());
        assert!(layer.source.is_none());
    }

    #[test]
    fn missing_profile_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load(&LayerRef::Profile {
            name: "work".into(),
            path: tmp.path().join("work.toml"),
        })
        .unwrap_err();
        match err {
            ConfigError::ProfileNotFound { name, .. } => assert_eq!(name, "work"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_error_names_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[model\ndefault = ").unwrap();
        let err = load(&LayerRef::Project(path.clone())).unwrap_err();
        match err {
            ConfigError::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn loaded_layer_records_source_and_profile() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("work.toml");
        std::fs::write(&path, "extends = \"base\"\n").unwrap();
        let layer = load(&LayerRef::Profile {
            name: "work".into(),
            path: path.clone(),
        })
        .unwrap();
        assert_eq!(layer.profile.as_deref(), Some("work"));
        assert_eq!(layer.source.as_deref(), Some(path.as_path()));
        assert_eq!(layer.schema.extends.as_deref(), Some("base"));
    }
}
