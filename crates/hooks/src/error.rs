use std::path::PathBuf;

use thiserror::Error;

/// Errors from hook discovery and composition. Composition fails closed: one
/// bad definition aborts the whole pass rather than producing a partial set.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("{} must start with +++ TOML frontmatter", .path.display())]
    MissingFrontmatter { path: PathBuf },

    #[error("missing closing +++ in {}", .path.display())]
    UnclosedFrontmatter { path: PathBuf },

    #[error("invalid frontmatter in {}", .path.display())]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    /// A matcher must be `*`, an exact name, `prefix*`, or `*suffix`.
    #[error("hook `{hook}` has unparseable matcher `{pattern}`")]
    InvalidMatcher { hook: String, pattern: String },

    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, HookError>;
