use std::path::PathBuf;

use thiserror::Error;

/// What is wrong with a file's managed-section markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerIssue {
    /// Start marker present, end marker missing.
    MissingEnd,
    /// End marker present without a start marker.
    MissingStart,
    /// End marker appears before the start marker.
    EndBeforeStart,
}

impl std::fmt::Display for MarkerIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEnd => write!(f, "start marker without a matching end marker"),
            Self::MissingStart => write!(f, "end marker without a start marker"),
            Self::EndBeforeStart => write!(f, "end marker appears before the start marker"),
        }
    }
}

/// Errors from splicing and writing. On an integrity error the target file is
/// left completely untouched.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The managed-section contract is broken; writing would risk destroying
    /// user content, so the writer refuses.
    #[error("malformed managed section: {issue}")]
    MalformedSection { issue: MarkerIssue },

    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to back up {} to {}", .path.display(), .backup.display())]
    Backup {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SyncError>;
