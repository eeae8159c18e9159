//! File-level sync: no-op detection, backups, and the two write paths.
//!
//! Managed-section artifacts (the instructions file) go through
//! [`SyncWriter::sync_managed`]; wholly tool-owned artifacts (the hook
//! settings JSON, which cannot carry comment markers) go through
//! [`SyncWriter::sync_full`]. Both skip identical writes and snapshot the old
//! file before any write that changes content.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    error::{Result, SyncError},
    managed::{Markers, splice},
};

/// What a sync call did to the target file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// File did not exist; it was created.
    Created,
    /// Content changed; the previous version was backed up first.
    Updated { backup: Option<PathBuf> },
    /// New content was identical; nothing was written.
    Unchanged,
}

/// Writes generated artifacts. Backups are write-once snapshots, never read
/// back automatically.
#[derive(Debug, Clone)]
pub struct SyncWriter {
    markers: Markers,
    backups_dir: Option<PathBuf>,
}

impl SyncWriter {
    #[must_use]
    pub fn new(markers: Markers, backups_dir: Option<PathBuf>) -> Self {
        Self {
            markers,
            backups_dir,
        }
    }

    /// Regenerate the managed section of `path`, preserving everything
    /// outside the markers. On a malformed section the file is untouched.
    pub fn sync_managed(&self, path: &Path, block: &str) -> Result<SyncOutcome> {
        let existing = read_optional(path)?;
        let next = splice(&self.markers, existing.as_deref(), block)?;
        self.commit(path, existing, next)
    }

    /// Replace the whole file with `content`. For artifacts the tool owns
    /// outright.
    pub fn sync_full(&self, path: &Path, content: &str) -> Result<SyncOutcome> {
        let existing = read_optional(path)?;
        self.commit(path, existing, content.to_string())
    }

    fn commit(&self, path: &Path, existing: Option<String>, next: String) -> Result<SyncOutcome> {
        match existing {
            Some(old) if old == next => {
                debug!(path = %path.display(), "content unchanged, skipping write");
                Ok(SyncOutcome::Unchanged)
            },
            Some(old) => {
                let backup = self.backup(path, &old)?;
                write(path, &next)?;
                debug!(path = %path.display(), "updated");
                Ok(SyncOutcome::Updated { backup })
            },
            None => {
                write(path, &next)?;
                debug!(path = %path.display(), "created");
                Ok(SyncOutcome::Created)
            },
        }
    }

    fn backup(&self, path: &Path, old: &str) -> Result<Option<PathBuf>> {
        let Some(dir) = &self.backups_dir else {
            return Ok(None);
        };
        let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("artifact");
        let backup = dir.join(format!("{name}.{stamp}.bak"));

        let io = |source| SyncError::Backup {
            path: path.to_path_buf(),
            backup: backup.clone(),
            source,
        };
        std::fs::create_dir_all(dir).map_err(io)?;
        std::fs::write(&backup, old).map_err(io)?;
        Ok(Some(backup))
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(SyncError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write(path: &Path, content: &str) -> Result<()> {
    let io = |source| SyncError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io)?;
    }
    std::fs::write(path, content).map_err(io)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn writer(tmp: &tempfile::TempDir) -> SyncWriter {
        SyncWriter::new(Markers::default(), Some(tmp.path().join("backups")))
    }

    #[test]
    fn creates_then_noops_then_updates() {
        let tmp = tempfile::tempdir().unwrap();
        let w = writer(&tmp);
        let target = tmp.path().join("AGENTS.md");

        assert_eq!(w.sync_managed(&target, "v1").unwrap(), SyncOutcome::Created);
        assert_eq!(w.sync_managed(&target, "v1").unwrap(), SyncOutcome::Unchanged);

        let outcome = w.sync_managed(&target, "v2").unwrap();
        let SyncOutcome::Updated { backup: Some(backup) } = outcome else {
            panic!("expected update with backup, got {outcome:?}");
        };
        let snapshot = std::fs::read_to_string(backup).unwrap();
        assert!(snapshot.contains("v1"));
        let current = std::fs::read_to_string(&target).unwrap();
        assert!(current.contains("v2"));
    }

    #[test]
    fn unchanged_write_takes_no_backup() {
        let tmp = tempfile::tempdir().unwrap();
        let w = writer(&tmp);
        let target = tmp.path().join("settings.json");

        w.sync_full(&target, "{}\n").unwrap();
        w.sync_full(&target, "{}\n").unwrap();
        assert!(!tmp.path().join("backups").exists());
    }

    #[test]
    fn malformed_section_leaves_file_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let w = writer(&tmp);
        let target = tmp.path().join("AGENTS.md");
        let original = format!("{}\nno end marker", Markers::default().start);
        std::fs::write(&target, &original).unwrap();

        assert!(w.sync_managed(&target, "block").is_err());
        assert_eq!(std::fs::read_to_string(&target).unwrap(), original);
    }

    #[test]
    fn user_edits_outside_markers_survive_sync() {
        let tmp = tempfile::tempdir().unwrap();
        let w = writer(&tmp);
        let target = tmp.path().join("AGENTS.md");

        w.sync_managed(&target, "generated v1").unwrap();
        let mut content = std::fs::read_to_string(&target).unwrap();
        content.push_str("\n## My own notes\n\nhands off\n");
        std::fs::write(&target, &content).unwrap();

        w.sync_managed(&target, "generated v2").unwrap();
        let synced = std::fs::read_to_string(&target).unwrap();
        assert!(synced.contains("generated v2"));
        assert!(synced.contains("## My own notes"));
        assert!(!synced.contains("generated v1"));
    }
}
