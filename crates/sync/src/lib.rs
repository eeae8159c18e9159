//! Idempotent artifact writing.
//!
//! Generated content coexists with hand-edited content: the managed-section
//! splicer regenerates only the marker-delimited region of a file and keeps
//! everything outside it byte-identical. The writer adds no-op detection
//! (identical content is never rewritten) and a backup snapshot before any
//! content-changing write.

pub mod error;
pub mod managed;
pub mod writer;

pub use {
    error::SyncError,
    managed::{Markers, splice},
    writer::{SyncOutcome, SyncWriter},
};
