//! Managed-section splicing.
//!
//! A managed section is the region between a start and end sentinel line.
//! Content inside the markers belongs to the tool; content outside belongs to
//! the user and is preserved byte-for-byte across every regeneration.

use crate::error::{MarkerIssue, Result, SyncError};

/// Sentinel lines delimiting the managed region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    pub start: String,
    pub end: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            start: "<!-- loadout:begin (generated, do not edit this section) -->".to_string(),
            end: "<!-- loadout:end -->".to_string(),
        }
    }
}

/// Replace (or establish) the managed region of `existing` with `block`.
///
/// - Absent file: the result is the managed section alone, so the markers are
///   in place for every later run.
/// - Both markers present: text before the start marker and after the end
///   marker is copied verbatim; only the region between them changes.
/// - No markers: the managed section is prepended once, followed by a blank
///   line and the untouched original.
/// - One marker, or end before start: refuse rather than guess.
///
/// Splicing the same block twice is a fixed point: the second pass finds the
/// markers the first one wrote and regenerates an identical region.
pub fn splice(markers: &Markers, existing: Option<&str>, block: &str) -> Result<String> {
    // Pure concatenation: the caller shapes the block (including any
    // surrounding newlines), so the same inputs always produce the same bytes.
    let section = format!("{}{}{}", markers.start, block, markers.end);

    let Some(existing) = existing else {
        return Ok(section);
    };

    let start = existing.find(&markers.start);
    let end = existing.find(&markers.end);

    match (start, end) {
        (Some(s), Some(e)) => {
            if e < s {
                return Err(SyncError::MalformedSection {
                    issue: MarkerIssue::EndBeforeStart,
                });
            }
            let before = &existing[..s];
            let after = &existing[e + markers.end.len()..];
            Ok(format!("{before}{section}{after}"))
        },
        (Some(_), None) => Err(SyncError::MalformedSection {
            issue: MarkerIssue::MissingEnd,
        }),
        (None, Some(_)) => Err(SyncError::MalformedSection {
            issue: MarkerIssue::MissingStart,
        }),
        (None, None) => Ok(format!("{section}\n\n{existing}")),
    }
}
