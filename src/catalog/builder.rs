//! Catalog construction: remote enumeration and classification.
//!
//! One pass over the working group's base path classifies every entry as a
//! numbered meeting, the ad-hoc container (recursed one level), or noise.
//! The result is the ordered, read-only catalog the rest of the run works
//! from.

use tracing::{debug, info, warn};

use super::error::CatalogError;
use super::folder_name::MeetingFolderParser;
use super::{Meeting, MeetingKind};
use crate::transport::{Transport, TransportError};

/// Remote naming scheme of one working group's archive area.
#[derive(Debug, Clone)]
pub struct RemoteLayout {
    /// Absolute base path holding the meeting folders, `/`-terminated.
    pub base_path: String,
    /// Prefix of numbered meeting folders (e.g. `TSGR1_`).
    pub folder_prefix: String,
    /// Name of the folder containing ad-hoc sessions (e.g. `TSGR1_AH`).
    pub adhoc_folder: String,
}

impl RemoteLayout {
    /// Creates a layout, normalizing the base path to a trailing separator.
    #[must_use]
    pub fn new(
        base_path: impl Into<String>,
        folder_prefix: impl Into<String>,
        adhoc_folder: impl Into<String>,
    ) -> Self {
        let mut base_path = base_path.into();
        if !base_path.ends_with('/') {
            base_path.push('/');
        }
        Self {
            base_path,
            folder_prefix: folder_prefix.into(),
            adhoc_folder: adhoc_folder.into(),
        }
    }

    /// Parser matching this layout's numbered folders.
    #[must_use]
    pub fn parser(&self) -> MeetingFolderParser {
        MeetingFolderParser::new(&self.folder_prefix)
    }
}

/// Builds the sorted meeting catalog for one working group.
///
/// Numbered meetings come first, ordered by `(number, sub_rank)`; ad-hoc
/// meetings follow in discovery order. The transport's cursor is left at
/// the base path on success.
///
/// # Errors
///
/// Returns [`CatalogError::Access`] when the base path cannot be entered,
/// listed, or returned to. Failures confined to the ad-hoc branch are
/// logged and skipped instead.
pub fn build_catalog<T: Transport + ?Sized>(
    transport: &mut T,
    layout: &RemoteLayout,
    include_adhoc: bool,
) -> Result<Vec<Meeting>, CatalogError> {
    let base = layout.base_path.as_str();
    transport
        .change_dir(base)
        .map_err(|e| CatalogError::access(base, e))?;
    let entries = transport
        .list_names()
        .map_err(|e| CatalogError::access(base, e))?;
    info!(base_path = base, entries = entries.len(), "listed base path");

    let parser = layout.parser();
    let mut meetings = Vec::new();

    for entry in entries {
        let ordinal = parser.parse(&entry);
        if ordinal.is_valid() {
            let remote_path = format!("{base}{entry}/");
            meetings.push(Meeting::numbered(entry, remote_path, ordinal));
            continue;
        }

        if include_adhoc && entry == layout.adhoc_folder {
            let adhoc_base = format!("{base}{entry}/");
            match explore_adhoc(transport, &layout.adhoc_folder, &adhoc_base) {
                Ok(found) => meetings.extend(found),
                Err(error) => {
                    warn!(path = %adhoc_base, error = %error, "skipping ad-hoc branch");
                }
            }
            // The cursor may be anywhere inside the ad-hoc branch now;
            // losing the base path is fatal for the rest of the build.
            transport
                .change_dir(base)
                .map_err(|e| CatalogError::access(base, e))?;
            continue;
        }

        debug!(entry = %entry, "ignoring unclassified entry");
    }

    meetings.sort_by_key(Meeting::sort_rank);
    info!(meetings = meetings.len(), "catalog built");
    Ok(meetings)
}

/// Lists one level below the ad-hoc container. Sub-entries with a `.` in
/// the name are treated as plain files and skipped.
fn explore_adhoc<T: Transport + ?Sized>(
    transport: &mut T,
    adhoc_folder: &str,
    adhoc_base: &str,
) -> Result<Vec<Meeting>, TransportError> {
    transport.change_dir(adhoc_base)?;
    let sub_entries = transport.list_names()?;
    debug!(path = adhoc_base, candidates = sub_entries.len(), "listed ad-hoc container");

    let mut found = Vec::new();
    for sub in sub_entries {
        if sub.contains('.') {
            debug!(entry = %sub, "ad-hoc entry looks like a file, skipped");
            continue;
        }
        let remote_path = format!("{adhoc_base}{sub}/");
        found.push(Meeting::ad_hoc(format!("{adhoc_folder}/{sub}"), remote_path));
    }
    Ok(found)
}
