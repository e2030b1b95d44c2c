//! Meeting catalog: discovery, classification, ordering and selection.
//!
//! The archive lays out one folder per meeting under a working group's base
//! path, with ad-hoc sessions nested one level below a dedicated folder.
//! This module builds an ordered snapshot of those meetings and filters it
//! down to the subset a run should scan.
//!
//! - [`MeetingFolderParser`] - folder name → ordinal key
//! - [`build_catalog`] - remote enumeration and classification
//! - [`select_meetings`] - range and ad-hoc filtering
//! - [`Meeting`] / [`MeetingKind`] - the catalog entries themselves

mod builder;
mod error;
mod folder_name;
mod select;

pub use builder::{RemoteLayout, build_catalog};
pub use error::{CatalogError, SelectError};
pub use folder_name::{FolderOrdinal, MeetingFolderParser};
pub use select::select_meetings;

use std::fmt;

/// Classification of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeetingKind {
    /// Regular meeting folder carrying a meeting number.
    Numbered,
    /// Ad-hoc session discovered under the dedicated ad-hoc folder.
    AdHoc,
    /// Entry that matched neither rule.
    Other,
}

impl fmt::Display for MeetingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numbered => write!(f, "Numbered"),
            Self::AdHoc => write!(f, "AdHoc"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// One meeting in the catalog: a remote folder expected to hold a `Docs`
/// subdirectory with the meeting's documents.
///
/// Instances are built once during catalog construction and never mutated;
/// `remote_path` is unique within a catalog and always `/`-terminated.
#[derive(Debug, Clone)]
pub struct Meeting {
    /// Human-readable name; ad-hoc meetings use `<adhoc_folder>/<sub>`.
    pub display_name: String,
    /// Absolute remote path of the meeting folder, with trailing separator.
    pub remote_path: String,
    /// Entry classification.
    pub kind: MeetingKind,
    /// Ordinal key; [`FolderOrdinal::INVALID`] for non-numbered meetings.
    pub ordinal: FolderOrdinal,
}

impl Meeting {
    /// Creates a numbered meeting.
    #[must_use]
    pub fn numbered(
        display_name: impl Into<String>,
        remote_path: impl Into<String>,
        ordinal: FolderOrdinal,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            remote_path: remote_path.into(),
            kind: MeetingKind::Numbered,
            ordinal,
        }
    }

    /// Creates an ad-hoc meeting.
    #[must_use]
    pub fn ad_hoc(display_name: impl Into<String>, remote_path: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            remote_path: remote_path.into(),
            kind: MeetingKind::AdHoc,
            ordinal: FolderOrdinal::INVALID,
        }
    }

    /// Meeting number for range filtering, `-1` when not applicable.
    #[must_use]
    pub fn number(&self) -> i64 {
        self.ordinal.number
    }

    /// Sort rank placing numbered meetings first (by ordinal), everything
    /// else after them in discovery order under a stable sort.
    #[must_use]
    pub(crate) fn sort_rank(&self) -> (u8, FolderOrdinal) {
        match self.kind {
            MeetingKind::Numbered => (0, self.ordinal),
            MeetingKind::AdHoc | MeetingKind::Other => (1, FolderOrdinal::INVALID),
        }
    }
}

impl fmt::Display for Meeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] {}", self.display_name, self.kind, self.remote_path)
    }
}
