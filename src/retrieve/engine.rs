//! Targeted retrieval: scan selected meetings for wanted documents.
//!
//! The engine walks the selected meetings in order, lists each meeting's
//! documents folder, matches the listing against the remaining targets by
//! filename prefix, downloads first matches into the local store, and hands
//! each meeting's haul to the archiver. The target set only shrinks; the
//! scan stops as soon as it is empty.

use std::collections::BTreeSet;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use tracing::{debug, info, warn};

use super::error::FetchError;
use super::store::LocalStore;
use crate::archive::Archiver;
use crate::catalog::Meeting;
use crate::transport::Transport;

/// Files obtained (or found already present) for one meeting.
#[derive(Debug, Clone)]
pub struct DownloadRecord {
    /// The meeting's display name.
    pub meeting: String,
    /// Local paths in match order.
    pub files: Vec<PathBuf>,
}

/// What a retrieval run produced.
#[derive(Debug, Default)]
pub struct RetrievalOutcome {
    /// Per-meeting download records, in scan order.
    pub records: Vec<DownloadRecord>,
    /// Targets for which a matching filename was seen (downloaded or not).
    pub located: BTreeSet<String>,
    /// Targets never matched within the scanned scope. Informational, not
    /// an error.
    pub missing: BTreeSet<String>,
}

impl RetrievalOutcome {
    /// Returns true when every requested target was matched somewhere.
    #[must_use]
    pub fn all_located(&self) -> bool {
        self.missing.is_empty()
    }

    /// Files recorded for a meeting, if any were.
    #[must_use]
    pub fn files_for(&self, meeting: &str) -> Option<&[PathBuf]> {
        self.records
            .iter()
            .find(|r| r.meeting == meeting)
            .map(|r| r.files.as_slice())
    }
}

/// Sequential retrieval engine over one transport connection.
///
/// Owns no mutable state between runs; every `run` starts from the full
/// target set. Failures inside a meeting degrade to warnings and the scan
/// continues — only losing the base path aborts the loop, preserving the
/// partial outcome.
pub struct RetrievalEngine<'a> {
    base_path: String,
    docs_subdir: String,
    archiver: Option<&'a dyn Archiver>,
}

impl<'a> RetrievalEngine<'a> {
    /// Creates an engine returning to `base_path` between meetings and
    /// probing `docs_subdir` inside each meeting folder.
    #[must_use]
    pub fn new(base_path: impl Into<String>, docs_subdir: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            docs_subdir: docs_subdir.into(),
            archiver: None,
        }
    }

    /// Attaches an archiver invoked once per meeting with that meeting's
    /// collected files.
    #[must_use]
    pub fn with_archiver(mut self, archiver: &'a dyn Archiver) -> Self {
        self.archiver = Some(archiver);
        self
    }

    /// Scans `meetings` in order for files whose names start with one of
    /// `targets`, downloading first matches into `store`.
    ///
    /// Already-present files are recorded without a transfer. A failed
    /// transfer removes the partial file but still counts the target as
    /// located. The scan exits early once every target is resolved.
    pub fn run<T: Transport + ?Sized>(
        &self,
        transport: &mut T,
        meetings: &[Meeting],
        targets: &[String],
        store: &LocalStore,
    ) -> RetrievalOutcome {
        let requested: BTreeSet<String> = targets.iter().cloned().collect();
        let mut remaining = requested.clone();
        let mut located = BTreeSet::new();
        let mut records = Vec::new();

        for meeting in meetings {
            if remaining.is_empty() {
                info!("all target documents located; stopping early");
                break;
            }

            let docs_path = format!("{}{}/", meeting.remote_path, self.docs_subdir);
            info!(meeting = %meeting.display_name, "scanning");

            let listing = match transport
                .change_dir(&docs_path)
                .and_then(|()| transport.list_names())
            {
                Ok(names) => names,
                Err(error) if error.is_path_unavailable() => {
                    warn!(path = %docs_path, error = %error, "documents folder unavailable, skipping meeting");
                    if self.return_to_base(transport).is_err() {
                        break;
                    }
                    continue;
                }
                Err(error) => {
                    warn!(path = %docs_path, error = %error, "error scanning meeting, skipping");
                    if self.return_to_base(transport).is_err() {
                        break;
                    }
                    continue;
                }
            };
            debug!(path = %docs_path, files = listing.len(), "listed documents folder");

            let collected =
                self.match_and_fetch(transport, store, &listing, &mut remaining, &mut located);

            if !collected.is_empty() {
                let record = DownloadRecord {
                    meeting: meeting.display_name.clone(),
                    files: collected,
                };
                if let Some(archiver) = self.archiver {
                    match archiver.archive(&record.meeting, &record.files) {
                        Ok(path) => {
                            info!(archive = %path.display(), meeting = %record.meeting, "packaged");
                        }
                        Err(error) => {
                            warn!(meeting = %record.meeting, error = %error, "packaging failed");
                        }
                    }
                }
                records.push(record);
            }

            if self.return_to_base(transport).is_err() {
                break;
            }
        }

        let missing: BTreeSet<String> = requested.difference(&located).cloned().collect();
        info!(located = located.len(), missing = missing.len(), "search finished");
        for document in &missing {
            warn!(document = %document, "not located within the scanned scope");
        }

        RetrievalOutcome {
            records,
            located,
            missing,
        }
    }

    /// Matches the remaining targets against one meeting's listing,
    /// fetching first matches. Iterates a snapshot because the live set
    /// shrinks as matches land.
    fn match_and_fetch<T: Transport + ?Sized>(
        &self,
        transport: &mut T,
        store: &LocalStore,
        listing: &[String],
        remaining: &mut BTreeSet<String>,
        located: &mut BTreeSet<String>,
    ) -> Vec<PathBuf> {
        let mut collected = Vec::new();
        let pending: Vec<String> = remaining.iter().cloned().collect();

        for target in &pending {
            for filename in listing {
                if !filename.starts_with(target.as_str()) {
                    continue;
                }
                info!(file = %filename, target = %target, "document found");

                if let Some(existing) = store.existing_path(filename) {
                    debug!(path = %existing.display(), "already present locally, transfer skipped");
                    collected.push(existing);
                } else {
                    match fetch_file(transport, store, filename) {
                        Ok(path) => {
                            info!(path = %path.display(), "downloaded");
                            collected.push(path);
                        }
                        Err(error) => {
                            warn!(file = %filename, error = %error, "download failed, partial file removed");
                            store.discard(filename);
                        }
                    }
                }

                // A failed transfer still counts the target as located, so
                // one transient error forfeits it for the rest of the run.
                // Requeueing it on failure would be the alternative.
                remaining.remove(target);
                located.insert(target.clone());
                break; // first matching filename wins for this target here
            }
        }
        collected
    }

    fn return_to_base<T: Transport + ?Sized>(&self, transport: &mut T) -> Result<(), ()> {
        transport.change_dir(&self.base_path).map_err(|error| {
            warn!(
                base_path = %self.base_path,
                error = %error,
                "cannot return to base path, keeping partial results"
            );
        })
    }
}

/// Streams one remote file into the store, flushing before reporting
/// success so a short write surfaces as a failure here.
fn fetch_file<T: Transport + ?Sized>(
    transport: &mut T,
    store: &LocalStore,
    name: &str,
) -> Result<PathBuf, FetchError> {
    let path = store.path_for(name);
    let file = store
        .create(name)
        .map_err(|source| FetchError::io(path.clone(), source))?;
    let mut writer = BufWriter::new(file);
    let bytes = transport.retrieve_to(name, &mut writer)?;
    writer
        .flush()
        .map_err(|source| FetchError::io(path.clone(), source))?;
    debug!(bytes, path = %path.display(), "transfer complete");
    Ok(path)
}
