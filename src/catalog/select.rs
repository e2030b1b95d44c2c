//! Scan-set selection: numeric range plus ad-hoc filtering over a catalog.

use tracing::debug;

use super::error::SelectError;
use super::folder_name::MeetingFolderParser;
use super::{Meeting, MeetingKind};

/// Selects the meetings a run should scan, preserving catalog order.
///
/// The range endpoints are folder names (`TSGR1_107`), parsed with the same
/// rules as catalog entries; selection uses plain numeric containment, so
/// every sub-rank variant of an in-range meeting number is included. A
/// reversed range is swapped rather than rejected. Ad-hoc meetings are
/// included only when `include_adhoc` is set, and then only those whose
/// remote path contains `adhoc_filter` (empty filter matches all).
///
/// # Errors
///
/// Returns [`SelectError::InvalidEndpoint`] when either endpoint does not
/// parse to a meeting number; no partial selection is produced.
pub fn select_meetings(
    catalog: &[Meeting],
    parser: &MeetingFolderParser,
    range_start: &str,
    range_end: &str,
    include_adhoc: bool,
    adhoc_filter: &str,
) -> Result<Vec<Meeting>, SelectError> {
    let start = parser.parse(range_start);
    if !start.is_valid() {
        return Err(SelectError::invalid_endpoint(range_start));
    }
    let end = parser.parse(range_end);
    if !end.is_valid() {
        return Err(SelectError::invalid_endpoint(range_end));
    }

    let (mut start_num, mut end_num) = (start.number, end.number);
    if start_num > end_num {
        std::mem::swap(&mut start_num, &mut end_num);
    }
    debug!(start = start_num, end = end_num, include_adhoc, "selecting meetings");

    let selected = catalog
        .iter()
        .filter(|meeting| match meeting.kind {
            MeetingKind::Numbered => (start_num..=end_num).contains(&meeting.number()),
            MeetingKind::AdHoc => {
                include_adhoc
                    && (adhoc_filter.is_empty() || meeting.remote_path.contains(adhoc_filter))
            }
            MeetingKind::Other => false,
        })
        .cloned()
        .collect();
    Ok(selected)
}
