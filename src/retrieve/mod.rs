//! Document retrieval: the targeted search loop and its local store.
//!
//! - [`RetrievalEngine`] - sequential scan of selected meetings with
//!   prefix matching, first-match downloads and per-meeting archiving
//! - [`LocalStore`] - the one download directory retrieved files land in
//! - [`RetrievalOutcome`] / [`DownloadRecord`] - what a run produced

mod engine;
mod error;
mod store;

pub use engine::{DownloadRecord, RetrievalEngine, RetrievalOutcome};
pub use error::FetchError;
pub use store::LocalStore;
