//! Remote transport seam for the document archive.
//!
//! The catalog builder and retrieval engine only need three primitives from
//! the remote side: change the current directory, list the names in it, and
//! stream one named file into a local sink. [`Transport`] captures exactly
//! that surface so the core logic stays independent of the wire protocol,
//! and [`FtpTransport`] implements it over a single blocking FTP control
//! connection.
//!
//! Listings return plain names with no file/directory distinction; callers
//! classify entries heuristically (numbered-folder parse, `.` in the name).

mod ftp;

pub use ftp::FtpTransport;

use std::io::Write;

use thiserror::Error;

/// Errors surfaced by transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The remote path does not exist or is not accessible (550-class
    /// rejections). Recoverable at the call site for per-meeting probes.
    #[error("remote path unavailable: {path}: {reason}")]
    PathUnavailable {
        /// The path that was rejected.
        path: String,
        /// Server-supplied rejection text.
        reason: String,
    },

    /// A transfer or control-channel exchange failed mid-flight.
    #[error("transfer failed for {name}: {reason}")]
    Transfer {
        /// Remote file name being transferred.
        name: String,
        /// Underlying failure text.
        reason: String,
    },

    /// Any other protocol-level failure (unexpected reply, parse error).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Socket-level failure (connect, timeout, reset).
    #[error("connection error: {0}")]
    Connection(#[source] std::io::Error),
}

impl TransportError {
    /// Creates a path-unavailable error.
    pub fn path_unavailable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PathUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Creates a transfer error.
    pub fn transfer(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Transfer {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for missing/forbidden-path rejections, which the
    /// retrieval loop treats as "skip this meeting" rather than a fault.
    #[must_use]
    pub fn is_path_unavailable(&self) -> bool {
        matches!(self, Self::PathUnavailable { .. })
    }
}

/// Minimal remote-archive surface used by the catalog builder and the
/// retrieval engine.
///
/// Implementations hold a single logical cursor (the current remote
/// directory) shared by all operations; callers own the navigation
/// discipline. All methods block until the server replies or the session
/// timeout fires.
pub trait Transport {
    /// Changes the current remote directory.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::PathUnavailable`] when the server rejects
    /// the path, or another variant for protocol/socket failures.
    fn change_dir(&mut self, path: &str) -> Result<(), TransportError>;

    /// Lists the plain entry names of the current remote directory.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the listing cannot be obtained.
    fn list_names(&mut self) -> Result<Vec<String>, TransportError>;

    /// Streams the named file from the current remote directory into
    /// `sink`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when the transfer fails; the sink may
    /// have received a partial prefix of the file by then.
    fn retrieve_to(&mut self, name: &str, sink: &mut dyn Write) -> Result<u64, TransportError>;
}
