//! Error types for catalog construction and selection.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors that abort catalog construction.
///
/// Failures while exploring the ad-hoc branch are handled inside the
/// builder and never surface here; only the inability to read (or return
/// to) the base path is fatal.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The working group's base path could not be entered or listed.
    #[error("cannot access base path {path}: {source}")]
    Access {
        /// The base path that was rejected.
        path: String,
        /// The underlying transport failure.
        #[source]
        source: TransportError,
    },
}

impl CatalogError {
    /// Creates an access error for `path`.
    pub fn access(path: impl Into<String>, source: TransportError) -> Self {
        Self::Access {
            path: path.into(),
            source,
        }
    }
}

/// Errors that abort meeting selection.
#[derive(Debug, Error)]
pub enum SelectError {
    /// A range endpoint did not contain a meeting number.
    #[error("range endpoint {name:?} does not name a numbered meeting folder")]
    InvalidEndpoint {
        /// The endpoint string as supplied.
        name: String,
    },
}

impl SelectError {
    /// Creates an invalid-endpoint error.
    pub fn invalid_endpoint(name: impl Into<String>) -> Self {
        Self::InvalidEndpoint { name: name.into() }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_access_display_carries_path() {
        let err = CatalogError::access(
            "/tsg_ran/WG1_RL1/",
            TransportError::path_unavailable("/tsg_ran/WG1_RL1/", "550"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tsg_ran/WG1_RL1/"), "path in: {msg}");
    }

    #[test]
    fn test_select_invalid_endpoint_display_carries_name() {
        let err = SelectError::invalid_endpoint("not-a-meeting");
        assert!(err.to_string().contains("not-a-meeting"));
    }
}
