//! Run configuration: strongly typed settings and their TOML file layer.
//!
//! Every recognized option lives on [`FetchConfig`] with an explicit
//! default; nothing is ambient. The binary assembles a config from three
//! layers — built-in RAN1 defaults, an optional TOML file
//! ([`FileConfig`], all fields optional), then CLI flags — and validates
//! the result once before the run starts.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::RemoteLayout;

/// Archive host the tool talks to unless overridden.
pub const DEFAULT_HOST: &str = "ftp.3gpp.org";
/// Plain FTP control port.
pub const DEFAULT_PORT: u16 = 21;
/// RAN1 working group area.
pub const DEFAULT_BASE_PATH: &str = "/tsg_ran/WG1_RL1/";
/// RAN1 numbered meeting folder prefix.
pub const DEFAULT_FOLDER_PREFIX: &str = "TSGR1_";
/// RAN1 ad-hoc container folder.
pub const DEFAULT_ADHOC_FOLDER: &str = "TSGR1_AH";
/// Documents subdirectory inside each meeting folder.
pub const DEFAULT_DOCS_SUBDIR: &str = "Docs";
/// Local download directory.
pub const DEFAULT_DOWNLOAD_DIR: &str = "3gpp_downloads";
/// Session timeout in seconds, applied once at connect.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A settings file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// The file that failed to load.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// A settings file did not parse as TOML.
    #[error("cannot parse {path}: {source}")]
    Parse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A resolved setting is outside its accepted range.
    #[error("invalid value for `{key}`: {message}")]
    Invalid {
        /// The offending setting.
        key: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            message: message.into(),
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Archive host name.
    pub host: String,
    /// Control port.
    pub port: u16,
    /// Base path of the working group area, `/`-terminated.
    pub base_path: String,
    /// Numbered meeting folder prefix.
    pub folder_prefix: String,
    /// Ad-hoc container folder name.
    pub adhoc_folder: String,
    /// Whether ad-hoc meetings are explored and scanned.
    pub include_adhoc: bool,
    /// Substring an ad-hoc meeting's path must contain; empty matches all.
    pub adhoc_filter: String,
    /// Documents subdirectory inside each meeting folder.
    pub docs_subdir: String,
    /// Local download directory.
    pub download_dir: PathBuf,
    /// First range endpoint, as a folder name (e.g. `TSGR1_107`).
    pub range_start: String,
    /// Second range endpoint, as a folder name.
    pub range_end: String,
    /// Document numbers to search for, matched as filename prefixes.
    pub targets: Vec<String>,
    /// Whether to package each meeting's downloads into a zip.
    pub archive: bool,
    /// Session timeout covering connect and every later exchange.
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            base_path: DEFAULT_BASE_PATH.to_string(),
            folder_prefix: DEFAULT_FOLDER_PREFIX.to_string(),
            adhoc_folder: DEFAULT_ADHOC_FOLDER.to_string(),
            include_adhoc: true,
            adhoc_filter: String::new(),
            docs_subdir: DEFAULT_DOCS_SUBDIR.to_string(),
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            range_start: String::new(),
            range_end: String::new(),
            targets: Vec::new(),
            archive: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FetchConfig {
    /// Remote layout derived from the path settings.
    #[must_use]
    pub fn layout(&self) -> RemoteLayout {
        RemoteLayout::new(
            self.base_path.as_str(),
            self.folder_prefix.as_str(),
            self.adhoc_folder.as_str(),
        )
    }

    /// Checks the resolved settings once before a run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::invalid("host", "must not be empty"));
        }
        if !self.base_path.starts_with('/') {
            return Err(ConfigError::invalid(
                "base_path",
                format!("{:?} must be an absolute remote path", self.base_path),
            ));
        }
        if self.folder_prefix.is_empty() {
            return Err(ConfigError::invalid("folder_prefix", "must not be empty"));
        }
        if self.docs_subdir.is_empty() {
            return Err(ConfigError::invalid("docs_subdir", "must not be empty"));
        }
        if self.range_start.is_empty() || self.range_end.is_empty() {
            return Err(ConfigError::invalid(
                "range",
                "both range endpoints are required (--from/--to or config file)",
            ));
        }
        if self.targets.is_empty() {
            return Err(ConfigError::invalid(
                "targets",
                "no document numbers to search for",
            ));
        }
        let secs = self.timeout.as_secs();
        if !(1..=3600).contains(&secs) {
            return Err(ConfigError::invalid(
                "timeout",
                format!("{secs}s outside expected range 1..=3600"),
            ));
        }
        Ok(())
    }
}

/// TOML-backed defaults layer; every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Archive host name.
    pub host: Option<String>,
    /// Control port.
    pub port: Option<u16>,
    /// Base path of the working group area.
    pub base_path: Option<String>,
    /// Numbered meeting folder prefix.
    pub folder_prefix: Option<String>,
    /// Ad-hoc container folder name.
    pub adhoc_folder: Option<String>,
    /// Whether ad-hoc meetings are explored and scanned.
    pub include_adhoc: Option<bool>,
    /// Ad-hoc path substring filter.
    pub adhoc_filter: Option<String>,
    /// Documents subdirectory name.
    pub docs_subdir: Option<String>,
    /// Local download directory.
    pub download_dir: Option<PathBuf>,
    /// First range endpoint as a folder name.
    pub range_start: Option<String>,
    /// Second range endpoint as a folder name.
    pub range_end: Option<String>,
    /// Document numbers to search for.
    pub targets: Option<Vec<String>>,
    /// File of newline-delimited document numbers.
    pub targets_file: Option<PathBuf>,
    /// Whether to package each meeting's downloads.
    pub archive: Option<bool>,
    /// Session timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Loads and parses a TOML settings file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] or [`ConfigError::Parse`] with the path
    /// as context.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `tdocfetch.toml` from the working directory when present;
    /// absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error only when the file exists but cannot be read or
    /// parsed.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = Path::new("tdocfetch.toml");
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Parses newline-delimited document numbers: one per line, surrounding
/// whitespace trimmed, blank lines and `#` comments skipped.
#[must_use]
pub fn parse_target_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Reads a targets file with [`parse_target_lines`] semantics.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the file cannot be read.
pub fn load_targets_file(path: &Path) -> Result<Vec<String>, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_target_lines(&text))
}
