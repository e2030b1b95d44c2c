//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use tdocfetch_core::config::{FetchConfig, FileConfig};

/// Locate and fetch 3GPP TDocs from meeting folders on the standards
/// FTP archive.
///
/// Builds a catalog of meeting folders under the working group's base
/// path, narrows it to a numbered range (plus optional ad-hoc meetings),
/// searches each meeting's Docs folder for files starting with the given
/// document numbers, downloads first matches and packs each meeting's
/// haul into a zip.
#[derive(Parser, Debug)]
#[command(name = "tdocfetch")]
#[command(author, version, about)]
pub struct Args {
    /// Document numbers to search for (e.g. R1-2301111)
    pub documents: Vec<String>,

    /// File with one document number per line (blank lines and # comments skipped)
    #[arg(short = 't', long, value_name = "FILE")]
    pub targets_file: Option<PathBuf>,

    /// Settings file (./tdocfetch.toml is picked up automatically when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// First meeting folder of the search range (e.g. TSGR1_107)
    #[arg(long = "from", value_name = "FOLDER")]
    pub range_start: Option<String>,

    /// Last meeting folder of the search range (e.g. TSGR1_123)
    #[arg(long = "to", value_name = "FOLDER")]
    pub range_end: Option<String>,

    /// Archive host
    #[arg(long)]
    pub host: Option<String>,

    /// Control port
    #[arg(long)]
    pub port: Option<u16>,

    /// Working group base path on the archive
    #[arg(long, value_name = "PATH")]
    pub base_path: Option<String>,

    /// Numbered meeting folder prefix
    #[arg(long, value_name = "PREFIX")]
    pub folder_prefix: Option<String>,

    /// Ad-hoc container folder name
    #[arg(long, value_name = "NAME")]
    pub adhoc_folder: Option<String>,

    /// Skip ad-hoc meetings entirely
    #[arg(long)]
    pub no_adhoc: bool,

    /// Only scan ad-hoc meetings whose path contains this text
    #[arg(long, value_name = "TEXT")]
    pub adhoc_filter: Option<String>,

    /// Documents subdirectory inside each meeting folder
    #[arg(long, value_name = "NAME")]
    pub docs_subdir: Option<String>,

    /// Local download directory
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Skip per-meeting zip packaging
    #[arg(long)]
    pub no_archive: bool,

    /// Session timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Resolves the run configuration: built-in defaults, overlaid with
    /// the settings file, overlaid with explicit CLI flags.
    #[must_use]
    pub fn into_config(self, file: &FileConfig, targets: Vec<String>) -> FetchConfig {
        let mut config = FetchConfig::default();

        overlay(&mut config.host, file.host.as_ref(), self.host);
        overlay(&mut config.port, file.port.as_ref(), self.port);
        overlay(&mut config.base_path, file.base_path.as_ref(), self.base_path);
        overlay(
            &mut config.folder_prefix,
            file.folder_prefix.as_ref(),
            self.folder_prefix,
        );
        overlay(
            &mut config.adhoc_folder,
            file.adhoc_folder.as_ref(),
            self.adhoc_folder,
        );
        overlay(
            &mut config.adhoc_filter,
            file.adhoc_filter.as_ref(),
            self.adhoc_filter,
        );
        overlay(
            &mut config.docs_subdir,
            file.docs_subdir.as_ref(),
            self.docs_subdir,
        );
        overlay(
            &mut config.download_dir,
            file.download_dir.as_ref(),
            self.output_dir,
        );
        overlay(
            &mut config.range_start,
            file.range_start.as_ref(),
            self.range_start,
        );
        overlay(&mut config.range_end, file.range_end.as_ref(), self.range_end);

        if let Some(enabled) = file.include_adhoc {
            config.include_adhoc = enabled;
        }
        if self.no_adhoc {
            config.include_adhoc = false;
        }
        if let Some(enabled) = file.archive {
            config.archive = enabled;
        }
        if self.no_archive {
            config.archive = false;
        }
        if let Some(secs) = file.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.timeout {
            config.timeout = Duration::from_secs(secs);
        }

        config.targets = targets;
        config
    }
}

/// File value overrides the default; a CLI value overrides both.
fn overlay<T: Clone>(slot: &mut T, file: Option<&T>, cli: Option<T>) {
    if let Some(value) = file {
        *slot = value.clone();
    }
    if let Some(value) = cli {
        *slot = value;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parse() {
        let args = Args::try_parse_from(["tdocfetch"]).unwrap();
        assert!(args.documents.is_empty());
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
        assert!(!args.no_adhoc);
        assert!(!args.no_archive);
    }

    #[test]
    fn test_cli_positional_documents() {
        let args = Args::try_parse_from(["tdocfetch", "R1-2301111", "R1-2301112"]).unwrap();
        assert_eq!(args.documents, vec!["R1-2301111", "R1-2301112"]);
    }

    #[test]
    fn test_cli_range_flags() {
        let args = Args::try_parse_from(["tdocfetch", "--from", "TSGR1_107", "--to", "TSGR1_123"])
            .unwrap();
        assert_eq!(args.range_start.as_deref(), Some("TSGR1_107"));
        assert_eq!(args.range_end.as_deref(), Some("TSGR1_123"));
    }

    #[test]
    fn test_cli_verbose_count() {
        let args = Args::try_parse_from(["tdocfetch", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["tdocfetch", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_invalid_flag_rejected() {
        let err = Args::try_parse_from(["tdocfetch", "--no-such-flag"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_into_config_defaults_without_overrides() {
        let args = Args::try_parse_from(["tdocfetch"]).unwrap();
        let config = args.into_config(&FileConfig::default(), vec!["R1-1".to_string()]);
        assert_eq!(config.host, "ftp.3gpp.org");
        assert_eq!(config.base_path, "/tsg_ran/WG1_RL1/");
        assert!(config.include_adhoc);
        assert!(config.archive);
        assert_eq!(config.targets, vec!["R1-1"]);
    }

    #[test]
    fn test_into_config_cli_overrides_file() {
        let args = Args::try_parse_from(["tdocfetch", "--host", "ftp.cli.example"]).unwrap();
        let file = FileConfig {
            host: Some("ftp.file.example".to_string()),
            port: Some(2121),
            ..FileConfig::default()
        };
        let config = args.into_config(&file, Vec::new());
        assert_eq!(config.host, "ftp.cli.example");
        assert_eq!(config.port, 2121);
    }

    #[test]
    fn test_into_config_negative_flags_win() {
        let args = Args::try_parse_from(["tdocfetch", "--no-adhoc", "--no-archive"]).unwrap();
        let file = FileConfig {
            include_adhoc: Some(true),
            archive: Some(true),
            ..FileConfig::default()
        };
        let config = args.into_config(&file, Vec::new());
        assert!(!config.include_adhoc);
        assert!(!config.archive);
    }

    #[test]
    fn test_into_config_timeout_layering() {
        let args = Args::try_parse_from(["tdocfetch", "--timeout", "120"]).unwrap();
        let file = FileConfig {
            timeout_secs: Some(30),
            ..FileConfig::default()
        };
        let config = args.into_config(&file, Vec::new());
        assert_eq!(config.timeout, Duration::from_secs(120));

        let args = Args::try_parse_from(["tdocfetch"]).unwrap();
        let file = FileConfig {
            timeout_secs: Some(30),
            ..FileConfig::default()
        };
        let config = args.into_config(&file, Vec::new());
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
