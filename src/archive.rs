//! Per-meeting archive packaging.
//!
//! Each meeting's retrieved files are packed into one zip named after the
//! meeting, with every file stored under its base name only. The engine
//! invokes the archiver right after a meeting's downloads finalize, so a
//! packaging failure never affects other meetings.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;
use zip::result::ZipError;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Errors raised while packaging one meeting's files.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Reading a source file or writing the archive failed.
    #[error("IO error packaging {path}: {source}")]
    Io {
        /// The file being read or written.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The zip writer rejected the operation.
    #[error("zip error writing {path}: {source}")]
    Zip {
        /// The archive being written.
        path: PathBuf,
        /// The underlying zip error.
        #[source]
        source: ZipError,
    },

    /// A collected file has no usable base name.
    #[error("file name unusable for packaging: {path}")]
    BadEntry {
        /// The offending path.
        path: PathBuf,
    },
}

impl ArchiveError {
    fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    fn zip(path: impl Into<PathBuf>, source: ZipError) -> Self {
        Self::Zip {
            path: path.into(),
            source,
        }
    }
}

/// Packages one named group of local files into a single archive.
pub trait Archiver {
    /// Produces the group's archive and returns its path.
    ///
    /// # Errors
    ///
    /// Returns an [`ArchiveError`] when the archive cannot be written; the
    /// caller treats this as a warning for the affected group only.
    fn archive(&self, group: &str, files: &[PathBuf]) -> Result<PathBuf, ArchiveError>;
}

/// Zip-backed archiver writing `<output_dir>/<group>.zip` with deflate
/// compression. Path separators in the group name become `_` so ad-hoc
/// names like `TSGR1_AH/NR_AH_1801` stay a single file name.
#[derive(Debug)]
pub struct ZipArchiver {
    output_dir: PathBuf,
}

impl ZipArchiver {
    /// Creates an archiver writing into `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl Archiver for ZipArchiver {
    fn archive(&self, group: &str, files: &[PathBuf]) -> Result<PathBuf, ArchiveError> {
        let zip_path = self
            .output_dir
            .join(format!("{}.zip", sanitize_group_name(group)));
        debug!(archive = %zip_path.display(), files = files.len(), "packaging");

        let file = File::create(&zip_path).map_err(|e| ArchiveError::io(&zip_path, e))?;
        let mut writer = ZipWriter::new(file);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        for path in files {
            let base_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| ArchiveError::BadEntry { path: path.clone() })?;
            writer
                .start_file(base_name, options)
                .map_err(|e| ArchiveError::zip(&zip_path, e))?;
            let mut source = File::open(path).map_err(|e| ArchiveError::io(path, e))?;
            io::copy(&mut source, &mut writer).map_err(|e| ArchiveError::io(&zip_path, e))?;
        }

        writer.finish().map_err(|e| ArchiveError::zip(&zip_path, e))?;
        Ok(zip_path)
    }
}

/// Flattens a group name into a single file-name component.
#[must_use]
pub fn sanitize_group_name(group: &str) -> String {
    group.replace(['/', '\\'], "_")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use tempfile::TempDir;

    fn write_fixture(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_sanitize_group_name_flattens_separators() {
        assert_eq!(sanitize_group_name("TSGR1_AH/NR_AH_1801"), "TSGR1_AH_NR_AH_1801");
        assert_eq!(sanitize_group_name("TSGR1_112"), "TSGR1_112");
        assert_eq!(sanitize_group_name("a\\b"), "a_b");
    }

    #[test]
    fn test_archive_packs_files_under_base_names() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("store");
        std::fs::create_dir_all(&nested).unwrap();
        let first = write_fixture(&nested, "R1-2301111.zip", b"first");
        let second = write_fixture(&nested, "R1-2301112.docx", b"second");

        let archiver = ZipArchiver::new(temp.path());
        let zip_path = archiver
            .archive("TSGR1_112", &[first, second])
            .unwrap();
        assert_eq!(zip_path, temp.path().join("TSGR1_112.zip"));

        let mut archive = zip::ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        assert_eq!(archive.len(), 2);
        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["R1-2301111.zip", "R1-2301112.docx"]);

        let mut content = String::new();
        archive
            .by_name("R1-2301111.zip")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "first");
    }

    #[test]
    fn test_archive_group_name_with_separator_lands_flat() {
        let temp = TempDir::new().unwrap();
        let file = write_fixture(temp.path(), "R1-1800001.zip", b"adhoc");

        let archiver = ZipArchiver::new(temp.path());
        let zip_path = archiver.archive("TSGR1_AH/NR_AH_1801", &[file]).unwrap();
        assert_eq!(zip_path, temp.path().join("TSGR1_AH_NR_AH_1801.zip"));
        assert!(zip_path.is_file());
    }

    #[test]
    fn test_archive_missing_source_file_fails() {
        let temp = TempDir::new().unwrap();
        let archiver = ZipArchiver::new(temp.path());
        let missing = temp.path().join("not-there.zip");
        let result = archiver.archive("TSGR1_113", &[missing]);
        assert!(result.is_err());
    }

    #[test]
    fn test_archive_empty_group_produces_empty_zip() {
        let temp = TempDir::new().unwrap();
        let archiver = ZipArchiver::new(temp.path());
        let zip_path = archiver.archive("TSGR1_114", &[]).unwrap();
        let archive = zip::ZipArchive::new(File::open(&zip_path).unwrap()).unwrap();
        assert_eq!(archive.len(), 0);
    }
}
