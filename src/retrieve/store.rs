//! Local download store: one configured directory holding retrieved files.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Download directory scope: existence checks, file creation and partial
/// cleanup all go through this handle so nothing else touches the layout.
///
/// Remote names are reduced to their final path component before being
/// joined to the root, so a listing entry can never escape the store.
#[derive(Debug)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Opens the store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error when the directory cannot be
    /// created.
    pub fn open(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// The store's root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Local path a remote file of this name lands at.
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(safe_name(name))
    }

    /// Returns the local path when a file of this name is already present.
    #[must_use]
    pub fn existing_path(&self, name: &str) -> Option<PathBuf> {
        let path = self.path_for(name);
        path.is_file().then_some(path)
    }

    /// Creates (truncating) the local file for `name`.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error from file creation.
    pub fn create(&self, name: &str) -> io::Result<File> {
        File::create(self.path_for(name))
    }

    /// Removes a (possibly partial) local file for `name`; best effort.
    pub fn discard(&self, name: &str) {
        let path = self.path_for(name);
        if let Err(error) = fs::remove_file(&path) {
            if error.kind() != io::ErrorKind::NotFound {
                debug!(path = %path.display(), error = %error, "could not remove partial file");
            }
        }
    }
}

/// Final path component of a remote name; FTP listings return bare names,
/// this guards against the ones that do not.
fn safe_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}
