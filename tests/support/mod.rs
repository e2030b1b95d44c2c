//! Scripted collaborators for catalog and retrieval tests.

// Each integration test binary compiles its own copy; not every binary
// uses every helper.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::PathBuf;

use tdocfetch_core::{ArchiveError, Archiver, Transport, TransportError};

/// One observed transport call, for asserting navigation and transfer
/// behavior (early exit, skip-on-error, dedupe).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ChangeDir(String),
    List(String),
    Retrieve(String, String),
}

/// In-memory remote archive with failure injection.
///
/// Directories are keyed by the exact path the code under test navigates
/// to (trailing separator included). Unknown paths behave like a 550
/// rejection, matching a real server.
#[derive(Debug, Default)]
pub struct MockRemote {
    dirs: HashMap<String, Vec<String>>,
    files: HashMap<(String, String), Vec<u8>>,
    unavailable: HashSet<String>,
    protocol_broken: HashSet<String>,
    failing_transfers: HashSet<(String, String)>,
    cwd: String,
    pub calls: Vec<Call>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a directory and its entry names.
    pub fn dir(&mut self, path: &str, entries: &[&str]) -> &mut Self {
        self.dirs.insert(
            path.to_string(),
            entries.iter().map(|e| (*e).to_string()).collect(),
        );
        self
    }

    /// Scripts a file's content inside a directory.
    pub fn file(&mut self, dir: &str, name: &str, content: &[u8]) -> &mut Self {
        self.files
            .insert((dir.to_string(), name.to_string()), content.to_vec());
        self
    }

    /// Makes a path answer with a 550-class rejection.
    pub fn unavailable(&mut self, path: &str) -> &mut Self {
        self.unavailable.insert(path.to_string());
        self
    }

    /// Makes navigation/listing on a path fail with a protocol error.
    pub fn protocol_broken(&mut self, path: &str) -> &mut Self {
        self.protocol_broken.insert(path.to_string());
        self
    }

    /// Makes a transfer write a partial prefix and then fail.
    pub fn failing_transfer(&mut self, dir: &str, name: &str) -> &mut Self {
        self.failing_transfers
            .insert((dir.to_string(), name.to_string()));
        self
    }

    pub fn list_calls(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::List(_))).count()
    }

    pub fn retrieve_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Retrieve(..)))
            .count()
    }

    pub fn changed_into(&self, path: &str) -> bool {
        self.calls
            .iter()
            .any(|c| matches!(c, Call::ChangeDir(p) if p == path))
    }
}

impl Transport for MockRemote {
    fn change_dir(&mut self, path: &str) -> Result<(), TransportError> {
        self.calls.push(Call::ChangeDir(path.to_string()));
        if self.protocol_broken.contains(path) {
            return Err(TransportError::Protocol(format!("broken: {path}")));
        }
        if self.unavailable.contains(path) || !self.dirs.contains_key(path) {
            return Err(TransportError::path_unavailable(path, "550 not found"));
        }
        self.cwd = path.to_string();
        Ok(())
    }

    fn list_names(&mut self) -> Result<Vec<String>, TransportError> {
        self.calls.push(Call::List(self.cwd.clone()));
        if self.protocol_broken.contains(&self.cwd) {
            return Err(TransportError::Protocol(format!("broken: {}", self.cwd)));
        }
        self.dirs
            .get(&self.cwd)
            .cloned()
            .ok_or_else(|| TransportError::path_unavailable(self.cwd.as_str(), "550 not found"))
    }

    fn retrieve_to(&mut self, name: &str, sink: &mut dyn Write) -> Result<u64, TransportError> {
        self.calls
            .push(Call::Retrieve(self.cwd.clone(), name.to_string()));
        let key = (self.cwd.clone(), name.to_string());
        if self.failing_transfers.contains(&key) {
            sink.write_all(b"PART")
                .map_err(TransportError::Connection)?;
            return Err(TransportError::transfer(name, "connection reset"));
        }
        let content = self
            .files
            .get(&key)
            .ok_or_else(|| TransportError::transfer(name, "550 no such file"))?;
        sink.write_all(content).map_err(TransportError::Connection)?;
        Ok(content.len() as u64)
    }
}

/// Archiver that records every invocation instead of writing zips.
#[derive(Debug, Default)]
pub struct RecordingArchiver {
    pub calls: RefCell<Vec<(String, Vec<PathBuf>)>>,
    pub fail: bool,
}

impl RecordingArchiver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            fail: true,
        }
    }
}

impl Archiver for RecordingArchiver {
    fn archive(&self, group: &str, files: &[PathBuf]) -> Result<PathBuf, ArchiveError> {
        self.calls
            .borrow_mut()
            .push((group.to_string(), files.to_vec()));
        if self.fail {
            return Err(ArchiveError::BadEntry {
                path: PathBuf::from(group),
            });
        }
        Ok(PathBuf::from(format!("{group}.zip")))
    }
}
