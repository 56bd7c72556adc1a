//! Storage layer for tl
//!
//! Manages the persistent documents in the data directory:
//!
//! ```text
//! <data dir>/
//!   tasks.json      # JSON array of TaskRecord, overwritten wholesale
//!   session.json    # Session flag for the mock login
//! ```
//!
//! The directory defaults to the platform data dir for "tl" and can be
//! overridden via `--store`, `TL_STORE`, or `[store] dir` in `tl.toml`.
//! Reads are tolerant: a missing or unparseable document yields the empty
//! default, and the distinction is reported through [`LoadSource`] so
//! callers (and tests) can tell an absent store from a corrupt one.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::session::Session;
use crate::task::TaskRecord;

/// File name of the task list document
pub const TASKS_FILE: &str = "tasks.json";

/// File name of the session document
pub const SESSION_FILE: &str = "session.json";

/// Where a loaded document actually came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Parsed from the document on disk
    File,
    /// Document absent; the empty default was used
    Missing,
    /// Document present but unparseable; the empty default was used
    Corrupt,
}

/// Result of loading the task list.
#[derive(Debug, Clone)]
pub struct TaskLoad {
    pub tasks: Vec<TaskRecord>,
    pub source: LoadSource,
}

/// Storage manager for tl state
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Create a storage manager rooted at the given directory
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Resolve the data directory: explicit override, then config, then
    /// the platform default.
    pub fn resolve(override_dir: Option<PathBuf>, config: &Config) -> Result<Self> {
        if let Some(dir) = override_dir {
            return Ok(Self::new(dir));
        }
        if let Some(dir) = config.store.dir.clone() {
            return Ok(Self::new(dir));
        }
        let dirs = ProjectDirs::from("", "", "tl").ok_or_else(|| {
            Error::OperationFailed(
                "could not determine a data directory; pass --store".to_string(),
            )
        })?;
        Ok(Self::new(dirs.data_dir().to_path_buf()))
    }

    /// Path to the data directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the task list document
    pub fn tasks_file(&self) -> PathBuf {
        self.root.join(TASKS_FILE)
    }

    /// Path to the session document
    pub fn session_file(&self) -> PathBuf {
        self.root.join(SESSION_FILE)
    }

    /// Create the data directory if it does not exist yet
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        Ok(())
    }

    // =========================================================================
    // Document loading (tolerant reads)
    // =========================================================================

    /// Load the task list, defaulting to empty on a missing or corrupt
    /// document. Never fails.
    pub fn load_tasks(&self) -> TaskLoad {
        let path = self.tasks_file();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no task document, starting empty");
                return TaskLoad {
                    tasks: Vec::new(),
                    source: LoadSource::Missing,
                };
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "task document unreadable, starting empty");
                return TaskLoad {
                    tasks: Vec::new(),
                    source: LoadSource::Missing,
                };
            }
        };

        match serde_json::from_str(&content) {
            Ok(tasks) => TaskLoad {
                tasks,
                source: LoadSource::File,
            },
            Err(err) => {
                warn!(path = %path.display(), %err, "task document unparseable, starting empty");
                TaskLoad {
                    tasks: Vec::new(),
                    source: LoadSource::Corrupt,
                }
            }
        }
    }

    /// Load the session, defaulting to logged-out on a missing or corrupt
    /// document.
    pub fn load_session(&self) -> Session {
        let path = self.session_file();
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return Session::logged_out(),
        };
        match serde_json::from_str(&content) {
            Ok(session) => session,
            Err(err) => {
                warn!(path = %path.display(), %err, "session document unparseable, logging out");
                Session::logged_out()
            }
        }
    }

    // =========================================================================
    // Document saving (atomic writes)
    // =========================================================================

    /// Persist the full task list, overwriting the previous document.
    pub fn save_tasks(&self, tasks: &[TaskRecord]) -> Result<()> {
        self.write_json(&self.tasks_file(), &tasks)
    }

    /// Persist the session flag.
    pub fn save_session(&self, session: &Session) -> Result<()> {
        self.write_json(&self.session_file(), session)
    }

    /// Write JSON data atomically (write to temp, then rename)
    pub fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        self.write_atomic(path, json.as_bytes())
    }

    /// Write data atomically using temp file + rename, so a reader never
    /// sees a partially written document.
    fn write_atomic(&self, path: &Path, data: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        file.sync_all()?;

        fs::rename(&temp_path, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn storage() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = Storage::new(dir.path().to_path_buf());
        (dir, storage)
    }

    #[test]
    fn missing_document_loads_empty() {
        let (_dir, storage) = storage();
        let load = storage.load_tasks();
        assert!(load.tasks.is_empty());
        assert_eq!(load.source, LoadSource::Missing);
    }

    #[test]
    fn corrupt_document_loads_empty() {
        let (_dir, storage) = storage();
        storage.init().unwrap();
        fs::write(storage.tasks_file(), "{not json").unwrap();
        let load = storage.load_tasks();
        assert!(load.tasks.is_empty());
        assert_eq!(load.source, LoadSource::Corrupt);
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_dir, storage) = storage();
        storage.init().unwrap();
        let now = Utc::now();
        let tasks = vec![
            TaskRecord::new("t-aaaaaa", "one", "first description", now),
            TaskRecord::new("t-bbbbbb", "two", "second description", now),
        ];
        storage.save_tasks(&tasks).unwrap();
        let load = storage.load_tasks();
        assert_eq!(load.source, LoadSource::File);
        assert_eq!(load.tasks, tasks);
    }

    #[test]
    fn session_round_trips_and_defaults() {
        let (_dir, storage) = storage();
        storage.init().unwrap();
        assert_eq!(storage.load_session(), Session::logged_out());

        let session = Session::logged_in("casey", Utc::now());
        storage.save_session(&session).unwrap();
        assert_eq!(storage.load_session(), session);
    }
}
