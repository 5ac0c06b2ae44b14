//! Storage layer for gradebook.
//!
//! The whole record store is persisted as one JSON document. Every save
//! replaces the document; nothing is written incrementally.

pub mod document;

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::Student;
use crate::store::RecordStore;

/// Suffix appended to the data file name for the temporary file of an atomic save.
const TEMP_SUFFIX: &str = ".tmp";

/// Whole-document persistence for the record store.
pub trait Persistence: fmt::Debug {
    /// Human-readable location of the document, for notices and logs.
    fn location(&self) -> String;

    /// Load the full store.
    ///
    /// A missing document is an empty store.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the document cannot be read or decoded.
    fn load(&self) -> Result<RecordStore>;

    /// Replace the stored document with `students`.
    ///
    /// # Errors
    ///
    /// Returns a persistence error if the document cannot be written.
    fn save(&mut self, students: &[Student]) -> Result<()>;
}

/// A JSON document on the local filesystem.
#[derive(Debug, Clone)]
pub struct JsonFile {
    /// Path to the data file.
    path: PathBuf,
    /// Write through a temporary file and rename it into place.
    atomic: bool,
}

impl JsonFile {
    /// Use the document at `path`, saving atomically.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            atomic: true,
        }
    }

    /// Choose between atomic (temp file + rename) and direct overwrite saves.
    #[must_use]
    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    /// Get the path to the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the temporary file used by atomic saves: the data file name
    /// with `.tmp` appended.
    #[must_use]
    pub fn temp_path(&self) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(TEMP_SUFFIX);
        PathBuf::from(path)
    }

    fn write_error(&self, source: std::io::Error) -> Error {
        Error::PersistenceWrite {
            path: self.path.clone(),
            source,
        }
    }

    fn create_parent_dirs(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        Ok(())
    }
}

impl Persistence for JsonFile {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<RecordStore> {
        if !self.path.exists() {
            debug!("No data file at {}, starting empty", self.path.display());
            return Ok(RecordStore::new());
        }

        let bytes = std::fs::read(&self.path).map_err(|source| Error::PersistenceRead {
            path: self.path.clone(),
            source,
        })?;
        let store = document::decode(&self.path, &bytes)?;

        info!(
            "Loaded {} students from {}",
            store.len(),
            self.path.display()
        );
        Ok(store)
    }

    fn save(&mut self, students: &[Student]) -> Result<()> {
        let bytes = document::encode(students)?;
        self.create_parent_dirs()?;

        if self.atomic {
            let temp_path = self.temp_path();
            let written = std::fs::write(&temp_path, &bytes)
                .and_then(|()| std::fs::rename(&temp_path, &self.path));
            if let Err(e) = written {
                let _ = std::fs::remove_file(&temp_path);
                return Err(self.write_error(e));
            }
        } else {
            std::fs::write(&self.path, &bytes).map_err(|e| self.write_error(e))?;
        }

        info!("Saved {} students to {}", students.len(), self.path.display());
        Ok(())
    }
}

/// Keeps the document in memory. Used for tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    students: Vec<Student>,
    saves: usize,
    fail_saves: bool,
}

impl MemoryStorage {
    /// Create an empty in-memory document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing students.
    #[must_use]
    pub fn with_students(students: Vec<Student>) -> Self {
        Self {
            students,
            ..Self::default()
        }
    }

    /// Make every save fail, simulating an unwritable file.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// Students as of the last successful save.
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Number of successful saves.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl Persistence for MemoryStorage {
    fn location(&self) -> String {
        ":memory:".to_string()
    }

    fn load(&self) -> Result<RecordStore> {
        RecordStore::from_students(self.students.clone())
            .map_err(|message| Error::invalid_document(":memory:", message))
    }

    fn save(&mut self, students: &[Student]) -> Result<()> {
        if self.fail_saves {
            return Err(Error::PersistenceWrite {
                path: PathBuf::from(":memory:"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.students = students.to_vec();
        self.saves += 1;
        Ok(())
    }
}
