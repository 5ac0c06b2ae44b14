//! Error types for gradebook.
//!
//! This module defines all error types used throughout the gradebook crate.
//! Every error raised by a form action is caught at the form boundary and
//! turned into a notice; none of them abort the program.

use std::path::PathBuf;
use thiserror::Error;

/// Rejected user input.
///
/// The display strings are the literal conditions shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The student name was empty after trimming.
    #[error("empty name")]
    EmptyName,

    /// No course was selected.
    #[error("no course selected")]
    NoCourseSelected,

    /// The course is not part of the course catalog.
    #[error("unknown course '{0}'")]
    UnknownCourse(String),

    /// The score was not an integer in `0..=100`.
    #[error("invalid score '{0}' (expected an integer between 0 and 100)")]
    InvalidScore(String),

    /// Delete was requested without a selected student.
    #[error("no selection")]
    NoSelection,
}

/// The main error type for gradebook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    /// User input failed validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    // === Record Errors ===
    /// The student already has a grade for this course.
    #[error("student '{student}' already has a grade for '{course}'")]
    DuplicateCourse {
        /// Student name.
        student: String,
        /// Course name.
        course: String,
    },

    /// No student with this name exists.
    #[error("student '{name}' not found")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    // === Persistence Errors ===
    /// Reading the data file failed.
    #[error("failed to read {path}: {source}")]
    PersistenceRead {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Writing the data file failed.
    #[error("failed to write {path}: {source}")]
    PersistenceWrite {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The data file is not a valid student document.
    #[error("malformed document {path}: {source}")]
    MalformedDocument {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The data file parsed but breaks a record invariant.
    #[error("invalid document {path}: {message}")]
    InvalidDocument {
        /// Path to the data file.
        path: PathBuf,
        /// Which invariant was broken.
        message: String,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Terminal or other I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for gradebook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a duplicate course error.
    #[must_use]
    pub fn duplicate_course(student: impl Into<String>, course: impl Into<String>) -> Self {
        Self::DuplicateCourse {
            student: student.into(),
            course: course.into(),
        }
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create an invalid document error.
    #[must_use]
    pub fn invalid_document(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if this error should be shown as a warning rather than an error.
    ///
    /// Duplicate grades and a missing delete selection block the action but
    /// are not failures.
    #[must_use]
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            Self::DuplicateCourse { .. } | Self::Validation(ValidationError::NoSelection)
        )
    }

    /// Check if this error came from reading or writing the data file.
    #[must_use]
    pub fn is_persistence_error(&self) -> bool {
        matches!(
            self,
            Self::PersistenceRead { .. }
                | Self::PersistenceWrite { .. }
                | Self::MalformedDocument { .. }
                | Self::InvalidDocument { .. }
                | Self::DirectoryCreate { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_display() {
        assert_eq!(ValidationError::EmptyName.to_string(), "empty name");
        assert_eq!(
            ValidationError::NoCourseSelected.to_string(),
            "no course selected"
        );
        assert_eq!(ValidationError::NoSelection.to_string(), "no selection");
        assert!(ValidationError::InvalidScore("abc".to_string())
            .to_string()
            .starts_with("invalid score"));
    }

    #[test]
    fn test_validation_wraps_transparently() {
        let err: Error = ValidationError::EmptyName.into();
        assert_eq!(err.to_string(), "empty name");
    }

    #[test]
    fn test_duplicate_course_display() {
        let err = Error::duplicate_course("Ana", "Physics");
        let msg = err.to_string();
        assert!(msg.contains("Ana"));
        assert!(msg.contains("Physics"));
    }

    #[test]
    fn test_not_found_display() {
        assert_eq!(Error::not_found("Luis").to_string(), "student 'Luis' not found");
    }

    #[test]
    fn test_is_warning() {
        assert!(Error::duplicate_course("Ana", "Physics").is_warning());
        assert!(Error::from(ValidationError::NoSelection).is_warning());
        assert!(!Error::from(ValidationError::EmptyName).is_warning());
        assert!(!Error::not_found("Ana").is_warning());
    }

    #[test]
    fn test_is_persistence_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::PersistenceWrite {
            path: PathBuf::from("DAlumnos.json"),
            source: io_err,
        };
        assert!(err.is_persistence_error());
        assert!(Error::invalid_document("DAlumnos.json", "dup").is_persistence_error());
        assert!(!Error::not_found("Ana").is_persistence_error());
    }

    #[test]
    fn test_malformed_document_display() {
        let json_err = serde_json::from_str::<i32>("not json").unwrap_err();
        let err = Error::MalformedDocument {
            path: PathBuf::from("/data/DAlumnos.json"),
            source: json_err,
        };
        assert!(err.to_string().contains("/data/DAlumnos.json"));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_config_validation_error_display() {
        let err = Error::ConfigValidation {
            message: "course list is empty".to_string(),
        };
        assert!(err.to_string().contains("course list is empty"));
    }
}
