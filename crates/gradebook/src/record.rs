//! Core record types for gradebook.
//!
//! Field names on the wire are part of the external file format and are
//! fixed: `Nombre`, `Cursos` and `Nota`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Highest score a course can hold.
pub const MAX_SCORE: u8 = 100;

/// A course score, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    /// Parse a score typed by the user.
    ///
    /// Surrounding whitespace and a leading sign are accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidScore`] if the text is not an integer
    /// or is out of range.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        text.trim()
            .parse::<i64>()
            .ok()
            .and_then(|value| Self::try_from(value).ok())
            .ok_or_else(|| ValidationError::InvalidScore(text.to_string()))
    }

    /// The numeric value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(v) if v <= MAX_SCORE => Ok(Self(v)),
            _ => Err(format!("score {value} is outside 0..={MAX_SCORE}")),
        }
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single grade: a course name and its score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course name.
    #[serde(rename = "Nombre")]
    pub name: String,
    /// Recorded score.
    #[serde(rename = "Nota")]
    pub score: Score,
}

impl Course {
    /// Create a new course grade.
    #[must_use]
    pub fn new(name: impl Into<String>, score: Score) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// A student and the grades recorded for them, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Unique, case-sensitive identity key.
    #[serde(rename = "Nombre")]
    pub name: String,
    /// Grades, unique by course name.
    #[serde(rename = "Cursos")]
    pub courses: Vec<Course>,
}

impl Student {
    /// Create a student with a single grade.
    #[must_use]
    pub fn with_course(name: impl Into<String>, course: Course) -> Self {
        Self {
            name: name.into(),
            courses: vec![course],
        }
    }

    /// Find the grade for an exact course name.
    #[must_use]
    pub fn course(&self, course_name: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.name == course_name)
    }

    /// Score for an exact course name, if recorded.
    #[must_use]
    pub fn score_for(&self, course_name: &str) -> Option<Score> {
        self.course(course_name).map(|c| c.score)
    }

    /// Check if a grade exists for the course.
    #[must_use]
    pub fn has_course(&self, course_name: &str) -> bool {
        self.course(course_name).is_some()
    }
}
