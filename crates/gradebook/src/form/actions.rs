//! Validation and mutation logic of the form.
//!
//! These functions touch nothing but the record store. Side effects are
//! returned as [`Effect`]s and run by [`Form`](super::Form).

use tracing::debug;

use crate::catalog::CourseCatalog;
use crate::error::{Error, ValidationError};
use crate::record::Score;
use crate::store::RecordStore;

use super::surface::Notice;

/// Message shown after a grade is stored and saved.
pub const SAVED_MESSAGE: &str = "Data saved successfully.";

/// Raw contents of the grade input fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeInput {
    /// Student name as typed.
    pub name: String,
    /// Selected course, `None` when nothing is selected.
    pub course: Option<String>,
    /// Score as typed.
    pub score: String,
}

impl GradeInput {
    /// Create an input from its three fields.
    #[must_use]
    pub fn new(name: impl Into<String>, course: Option<&str>, score: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            course: course.map(str::to_string),
            score: score.into(),
        }
    }
}

/// A validated grade, ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidGrade {
    /// Trimmed student name.
    pub name: String,
    /// Catalog course name.
    pub course: String,
    /// Score in range.
    pub score: Score,
}

/// A side effect requested by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Save the whole store.
    Persist,
    /// Reset the grade input fields.
    ClearInputs,
    /// Show a notice. Info notices only make sense if every earlier
    /// [`Effect::Persist`] succeeded.
    Notify(Notice),
    /// Rebuild and show the grid.
    Render,
}

/// What an action did and what must happen next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Whether the store was changed.
    pub mutated: bool,
    /// Effects to run, in order.
    pub effects: Vec<Effect>,
}

impl Outcome {
    fn rejected(err: &Error) -> Self {
        Self {
            mutated: false,
            effects: vec![Effect::Notify(Notice::from(err))],
        }
    }

    fn applied(effects: Vec<Effect>) -> Self {
        Self {
            mutated: true,
            effects,
        }
    }
}

/// Check the grade input fields.
///
/// Checks run in order: name, course, score. The first failure wins.
///
/// # Errors
///
/// Returns the [`ValidationError`] for the first invalid field.
pub fn validate_grade(
    catalog: &CourseCatalog,
    input: &GradeInput,
) -> std::result::Result<ValidGrade, ValidationError> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let course = match input.course.as_deref().map(str::trim) {
        None | Some("") => return Err(ValidationError::NoCourseSelected),
        Some(course) if catalog.contains(course) => course,
        Some(course) => return Err(ValidationError::UnknownCourse(course.to_string())),
    };

    let score = Score::parse(&input.score)?;

    Ok(ValidGrade {
        name: name.to_string(),
        course: course.to_string(),
        score,
    })
}

/// Validate and record a grade.
///
/// On success the store is persisted, the inputs cleared and a success notice
/// shown. Any failure leaves the store untouched.
pub fn submit_grade(store: &mut RecordStore, catalog: &CourseCatalog, input: &GradeInput) -> Outcome {
    let grade = match validate_grade(catalog, input) {
        Ok(grade) => grade,
        Err(err) => return Outcome::rejected(&Error::from(err)),
    };

    match store.upsert_grade(&grade.name, &grade.course, grade.score) {
        Ok(kind) => {
            debug!(?kind, "Recorded {} = {} for {}", grade.course, grade.score, grade.name);
            Outcome::applied(vec![
                Effect::Persist,
                Effect::ClearInputs,
                Effect::Notify(Notice::info(SAVED_MESSAGE)),
            ])
        }
        Err(err) => Outcome::rejected(&err),
    }
}

/// Check that a student is selected for deletion.
///
/// # Errors
///
/// Returns [`ValidationError::NoSelection`] when the selection is missing or blank.
pub fn require_selection(selected: Option<&str>) -> std::result::Result<&str, ValidationError> {
    match selected {
        Some(name) if !name.trim().is_empty() => Ok(name),
        _ => Err(ValidationError::NoSelection),
    }
}

/// Remove a confirmed student, then persist and refresh the grid.
pub fn delete_student(store: &mut RecordStore, name: &str) -> Outcome {
    match store.remove_student(name) {
        Ok(_) => Outcome::applied(vec![
            Effect::Persist,
            Effect::Render,
            Effect::Notify(Notice::info(format!("Student '{name}' deleted."))),
        ]),
        Err(err) => Outcome::rejected(&err),
    }
}

/// Show the current store.
#[must_use]
pub fn refresh_display() -> Outcome {
    Outcome {
        mutated: false,
        effects: vec![Effect::Render],
    }
}
