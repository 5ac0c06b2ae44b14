//! In-memory record store.
//!
//! The store is the single source of truth during a session. Students keep
//! their insertion order, which is also the grid's row order.

use tracing::debug;

use crate::error::{Error, Result};
use crate::record::{Course, Score, Student};

/// Ordered collection of students, unique by exact name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    students: Vec<Student>,
}

/// Result of a successful [`RecordStore::upsert_grade`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// A new student was created with the grade.
    CreatedStudent,
    /// The grade was appended to an existing student.
    AddedCourse,
}

impl RecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loaded students, checking the record invariants.
    ///
    /// # Errors
    ///
    /// Returns a description of the first broken invariant: an empty student
    /// name, a repeated student, or a repeated course within a student. The
    /// storage layer wraps it in [`Error::InvalidDocument`].
    pub fn from_students(students: Vec<Student>) -> std::result::Result<Self, String> {
        for (i, student) in students.iter().enumerate() {
            if student.name.trim().is_empty() {
                return Err(format!("student at index {i} has an empty name"));
            }
            if students[..i].iter().any(|s| s.name == student.name) {
                return Err(format!("student '{}' appears more than once", student.name));
            }
            for (j, course) in student.courses.iter().enumerate() {
                if student.courses[..j].iter().any(|c| c.name == course.name) {
                    return Err(format!(
                        "student '{}' has course '{}' more than once",
                        student.name, course.name
                    ));
                }
            }
        }
        Ok(Self { students })
    }

    /// Find a student by exact name.
    #[must_use]
    pub fn find_student(&self, name: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.name == name)
    }

    /// Record a grade, creating the student when needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateCourse`] if the student already has a grade for
    /// `course_name`. The store is not modified in that case.
    pub fn upsert_grade(&mut self, name: &str, course_name: &str, score: Score) -> Result<Upsert> {
        let course = Course::new(course_name, score);
        if let Some(student) = self.students.iter_mut().find(|s| s.name == name) {
            if student.has_course(course_name) {
                return Err(Error::duplicate_course(name, course_name));
            }
            student.courses.push(course);
            debug!("Added {} to student {}", course_name, name);
            return Ok(Upsert::AddedCourse);
        }

        self.students.push(Student::with_course(name, course));
        debug!("Created student {} with {}", name, course_name);
        Ok(Upsert::CreatedStudent)
    }

    /// Remove the student with this exact name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no such student exists. The store is not
    /// modified in that case.
    pub fn remove_student(&mut self, name: &str) -> Result<Student> {
        let index = self
            .students
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| Error::not_found(name))?;
        Ok(self.students.remove(index))
    }

    /// Read-only snapshot of all students in order.
    #[must_use]
    pub fn all(&self) -> &[Student] {
        &self.students
    }

    /// Number of students.
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Consume the store, returning its students.
    #[must_use]
    pub fn into_students(self) -> Vec<Student> {
        self.students
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(v: i64) -> Score {
        Score::try_from(v).unwrap()
    }

    fn create_test_store() -> RecordStore {
        let mut store = RecordStore::new();
        store.upsert_grade("Ana", "Mathematics", score(95)).unwrap();
        store.upsert_grade("Luis", "Physics", score(70)).unwrap();
        store
    }

    #[test]
    fn test_upsert_creates_student() {
        let mut store = RecordStore::new();
        let result = store.upsert_grade("Ana", "Mathematics", score(95)).unwrap();

        assert_eq!(result, Upsert::CreatedStudent);
        assert_eq!(store.len(), 1);
        let ana = store.find_student("Ana").unwrap();
        assert_eq!(ana.courses, vec![Course::new("Mathematics", score(95))]);
    }

    #[test]
    fn test_upsert_appends_course() {
        let mut store = create_test_store();
        let result = store.upsert_grade("Ana", "Physics", score(60)).unwrap();

        assert_eq!(result, Upsert::AddedCourse);
        assert_eq!(store.len(), 2);
        let names: Vec<_> = store
            .find_student("Ana")
            .unwrap()
            .courses
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, ["Mathematics", "Physics"]);
    }

    #[test]
    fn test_upsert_duplicate_leaves_store_unchanged() {
        let mut store = create_test_store();
        let before = store.clone();

        let err = store.upsert_grade("Ana", "Mathematics", score(10)).unwrap_err();

        assert!(matches!(err, Error::DuplicateCourse { .. }));
        assert_eq!(store, before);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut store = create_test_store();
        store.upsert_grade("ana", "Mathematics", score(50)).unwrap();

        assert_eq!(store.len(), 3);
        assert!(store.find_student("ANA").is_none());
    }

    #[test]
    fn test_remove_student() {
        let mut store = create_test_store();
        let removed = store.remove_student("Ana").unwrap();

        assert_eq!(removed.name, "Ana");
        assert_eq!(store.len(), 1);
        assert!(store.find_student("Luis").is_some());
    }

    #[test]
    fn test_remove_missing_student() {
        let mut store = create_test_store();
        let before = store.clone();

        let err = store.remove_student("Pedro").unwrap_err();

        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(store, before);
    }

    #[test]
    fn test_all_preserves_order() {
        let store = create_test_store();
        let names: Vec<_> = store.all().iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Ana", "Luis"]);
    }

    #[test]
    fn test_from_students_valid() {
        let students = create_test_store().into_students();
        let store = RecordStore::from_students(students.clone()).unwrap();
        assert_eq!(store.all(), students.as_slice());
    }

    #[test]
    fn test_from_students_rejects_duplicate_student() {
        let ana = Student::with_course("Ana", Course::new("Physics", score(1)));
        let err = RecordStore::from_students(vec![ana.clone(), ana]).unwrap_err();
        assert!(err.contains("more than once"));
    }

    #[test]
    fn test_from_students_rejects_duplicate_course() {
        let mut ana = Student::with_course("Ana", Course::new("Physics", score(1)));
        ana.courses.push(Course::new("Physics", score(2)));
        let err = RecordStore::from_students(vec![ana]).unwrap_err();
        assert!(err.contains("Physics"));
    }

    #[test]
    fn test_from_students_rejects_empty_name() {
        let blank = Student {
            name: "  ".to_string(),
            courses: Vec::new(),
        };
        assert!(RecordStore::from_students(vec![blank]).is_err());
    }
}
