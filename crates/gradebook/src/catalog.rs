//! The fixed, ordered list of courses a grade can be recorded for.
//!
//! The catalog doubles as the column list of the grid.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Courses offered when no configuration overrides them.
pub const DEFAULT_COURSES: [&str; 8] = [
    "Mathematics",
    "Physics",
    "Programming",
    "Algebra",
    "Chemistry",
    "Data Structures",
    "Compilers",
    "Automata and Languages",
];

/// Ordered list of recognized course names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseCatalog {
    names: Vec<String>,
}

impl Default for CourseCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_COURSES)
    }
}

impl CourseCatalog {
    /// Build a catalog from course names, preserving their order.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Course names in column order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of courses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the catalog has no courses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Check if the exact course name is in the catalog.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Course at a 1-based position, as shown in numbered menus.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|i| self.names.get(i))
            .map(String::as_str)
    }

    /// Resolve a course selection to a catalog name.
    ///
    /// A selection is either a 1-based menu number or an exact course name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoCourseSelected`] for blank input and
    /// [`ValidationError::UnknownCourse`] when nothing matches.
    pub fn resolve(&self, selection: &str) -> Result<&str, ValidationError> {
        let selection = selection.trim();
        if selection.is_empty() {
            return Err(ValidationError::NoCourseSelected);
        }
        if let Some(name) = self.names.iter().find(|n| n.as_str() == selection) {
            return Ok(name);
        }
        selection
            .parse::<usize>()
            .ok()
            .and_then(|position| self.get(position))
            .ok_or_else(|| ValidationError::UnknownCourse(selection.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_order() {
        let catalog = CourseCatalog::default();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.names()[0], "Mathematics");
        assert_eq!(catalog.names()[7], "Automata and Languages");
    }

    #[test]
    fn test_contains_is_exact() {
        let catalog = CourseCatalog::default();
        assert!(catalog.contains("Physics"));
        assert!(!catalog.contains("physics"));
        assert!(!catalog.contains("Biology"));
    }

    #[test]
    fn test_get_is_one_based() {
        let catalog = CourseCatalog::default();
        assert_eq!(catalog.get(0), None);
        assert_eq!(catalog.get(1), Some("Mathematics"));
        assert_eq!(catalog.get(8), Some("Automata and Languages"));
        assert_eq!(catalog.get(9), None);
    }

    #[test]
    fn test_resolve_by_name_and_number() {
        let catalog = CourseCatalog::default();
        assert_eq!(catalog.resolve("Compilers"), Ok("Compilers"));
        assert_eq!(catalog.resolve(" 2 "), Ok("Physics"));
    }

    #[test]
    fn test_resolve_rejects() {
        let catalog = CourseCatalog::new(["Physics"]);
        assert_eq!(catalog.resolve("  "), Err(ValidationError::NoCourseSelected));
        assert_eq!(
            catalog.resolve("Biology"),
            Err(ValidationError::UnknownCourse("Biology".to_string()))
        );
        assert_eq!(
            catalog.resolve("2"),
            Err(ValidationError::UnknownCourse("2".to_string()))
        );
    }

    #[test]
    fn test_serializes_as_list() {
        let catalog = CourseCatalog::new(["A", "B"]);
        assert_eq!(serde_json::to_string(&catalog).unwrap(), r#"["A","B"]"#);
    }
}
