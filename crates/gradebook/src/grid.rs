//! Grid presentation of the record store.
//!
//! One row per student in store order. The first column is the student's
//! name, followed by one column per catalog course. Grades for courses
//! outside the catalog are never shown.

use std::fmt::{self, Write as _};

use serde::Serialize;

use crate::catalog::CourseCatalog;
use crate::record::{Score, Student};

/// Header of the name column.
pub const NAME_HEADER: &str = "Name";

/// A single grid row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    /// Student name.
    pub name: String,
    /// One cell per catalog course, `None` when no grade is recorded.
    pub cells: Vec<Option<Score>>,
}

/// A rendered grid: course columns plus rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    columns: Vec<String>,
    rows: Vec<GridRow>,
}

impl Grid {
    /// Create an empty grid with the catalog's columns.
    #[must_use]
    pub fn new(catalog: &CourseCatalog) -> Self {
        Self {
            columns: catalog.names().to_vec(),
            rows: Vec::new(),
        }
    }

    /// Build a grid for `students`.
    #[must_use]
    pub fn build(catalog: &CourseCatalog, students: &[Student]) -> Self {
        let mut grid = Self::new(catalog);
        grid.refresh(students);
        grid
    }

    /// Rebuild every row from `students`.
    pub fn refresh(&mut self, students: &[Student]) {
        self.rows.clear();
        for student in students {
            let cells = self
                .columns
                .iter()
                .map(|course| student.score_for(course))
                .collect();
            self.rows.push(GridRow {
                name: student.name.clone(),
                cells,
            });
        }
    }

    /// Course column names in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in store order.
    #[must_use]
    pub fn rows(&self) -> &[GridRow] {
        &self.rows
    }

    /// Check if the grid has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Student name of a 1-based row, as shown by [`Grid::to_table`] with numbers.
    #[must_use]
    pub fn selected_name(&self, row: usize) -> Option<&str> {
        row.checked_sub(1)
            .and_then(|i| self.rows.get(i))
            .map(|r| r.name.as_str())
    }

    /// Render as an aligned text table, optionally with 1-based row numbers.
    #[must_use]
    pub fn to_table(&self, numbered: bool) -> String {
        let mut header: Vec<String> = Vec::with_capacity(self.columns.len() + 2);
        if numbered {
            header.push("#".to_string());
        }
        header.push(NAME_HEADER.to_string());
        header.extend(self.columns.iter().cloned());

        let mut lines: Vec<Vec<String>> = vec![header];
        for (i, row) in self.rows.iter().enumerate() {
            let mut line = Vec::with_capacity(row.cells.len() + 2);
            if numbered {
                line.push((i + 1).to_string());
            }
            line.push(row.name.clone());
            line.extend(row.cells.iter().map(|cell| cell_text(*cell)));
            lines.push(line);
        }

        let width_count = lines[0].len();
        let widths: Vec<usize> = (0..width_count)
            .map(|col| {
                lines
                    .iter()
                    .map(|line| line[col].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        for (n, line) in lines.iter().enumerate() {
            let cells: Vec<String> = line
                .iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{cell:<width$}"))
                .collect();
            let _ = writeln!(out, "{}", cells.join(" | ").trim_end());
            if n == 0 {
                let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
                let _ = writeln!(out, "{}", rule.join("-+-"));
            }
        }
        out
    }

    /// Render as tab-separated lines with a header.
    #[must_use]
    pub fn to_plain(&self) -> String {
        let mut out = String::new();
        let mut header = vec![NAME_HEADER.to_string()];
        header.extend(self.columns.iter().cloned());
        let _ = writeln!(out, "{}", header.join("\t"));
        for row in &self.rows {
            let mut line = vec![row.name.clone()];
            line.extend(row.cells.iter().map(|cell| cell_text(*cell)));
            let _ = writeln!(out, "{}", line.join("\t"));
        }
        out
    }

    /// Convert to a serializable view keyed by course name.
    #[must_use]
    pub fn to_json_rows(&self) -> Vec<JsonRow<'_>> {
        self.rows
            .iter()
            .map(|row| JsonRow {
                name: &row.name,
                scores: ScoreMap {
                    columns: &self.columns,
                    cells: &row.cells,
                },
            })
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_table(false))
    }
}

/// JSON view of a grid row.
#[derive(Debug, Serialize)]
pub struct JsonRow<'a> {
    /// Student name.
    pub name: &'a str,
    /// Course to score, `null` for empty cells.
    pub scores: ScoreMap<'a>,
}

/// Scores of one row, serialized as an object in column order.
#[derive(Debug)]
pub struct ScoreMap<'a> {
    columns: &'a [String],
    cells: &'a [Option<Score>],
}

impl Serialize for ScoreMap<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.columns
                .iter()
                .zip(self.cells)
                .map(|(course, cell)| (course, cell.map(Score::value))),
        )
    }
}

fn cell_text(cell: Option<Score>) -> String {
    cell.map(|s| s.to_string()).unwrap_or_default()
}
