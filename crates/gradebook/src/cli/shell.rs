//! Interactive grade form on the terminal.
//!
//! The shell shows a small menu, collects the form fields one prompt at a
//! time and hands them to [`Form`]. It ends on `Quit` or end of input.

use std::io::{BufRead, Write};

use tracing::debug;

use crate::error::Result;
use crate::form::Form;
use crate::storage::Persistence;

use super::console::ConsoleSurface;

const MENU: &str = "\n[1] Save grade  [2] Show grid  [3] Delete student  [4] Quit";

/// A menu choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    SaveGrade,
    ShowGrid,
    DeleteStudent,
    Quit,
}

impl Action {
    fn parse(choice: &str) -> Option<Self> {
        match choice.trim().to_lowercase().as_str() {
            "1" | "save" | "s" => Some(Self::SaveGrade),
            "2" | "show" | "g" => Some(Self::ShowGrid),
            "3" | "delete" | "d" => Some(Self::DeleteStudent),
            "4" | "quit" | "q" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Run the interactive form until the user quits or input ends.
///
/// # Errors
///
/// Returns an error only if the terminal cannot be read or written. Form
/// failures are shown as notices and the loop continues.
pub fn run_shell<P, R, W>(form: &mut Form<P, ConsoleSurface<R, W>>) -> Result<()>
where
    P: Persistence,
    R: BufRead,
    W: Write,
{
    let location = form.persistence().location();
    form.surface_mut()
        .say(&format!("Student grades ({location})"))?;

    loop {
        form.surface_mut().say(MENU)?;
        let Some(choice) = form.surface_mut().prompt("> ")? else {
            break;
        };

        match Action::parse(&choice) {
            Some(Action::SaveGrade) => {
                if !save_grade(form)? {
                    break;
                }
            }
            Some(Action::ShowGrid) => {
                form.refresh_display();
            }
            Some(Action::DeleteStudent) => {
                if !delete_student(form)? {
                    break;
                }
            }
            Some(Action::Quit) => break,
            None if choice.trim().is_empty() => {}
            None => {
                form.surface_mut()
                    .say(&format!("Unknown choice '{}'.", choice.trim()))?;
            }
        }
    }

    debug!("Shell closed");
    Ok(())
}

/// Collect the grade fields and submit them. Returns `false` at end of input.
fn save_grade<P, R, W>(form: &mut Form<P, ConsoleSurface<R, W>>) -> Result<bool>
where
    P: Persistence,
    R: BufRead,
    W: Write,
{
    let Some(name) = form.surface_mut().prompt("Student name: ")? else {
        return Ok(false);
    };

    let menu: Vec<String> = form
        .catalog()
        .names()
        .iter()
        .enumerate()
        .map(|(i, course)| format!("  {}. {course}", i + 1))
        .collect();
    form.surface_mut().say(&menu.join("\n"))?;
    let Some(course) = form.surface_mut().prompt("Course (number or name): ")? else {
        return Ok(false);
    };

    let Some(score) = form.surface_mut().prompt("Score (0-100): ")? else {
        return Ok(false);
    };

    let course = selected_course(form, &course);
    form.set_inputs(&name, course.as_deref(), &score);
    form.submit_grade();
    Ok(true)
}

/// Map the course answer to a catalog name when possible.
///
/// Blank means nothing selected. Anything the catalog can't resolve is passed
/// through so the form reports it.
fn selected_course<P, S>(form: &Form<P, S>, answer: &str) -> Option<String> {
    let answer = answer.trim();
    if answer.is_empty() {
        return None;
    }
    Some(
        form.catalog()
            .resolve(answer)
            .map_or_else(|_| answer.to_string(), str::to_string),
    )
}

/// Show the grid, ask for a row and delete it. Returns `false` at end of input.
fn delete_student<P, R, W>(form: &mut Form<P, ConsoleSurface<R, W>>) -> Result<bool>
where
    P: Persistence,
    R: BufRead,
    W: Write,
{
    form.refresh_display();
    let Some(answer) = form.surface_mut().prompt("Row number or name to delete: ")? else {
        return Ok(false);
    };

    let selected = selected_student(form, &answer);
    form.delete_student(selected.as_deref());
    Ok(true)
}

/// Map the delete answer to a student name.
///
/// A row number wins, then an exact name. A number that is neither a row nor
/// a name selects nothing; other text is passed through so the form reports it.
fn selected_student<P, S>(form: &Form<P, S>, answer: &str) -> Option<String> {
    let answer = answer.trim();
    if answer.is_empty() {
        return None;
    }
    let row = answer
        .parse::<usize>()
        .ok()
        .and_then(|row| form.grid().selected_name(row));
    match row {
        Some(name) => Some(name.to_string()),
        None if form.store().find_student(answer).is_some() => Some(answer.to_string()),
        None if answer.parse::<usize>().is_ok() => None,
        None => Some(answer.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CourseCatalog;
    use crate::storage::MemoryStorage;

    type TestForm<'a> = Form<MemoryStorage, ConsoleSurface<&'a [u8], Vec<u8>>>;

    fn run(script: &str) -> (TestForm<'_>, String) {
        let surface = ConsoleSurface::new(script.as_bytes(), Vec::new()).with_row_numbers(true);
        let mut form = Form::open(MemoryStorage::new(), surface, CourseCatalog::default());
        run_shell(&mut form).unwrap();
        let output = String::from_utf8(form.surface().output().clone()).unwrap();
        (form, output)
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(Action::parse("1"), Some(Action::SaveGrade));
        assert_eq!(Action::parse(" Show "), Some(Action::ShowGrid));
        assert_eq!(Action::parse("d"), Some(Action::DeleteStudent));
        assert_eq!(Action::parse("q"), Some(Action::Quit));
        assert_eq!(Action::parse("9"), None);
    }

    #[test]
    fn test_quit_immediately() {
        let (form, output) = run("4\n");
        assert!(form.store().is_empty());
        assert!(output.contains("Student grades (:memory:)"));
    }

    #[test]
    fn test_end_of_input_quits() {
        let (form, _) = run("");
        assert!(form.store().is_empty());
    }

    #[test]
    fn test_save_grade_by_number() {
        let (form, output) = run("1\nAna\n1\n95\n4\n");

        let ana = form.store().find_student("Ana").unwrap();
        assert_eq!(ana.courses[0].name, "Mathematics");
        assert_eq!(ana.courses[0].score.value(), 95);
        assert_eq!(form.persistence().saves(), 1);
        assert!(output.contains("info: Data saved successfully."));
    }

    #[test]
    fn test_save_grade_by_name() {
        let (form, _) = run("save\nLuis\nData Structures\n70\nq\n");
        assert!(form
            .store()
            .find_student("Luis")
            .unwrap()
            .has_course("Data Structures"));
    }

    #[test]
    fn test_save_grade_validation_errors() {
        let (form, output) = run("1\n \n1\n50\n1\nAna\n\n50\n1\nAna\n1\n101\n4\n");

        assert!(form.store().is_empty());
        assert!(output.contains("error: empty name"));
        assert!(output.contains("error: no course selected"));
        assert!(output.contains("error: invalid score '101'"));
    }

    #[test]
    fn test_save_grade_unknown_course() {
        let (form, output) = run("1\nAna\n42\n50\n4\n");
        assert!(form.store().is_empty());
        assert!(output.contains("error: unknown course '42'"));
    }

    #[test]
    fn test_duplicate_grade_warning() {
        let (form, output) = run("1\nAna\n2\n50\n1\nAna\n2\n60\n4\n");

        assert_eq!(
            form.store().find_student("Ana").unwrap().courses[0].score.value(),
            50
        );
        assert!(output.contains("warning: student 'Ana' already has a grade for 'Physics'"));
    }

    #[test]
    fn test_show_grid() {
        let (_, output) = run("1\nAna\n2\n88\n2\n4\n");
        assert!(output.contains("# | Name | Mathematics | Physics"));
        assert!(output.contains("1 | Ana  |             | 88"));
    }

    #[test]
    fn test_delete_by_row_confirmed() {
        let (form, output) = run("1\nAna\n2\n88\n1\nLuis\n3\n70\n3\n1\ny\n4\n");

        assert!(form.store().find_student("Ana").is_none());
        assert!(form.store().find_student("Luis").is_some());
        assert_eq!(form.persistence().students().len(), 1);
        assert!(output.contains("Are you sure you want to delete student 'Ana'? [y/N]"));
    }

    #[test]
    fn test_delete_declined() {
        let (form, _) = run("1\nAna\n2\n88\n3\n1\nn\n4\n");
        assert_eq!(form.store().len(), 1);
    }

    #[test]
    fn test_delete_without_selection() {
        let (form, output) = run("1\nAna\n2\n88\n3\n\n3\n7\n4\n");
        assert_eq!(form.store().len(), 1);
        assert_eq!(output.matches("warning: no selection").count(), 2);
    }

    #[test]
    fn test_delete_by_name_missing() {
        let (form, output) = run("1\nAna\n2\n88\n3\nPedro\ny\n4\n");
        assert_eq!(form.store().len(), 1);
        assert!(output.contains("error: student 'Pedro' not found"));
    }

    #[test]
    fn test_delete_numeric_name() {
        let (form, _) = run("1\n2024\n2\n88\n1\nAna\n2\n90\n3\n2024\ny\n4\n");
        assert!(form.store().find_student("2024").is_none());
        assert!(form.store().find_student("Ana").is_some());
    }

    #[test]
    fn test_delete_row_number_wins_over_name() {
        let (form, _) = run("1\n2\n2\n88\n1\nAna\n2\n90\n3\n2\ny\n4\n");
        assert!(form.store().find_student("Ana").is_none());
        assert!(form.store().find_student("2").is_some());
    }

    #[test]
    fn test_unknown_choice() {
        let (_, output) = run("zzz\n4\n");
        assert!(output.contains("Unknown choice 'zzz'."));
    }
}
