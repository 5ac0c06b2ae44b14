//! Terminal implementation of the form surface.

use std::io::{self, BufRead, Write};

use tracing::warn;

use crate::form::{Notice, Surface};
use crate::grid::Grid;

use super::commands::OutputFormat;

/// A [`Surface`] that prints to a writer and reads answers from a reader.
#[derive(Debug)]
pub struct ConsoleSurface<R, W> {
    input: R,
    output: W,
    format: OutputFormat,
    numbered: bool,
    assume_yes: bool,
}

impl<R: BufRead, W: Write> ConsoleSurface<R, W> {
    /// Create a surface rendering grids as tables.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            format: OutputFormat::Table,
            numbered: false,
            assume_yes: false,
        }
    }

    /// Render grids in `format`.
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Prefix table rows with 1-based numbers for selection.
    #[must_use]
    pub fn with_row_numbers(mut self, numbered: bool) -> Self {
        self.numbered = numbered;
        self
    }

    /// Answer every confirmation with yes without asking.
    #[must_use]
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    /// Print `label` and read one line.
    ///
    /// Returns `None` at end of input. The trailing newline is removed.
    ///
    /// # Errors
    ///
    /// Returns an error if writing the prompt or reading the line fails.
    pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    /// Print a line of text.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn say(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// The underlying writer.
    pub fn output(&self) -> &W {
        &self.output
    }

    fn write_or_warn(&mut self, text: &str) {
        if let Err(err) = self.output.write_all(text.as_bytes()).and_then(|()| self.output.flush()) {
            warn!("Failed to write to terminal: {}", err);
        }
    }
}

impl<R: BufRead, W: Write> Surface for ConsoleSurface<R, W> {
    fn notify(&mut self, notice: &Notice) {
        self.write_or_warn(&format!("{notice}\n"));
    }

    fn confirm(&mut self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        match self.prompt(&format!("{question} [y/N] ")) {
            Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Ok(None) => false,
            Err(err) => {
                warn!("Failed to read confirmation: {}", err);
                false
            }
        }
    }

    fn render(&mut self, grid: &Grid) {
        let text = match self.format {
            OutputFormat::Table => grid.to_table(self.numbered),
            OutputFormat::Plain => grid.to_plain(),
            OutputFormat::Json => match serde_json::to_string_pretty(&grid.to_json_rows()) {
                Ok(json) => format!("{json}\n"),
                Err(err) => {
                    warn!("Failed to encode grid: {}", err);
                    return;
                }
            },
        };
        self.write_or_warn(&text);
    }
}
