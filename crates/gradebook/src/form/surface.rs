//! The user-facing side of the form: notices, confirmations and the grid.

use std::fmt;

use crate::error::Error;
use crate::grid::Grid;

/// Severity of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// The action succeeded.
    Info,
    /// The action was refused but nothing is wrong.
    Warning,
    /// The action failed.
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A message the user must acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Text shown to the user.
    pub message: String,
}

impl Notice {
    /// Create an info notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Create a warning notice.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    /// Create an error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl From<&Error> for Notice {
    fn from(err: &Error) -> Self {
        if err.is_warning() {
            Self::warning(err.to_string())
        } else {
            Self::error(err.to_string())
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)
    }
}

/// Where the form shows its output and asks its questions.
///
/// Every call blocks until the user has seen or answered it.
pub trait Surface {
    /// Show a notice.
    fn notify(&mut self, notice: &Notice);

    /// Ask a yes/no question. Anything but an explicit yes is a no.
    fn confirm(&mut self, question: &str) -> bool;

    /// Show the grid.
    fn render(&mut self, grid: &Grid);
}

/// A surface that records everything and answers confirmations from a script.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub notices: Vec<Notice>,
    pub questions: Vec<String>,
    pub renders: Vec<Grid>,
    pub answers: std::collections::VecDeque<bool>,
}

#[cfg(test)]
impl RecordingSurface {
    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn levels(&self) -> Vec<NoticeLevel> {
        self.notices.iter().map(|n| n.level).collect()
    }
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.questions.push(question.to_string());
        self.answers.pop_front().unwrap_or(false)
    }

    fn render(&mut self, grid: &Grid) {
        self.renders.push(grid.clone());
    }
}
