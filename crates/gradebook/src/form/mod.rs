//! The grade entry form.
//!
//! [`actions`] holds the validation and mutation logic as plain functions
//! over the record store. [`Form`] owns the store, the persistence backend and
//! the user-facing [`Surface`], and runs the effects those functions request.
//!
//! # Example
//!
//! ```
//! use gradebook::catalog::CourseCatalog;
//! use gradebook::form::{Completion, Form, Notice, Surface};
//! use gradebook::grid::Grid;
//! use gradebook::storage::MemoryStorage;
//!
//! #[derive(Debug, Default)]
//! struct Quiet;
//!
//! impl Surface for Quiet {
//!     fn notify(&mut self, _notice: &Notice) {}
//!     fn confirm(&mut self, _question: &str) -> bool { true }
//!     fn render(&mut self, _grid: &Grid) {}
//! }
//!
//! let mut form = Form::open(MemoryStorage::new(), Quiet, CourseCatalog::default());
//! form.set_inputs("Ana", Some("Mathematics"), "95");
//! assert_eq!(form.submit_grade(), Completion::Applied);
//! assert_eq!(form.store().len(), 1);
//! ```

pub mod actions;
mod surface;

use tracing::{debug, info, warn};

use crate::catalog::CourseCatalog;
use crate::error::Error;
use crate::grid::Grid;
use crate::storage::Persistence;
use crate::store::RecordStore;

pub use actions::{Effect, GradeInput, Outcome};
pub use surface::{Notice, NoticeLevel, Surface};

#[cfg(test)]
pub(crate) use surface::RecordingSurface;

/// How a form action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The store changed and was saved.
    Applied,
    /// The store changed but saving failed; the file is stale.
    Unsaved,
    /// The action was refused; nothing changed.
    Rejected,
    /// The user declined the confirmation; nothing changed.
    Cancelled,
    /// The grid was shown.
    Displayed,
}

impl Completion {
    /// Check if the action ended as the user intended.
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Applied | Self::Cancelled | Self::Displayed)
    }
}

/// The grade entry form.
#[derive(Debug)]
pub struct Form<P, S> {
    store: RecordStore,
    catalog: CourseCatalog,
    grid: Grid,
    inputs: GradeInput,
    persistence: P,
    surface: S,
}

impl<P, S> Form<P, S> {
    /// The record store.
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// The course catalog.
    #[must_use]
    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    /// The grid as last rendered.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The persistence backend.
    #[must_use]
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// The surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

impl<P: Persistence, S: Surface> Form<P, S> {
    /// Open the form, loading the store from `persistence`.
    ///
    /// A load failure is shown as a warning and the form starts empty.
    pub fn open(persistence: P, mut surface: S, catalog: CourseCatalog) -> Self {
        let store = match persistence.load() {
            Ok(store) => store,
            Err(err) => {
                warn!("Failed to load {}: {}", persistence.location(), err);
                surface.notify(&Notice::warning(format!(
                    "{err}. Starting with no students."
                )));
                RecordStore::new()
            }
        };
        Self::with_store(store, persistence, surface, catalog)
    }

    /// Create a form around an existing store without loading.
    pub fn with_store(store: RecordStore, persistence: P, surface: S, catalog: CourseCatalog) -> Self {
        Self {
            grid: Grid::new(&catalog),
            store,
            catalog,
            inputs: GradeInput::default(),
            persistence,
            surface,
        }
    }

    /// Current contents of the input fields.
    #[must_use]
    pub fn inputs(&self) -> &GradeInput {
        &self.inputs
    }

    /// Fill in the input fields.
    pub fn set_inputs(&mut self, name: &str, course: Option<&str>, score: &str) {
        self.inputs = GradeInput::new(name, course, score);
    }

    /// Record the grade currently in the input fields.
    pub fn submit_grade(&mut self) -> Completion {
        let outcome = actions::submit_grade(&mut self.store, &self.catalog, &self.inputs);
        self.run(outcome)
    }

    /// Delete the selected student after confirmation.
    pub fn delete_student(&mut self, selected: Option<&str>) -> Completion {
        let name = match actions::require_selection(selected) {
            Ok(name) => name.to_string(),
            Err(err) => {
                self.surface.notify(&Notice::from(&Error::from(err)));
                return Completion::Rejected;
            }
        };

        let question = format!("Are you sure you want to delete student '{name}'?");
        if !self.surface.confirm(&question) {
            debug!("Delete of {} declined", name);
            return Completion::Cancelled;
        }

        let outcome = actions::delete_student(&mut self.store, &name);
        self.run(outcome)
    }

    /// Show the grid for the current store.
    pub fn refresh_display(&mut self) -> Completion {
        self.run(actions::refresh_display());
        Completion::Displayed
    }

    fn run(&mut self, outcome: Outcome) -> Completion {
        let mut saved = true;

        for effect in outcome.effects {
            match effect {
                Effect::Persist => {
                    if let Err(err) = self.persistence.save(self.store.all()) {
                        warn!("Save failed: {}", err);
                        saved = false;
                        self.surface.notify(&Notice::error(format!(
                            "{err}. Changes are kept in memory but {} is out of date.",
                            self.persistence.location()
                        )));
                    }
                }
                Effect::ClearInputs => self.inputs = GradeInput::default(),
                Effect::Notify(notice) => {
                    if saved || notice.level != NoticeLevel::Info {
                        self.surface.notify(&notice);
                    }
                }
                Effect::Render => {
                    self.grid.refresh(self.store.all());
                    self.surface.render(&self.grid);
                }
            }
        }

        match (outcome.mutated, saved) {
            (true, true) => {
                info!("Store now has {} students", self.store.len());
                Completion::Applied
            }
            (true, false) => Completion::Unsaved,
            (false, _) => Completion::Rejected,
        }
    }
}
