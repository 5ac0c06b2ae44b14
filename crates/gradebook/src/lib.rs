//! `gradebook` - Record student course grades in a local JSON file
//!
//! This library provides the record store, the JSON document persistence,
//! the grade entry form and the grid presentation behind the `gradebook`
//! binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod grid;
pub mod logging;
pub mod record;
pub mod storage;
pub mod store;

pub use catalog::CourseCatalog;
pub use config::Config;
pub use error::{Error, Result, ValidationError};
pub use form::{Completion, Form};
pub use grid::Grid;
pub use logging::init_logging;
pub use record::{Course, Score, Student};
pub use storage::{JsonFile, MemoryStorage, Persistence};
pub use store::RecordStore;
