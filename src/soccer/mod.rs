//! League data, report properties and PDF output
//!
//! The chart modules build on this: tables come in through a `MatchSource`,
//! settings through `ReportPropertyReader`, and pages go out through
//! `DocumentWriter`.

pub mod data;
pub mod error;
pub mod league;
pub mod pages;
pub mod palettes;
pub mod pdf_backend;
pub mod properties;
pub mod source;

pub use error::{ReportError, Result};
pub use league::{League, LeagueTables};
pub use pages::{DocumentWriter, PageSize};
pub use properties::ReportPropertyReader;
pub use source::{CsvSource, MatchSource, SampleSource};
