//! Parse the partner performance workbook's CSV exports into typed records.
//!
//! A load cycle fetches the performance sheet and the three partner sheets,
//! tokenizes each export, locates rows by label and assembles a
//! [`schema::Dataset`]. Any failure degrades to a fallback dataset.

pub mod config;
pub mod error;
pub mod fetch;
pub mod process;
pub mod report;
pub mod schema;

pub use error::LoadError;
pub use fetch::{
    load, load_or_fallback, DataSource, DirSource, HttpSource, LoadOutcome, SheetSource,
};
pub use schema::{Dataset, Fallback};
