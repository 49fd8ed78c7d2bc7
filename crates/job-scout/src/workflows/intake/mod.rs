//! Bulk intake: pasted JSON or CSV exports turned into listings.

mod normalizer;
mod parser;

pub use normalizer::{normalize, FieldMap, FieldValue, ListingFields};
pub use parser::parse_batch;
pub(crate) use normalizer::parse_currency;

use crate::workflows::screening::JobListing;
use std::io::Read;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("could not parse jobs data; try JSON or CSV format")]
    Unparseable,
    #[error("failed to read jobs data: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV jobs data: {0}")]
    Csv(#[from] csv::Error),
}

/// Turns pasted or exported batches into normalized listings.
pub struct BatchImporter;

impl BatchImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<JobListing>, IntakeError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_text(&text)
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Vec<JobListing>, IntakeError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_text(&text)
    }

    pub fn from_text(text: &str) -> Result<Vec<JobListing>, IntakeError> {
        let records = parser::parse_batch(text)?;
        Ok(records.iter().map(normalize).collect())
    }
}
