//! Spreadsheet to student mapping.
//!
//! The loader reads the first sheet of the source, decides between labelled
//! and positional columns, and produces deduplicated (student, file) entries.

mod layout;
mod load;
mod roster;
mod table;
mod types;

pub use layout::{detect_layout, FILE_ALIASES, STUDENT_ALIASES};
pub use load::{load, load_mapping, normalize_rows, split_file_refs};
pub use roster::StudentRoster;
pub use table::{read_grid, Grid};
pub use types::{ColumnLayout, Mapping, MappingEntry};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MappingError {
    #[error("Spreadsheet not found: {0}. Place the mapping file at the configured path.")]
    SourceNotFound(String),

    #[error("Spreadsheet could not be read as a table: {0}. Save it as .xlsx, .ods or .csv and try again.")]
    SourceUnreadable(String),
}

impl From<std::io::Error> for MappingError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => MappingError::SourceNotFound(err.to_string()),
            _ => MappingError::SourceUnreadable(err.to_string()),
        }
    }
}

impl From<calamine::Error> for MappingError {
    fn from(err: calamine::Error) -> Self {
        MappingError::SourceUnreadable(err.to_string())
    }
}

impl From<csv::Error> for MappingError {
    fn from(err: csv::Error) -> Self {
        MappingError::SourceUnreadable(err.to_string())
    }
}
