use serde::{Deserialize, Serialize};

/// One normalized (student, file reference) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    pub student: String,
    pub file_ref: String,
}

impl MappingEntry {
    pub fn new(student: impl Into<String>, file_ref: impl Into<String>) -> Self {
        Self {
            student: student.into(),
            file_ref: file_ref.into(),
        }
    }
}

/// Which columns the loader read student and file from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ColumnLayout {
    /// Row 0 holds labels; data starts at row 1
    Headered { student: usize, file: usize },
    /// No usable labels; column A is the student, column B the file
    Positional,
}

impl ColumnLayout {
    pub const POSITIONAL_STUDENT: usize = 0;
    pub const POSITIONAL_FILE: usize = 1;

    pub fn student_column(&self) -> usize {
        match self {
            ColumnLayout::Headered { student, .. } => *student,
            ColumnLayout::Positional => Self::POSITIONAL_STUDENT,
        }
    }

    pub fn file_column(&self) -> usize {
        match self {
            ColumnLayout::Headered { file, .. } => *file,
            ColumnLayout::Positional => Self::POSITIONAL_FILE,
        }
    }

    /// Number of leading rows that are labels rather than data
    pub fn header_rows(&self) -> usize {
        match self {
            ColumnLayout::Headered { .. } => 1,
            ColumnLayout::Positional => 0,
        }
    }
}

/// A loaded mapping as handed to consumers
#[derive(Debug, Clone)]
pub struct Mapping {
    pub entries: Vec<MappingEntry>,
    pub layout: ColumnLayout,
    /// When the source was read (RFC 3339)
    pub loaded_at: String,
}
