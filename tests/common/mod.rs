#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write an .xlsx workbook whose first sheet holds `rows`, starting at A1
pub fn write_xlsx(dir: &Path, name: &str, rows: &[&[&str]]) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                worksheet
                    .write_string(r as u32, c as u16, *value)
                    .expect("Failed to write cell");
            }
        }
    }

    workbook.save(&path).expect("Failed to save workbook");
    path
}

/// Write a CSV file with the given raw content
pub fn write_csv(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write csv");
    path
}

/// Create the documents folder with the given files
pub fn create_documents(dir: &Path, files: &[&str]) -> PathBuf {
    let docs = dir.join("Pareceres");
    std::fs::create_dir_all(&docs).expect("Failed to create documents dir");
    for file in files {
        std::fs::write(docs.join(file), format!("contents of {}", file))
            .expect("Failed to write document");
    }
    docs
}
