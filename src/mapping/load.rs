use super::layout::detect_layout;
use super::table::read_grid;
use super::types::{ColumnLayout, Mapping, MappingEntry};
use super::MappingError;
use crate::utils::now_iso;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Separators accepted between several file references in one cell
static MULTI_VALUE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[|,;]").expect("separator pattern should compile"));

/// Load the mapping entries from a spreadsheet, sniffing CSV delimiters
pub fn load(source: &Path) -> Result<Vec<MappingEntry>, MappingError> {
    Ok(load_mapping(source, None)?.entries)
}

/// Load the mapping together with the layout that was used to read it
pub fn load_mapping(source: &Path, csv_delimiter: Option<u8>) -> Result<Mapping, MappingError> {
    let grid = read_grid(source, csv_delimiter)?;
    let layout = detect_layout(grid.first().map(Vec::as_slice));

    match layout {
        ColumnLayout::Headered { student, file } => {
            debug!(student, file, "Using labelled columns");
        }
        ColumnLayout::Positional => {
            debug!("No complete header found, reading columns A and B");
        }
    }

    let entries = normalize_rows(&grid, layout);

    info!(
        source = %source.display(),
        rows = grid.len(),
        entries = entries.len(),
        "Loaded student mapping"
    );

    Ok(Mapping {
        entries,
        layout,
        loaded_at: now_iso(),
    })
}

/// Turn raw rows into deduplicated entries using the given layout
pub fn normalize_rows(grid: &[Vec<String>], layout: ColumnLayout) -> Vec<MappingEntry> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    let mut skipped = 0usize;

    for row in grid.iter().skip(layout.header_rows()) {
        let student = cell(row, layout.student_column());
        let file = cell(row, layout.file_column());

        if student.is_empty() || file.is_empty() || file.eq_ignore_ascii_case("nan") {
            skipped += 1;
            continue;
        }

        for file_ref in split_file_refs(file) {
            let entry = MappingEntry::new(student, file_ref);
            if seen.insert(entry.clone()) {
                entries.push(entry);
            }
        }
    }

    if skipped > 0 {
        debug!(skipped, "Skipped rows without student or file");
    }

    entries
}

fn cell(row: &[String], column: usize) -> &str {
    row.get(column).map(|c| c.trim()).unwrap_or("")
}

/// Split a file cell on `,`, `;` or `|`.
///
/// A cell made only of separators yields itself as the single reference.
pub fn split_file_refs(cell: &str) -> Vec<String> {
    let pieces: Vec<String> = MULTI_VALUE_SEPARATOR
        .split(cell)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();

    if pieces.is_empty() {
        vec![cell.to_string()]
    } else {
        pieces
    }
}
