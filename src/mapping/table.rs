//! Raw grid reading for spreadsheet and CSV sources.
//!
//! Both readers produce rows of cell text anchored at column A. Nothing here
//! trims or interprets the cells; that is the loader's job.

use super::MappingError;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Extensions read through the CSV reader. Everything else goes to calamine.
const DELIMITED_EXTENSIONS: &[&str] = &["csv", "tsv", "txt"];

/// Delimiters tried when sniffing CSV sources, in preference order.
/// Commas come last since they also separate file references inside a cell.
const DELIMITER_CANDIDATES: &[u8] = &[b'\t', b';', b','];

pub type Grid = Vec<Vec<String>>;

/// Read the first sheet of `path` into a grid of cell strings
pub fn read_grid(path: &Path, csv_delimiter: Option<u8>) -> Result<Grid, MappingError> {
    if !path.exists() {
        return Err(MappingError::SourceNotFound(path.display().to_string()));
    }

    if is_delimited(path) {
        let content = read_file_as_utf8(path)?;
        let delimiter = csv_delimiter
            .or_else(|| extension_delimiter(path))
            .unwrap_or_else(|| sniff_delimiter(&content));
        read_delimited(&content, delimiter)
    } else {
        read_workbook(path)
    }
}

fn is_delimited(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| DELIMITED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Delimiter implied by the file extension, if any
fn extension_delimiter(path: &Path) -> Option<u8> {
    path.extension()
        .and_then(|e| e.to_str())
        .filter(|e| e.eq_ignore_ascii_case("tsv"))
        .map(|_| b'\t')
}

fn read_workbook(path: &Path) -> Result<Grid, MappingError> {
    let mut workbook = open_workbook_auto(path)?;

    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| MappingError::SourceUnreadable("workbook contains no sheets".to_string()))?;

    let range = workbook.worksheet_range(&first_sheet)?;

    // Used ranges may start past column A; pad so positions stay absolute.
    let col_offset = range.start().map(|(_, col)| col as usize).unwrap_or(0);

    let grid = range
        .rows()
        .map(|row| {
            let mut cells = vec![String::new(); col_offset];
            cells.extend(row.iter().map(cell_to_string));
            cells
        })
        .collect();

    Ok(grid)
}

/// Render a workbook cell as text
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Int(i) => i.to_string(),
        other => other.to_string(),
    }
}

/// Read file and convert to UTF-8 if needed (Excel often exports Windows-1252)
fn read_file_as_utf8(path: &Path) -> Result<String, MappingError> {
    let bytes = std::fs::read(path)?;

    match String::from_utf8(bytes) {
        Ok(s) => Ok(s.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(s)),
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// A candidate must split the first line into more than one field. Among those,
/// the one whose field count repeats on the most lines wins; earlier candidates
/// win ties.
pub fn sniff_delimiter(content: &str) -> u8 {
    let sample_lines: Vec<&str> = content.lines().take(10).collect();

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in DELIMITER_CANDIDATES {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        let target = match counts.first() {
            Some(&n) if n > 1 => n,
            _ => continue,
        };

        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        if consistent > best_score {
            best_score = consistent;
            best = delim;
        }
    }

    best
}

fn read_delimited(content: &str, delimiter: u8) -> Result<Grid, MappingError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut grid = Vec::new();
    for record in reader.records() {
        let record = record?;
        grid.push(record.iter().map(str::to_string).collect());
    }
    Ok(grid)
}
