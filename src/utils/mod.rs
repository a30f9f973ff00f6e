mod hash;

pub use hash::compute_hash;

/// Default mapping spreadsheet, relative to the working directory
pub const DEFAULT_SHEET_PATH: &str = "pareceres_recebidos.xlsx";

/// Default folder holding the local documents
pub const DEFAULT_DOCUMENTS_DIR: &str = "Pareceres";

/// Default config file name
pub const CONFIG_FILE: &str = "parecer.json";

/// Get current timestamp in ISO 8601 format
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Unicode default case folding for name comparison
pub fn fold_case(s: &str) -> String {
    caseless::default_case_fold_str(s)
}
