use crate::config::ParecerConfig;
use crate::mapping::{FILE_ALIASES, STUDENT_ALIASES};
use serde::Serialize;

/// Values available to the spreadsheet preparation guide
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideContext {
    pub sheet_name: String,
    pub documents_dir: String,
    pub student_aliases: Vec<String>,
    pub file_aliases: Vec<String>,
}

impl GuideContext {
    pub fn from_config(config: &ParecerConfig) -> Self {
        let sheet_name = config
            .sheet_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| config.sheet_path.display().to_string());

        Self {
            sheet_name,
            documents_dir: config.documents_dir.display().to_string(),
            student_aliases: STUDENT_ALIASES.iter().map(|s| s.to_string()).collect(),
            file_aliases: FILE_ALIASES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
