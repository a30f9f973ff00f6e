use crate::utils::{DEFAULT_DOCUMENTS_DIR, DEFAULT_SHEET_PATH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("csvDelimiter must be a single ASCII character, got '{0}'")]
    InvalidDelimiter(char),
}

fn default_sheet_path() -> PathBuf {
    PathBuf::from(DEFAULT_SHEET_PATH)
}

fn default_documents_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DOCUMENTS_DIR)
}

/// Daemon configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParecerConfig {
    /// Spreadsheet mapping students to documents
    #[serde(default = "default_sheet_path")]
    pub sheet_path: PathBuf,

    /// Base directory for file references that are neither URLs nor absolute paths
    #[serde(default = "default_documents_dir")]
    pub documents_dir: PathBuf,

    /// Field delimiter for CSV sources. Sniffed from the content when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv_delimiter: Option<char>,

    /// Handlebars template replacing the built-in spreadsheet guide
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guide_path: Option<PathBuf>,
}

impl Default for ParecerConfig {
    fn default() -> Self {
        Self {
            sheet_path: default_sheet_path(),
            documents_dir: default_documents_dir(),
            csv_delimiter: None,
            guide_path: None,
        }
    }
}

impl ParecerConfig {
    /// Apply command-line / environment overrides on top of this config
    pub fn with_overrides(
        mut self,
        sheet_path: Option<PathBuf>,
        documents_dir: Option<PathBuf>,
    ) -> Self {
        if let Some(sheet_path) = sheet_path {
            self.sheet_path = sheet_path;
        }
        if let Some(documents_dir) = documents_dir {
            self.documents_dir = documents_dir;
        }
        self
    }

    /// Reject settings the loader cannot honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.csv_delimiter {
            Some(c) if !c.is_ascii() => Err(ConfigError::InvalidDelimiter(c)),
            _ => Ok(()),
        }
    }

    /// The CSV delimiter as a byte. Only `None` for non-ASCII values, which
    /// [`ParecerConfig::validate`] rejects.
    pub fn csv_delimiter_byte(&self) -> Option<u8> {
        self.csv_delimiter
            .filter(char::is_ascii)
            .map(|c| c as u8)
    }
}

/// Read the configuration file
pub async fn read_config(config_path: &Path) -> Result<Option<ParecerConfig>, ConfigError> {
    if !config_path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(config_path).await?;
    let config: ParecerConfig = serde_json::from_str(&content)?;
    config.validate()?;
    Ok(Some(config))
}

/// Write the configuration file
pub async fn write_config(config_path: &Path, config: &ParecerConfig) -> Result<(), ConfigError> {
    let content = serde_json::to_string_pretty(config)?;
    fs::write(config_path, content).await?;
    Ok(())
}

/// Create the documents directory if it does not exist yet
pub async fn ensure_documents_dir(config: &ParecerConfig) -> Result<(), ConfigError> {
    if !config.documents_dir.exists() {
        fs::create_dir_all(&config.documents_dir).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ParecerConfig::default();
        assert_eq!(config.sheet_path, PathBuf::from("pareceres_recebidos.xlsx"));
        assert_eq!(config.documents_dir, PathBuf::from("Pareceres"));
        assert!(config.csv_delimiter.is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ParecerConfig = serde_json::from_str(r#"{"documentsDir": "docs"}"#).unwrap();
        assert_eq!(config.documents_dir, PathBuf::from("docs"));
        assert_eq!(config.sheet_path, PathBuf::from("pareceres_recebidos.xlsx"));
    }

    #[test]
    fn test_overrides_win() {
        let config = ParecerConfig::default()
            .with_overrides(Some(PathBuf::from("map.csv")), None);
        assert_eq!(config.sheet_path, PathBuf::from("map.csv"));
        assert_eq!(config.documents_dir, PathBuf::from("Pareceres"));
    }

    #[test]
    fn test_csv_delimiter_byte() {
        let mut config = ParecerConfig::default();
        assert_eq!(config.csv_delimiter_byte(), None);
        config.csv_delimiter = Some(';');
        assert_eq!(config.csv_delimiter_byte(), Some(b';'));
        config.csv_delimiter = Some('§');
        assert_eq!(config.csv_delimiter_byte(), None);
    }

    #[test]
    fn test_validate_delimiter() {
        let mut config = ParecerConfig::default();
        assert!(config.validate().is_ok());
        config.csv_delimiter = Some('\t');
        assert!(config.validate().is_ok());
        config.csv_delimiter = Some('§');
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDelimiter('§'))
        ));
    }

    #[tokio::test]
    async fn test_read_config_rejects_non_ascii_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parecer.json");
        std::fs::write(&path, r#"{"csvDelimiter": "§"}"#).unwrap();

        let err = read_config(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDelimiter('§')));
        assert!(err.to_string().contains("csvDelimiter"));
    }

    #[tokio::test]
    async fn test_read_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_config(&dir.path().join("parecer.json")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_write_then_read_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("parecer.json");
        let config = ParecerConfig {
            csv_delimiter: Some(';'),
            ..ParecerConfig::default()
        };

        write_config(&path, &config).await.unwrap();
        let read = read_config(&path).await.unwrap();
        assert_eq!(read, Some(config));
    }

    #[tokio::test]
    async fn test_ensure_documents_dir_creates_folder() {
        let dir = tempfile::tempdir().unwrap();
        let config = ParecerConfig {
            documents_dir: dir.path().join("Pareceres"),
            ..ParecerConfig::default()
        };

        ensure_documents_dir(&config).await.unwrap();
        assert!(config.documents_dir.is_dir());
    }
}
