use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileKind {
    /// An http(s) URL to open
    Remote,
    /// A file on disk to download
    Local,
}

/// A file reference resolved for display and delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFile {
    pub kind: FileKind,
    pub label: String,
    /// URL for remote files, filesystem path for local ones
    pub target: String,
}

impl ResolvedFile {
    pub fn local_path(&self) -> Option<&Path> {
        match self.kind {
            FileKind::Local => Some(Path::new(&self.target)),
            FileKind::Remote => None,
        }
    }
}
