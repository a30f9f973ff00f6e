mod fetch;
mod types;

pub use fetch::{fetch_document, is_available, Document, FetchError};
pub use types::{FileKind, ResolvedFile};

use crate::mapping::MappingEntry;
use crate::utils::fold_case;
use std::path::Path;

const REMOTE_SCHEMES: &[&str] = &["http://", "https://"];

/// Resolve every file belonging to `student_name`, in mapping order.
///
/// Names are compared case-insensitively and must match exactly.
pub fn resolve_for_student(
    entries: &[MappingEntry],
    student_name: &str,
    documents_dir: &Path,
) -> Vec<ResolvedFile> {
    let wanted = fold_case(student_name);

    entries
        .iter()
        .filter(|e| fold_case(&e.student) == wanted)
        .map(|e| classify(&e.file_ref, documents_dir))
        .collect()
}

/// Classify a single file reference as a remote link or a local path
pub fn classify(file_ref: &str, documents_dir: &Path) -> ResolvedFile {
    if is_remote(file_ref) {
        return ResolvedFile {
            kind: FileKind::Remote,
            label: file_ref.to_string(),
            target: file_ref.to_string(),
        };
    }

    let path = Path::new(file_ref);
    let target = if path.is_absolute() {
        path.to_path_buf()
    } else {
        documents_dir.join(path)
    };

    let label = target
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file_ref.to_string());

    ResolvedFile {
        kind: FileKind::Local,
        label,
        target: target.to_string_lossy().to_string(),
    }
}

fn is_remote(file_ref: &str) -> bool {
    REMOTE_SCHEMES.iter().any(|scheme| {
        file_ref
            .get(..scheme.len())
            .map(|prefix| prefix.eq_ignore_ascii_case(scheme))
            .unwrap_or(false)
    })
}
