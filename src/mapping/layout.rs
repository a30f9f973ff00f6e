use super::types::ColumnLayout;

/// Header labels naming the student column, in priority order
pub const STUDENT_ALIASES: &[&str] = &["aluno", "alunos", "discente", "nome", "nome do aluno"];

/// Header labels naming the file column, in priority order
pub const FILE_ALIASES: &[&str] = &["arquivo", "parecer", "arquivo do parecer", "pdf", "coluna b"];

fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Whether any label of the first row is a known student or file alias
pub fn has_known_labels(labels: &[String]) -> bool {
    labels
        .iter()
        .map(|l| normalize_label(l))
        .any(|l| STUDENT_ALIASES.contains(&l.as_str()) || FILE_ALIASES.contains(&l.as_str()))
}

/// First column whose label equals the highest-priority alias present
fn find_column(labels: &[String], aliases: &[&str]) -> Option<usize> {
    let normalized: Vec<String> = labels.iter().map(|l| normalize_label(l)).collect();
    aliases
        .iter()
        .find_map(|alias| normalized.iter().position(|l| l == alias))
}

/// Pick the column layout from the first row of the table.
///
/// Headered only when both a student and a file column are identified;
/// any partial match falls back to positional columns A and B.
pub fn detect_layout(first_row: Option<&[String]>) -> ColumnLayout {
    let Some(labels) = first_row else {
        return ColumnLayout::Positional;
    };

    if !has_known_labels(labels) {
        return ColumnLayout::Positional;
    }

    match (
        find_column(labels, STUDENT_ALIASES),
        find_column(labels, FILE_ALIASES),
    ) {
        (Some(student), Some(file)) => ColumnLayout::Headered { student, file },
        _ => ColumnLayout::Positional,
    }
}
