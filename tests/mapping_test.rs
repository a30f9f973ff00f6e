mod common;

use common::{create_test_dir, write_csv, write_xlsx};
use parecer_daemon::mapping::{load, load_mapping, ColumnLayout, MappingEntry, MappingError};
use std::path::Path;

fn pairs(entries: &[MappingEntry]) -> Vec<(&str, &str)> {
    entries
        .iter()
        .map(|e| (e.student.as_str(), e.file_ref.as_str()))
        .collect()
}

// ============ Header detection ============

#[test]
fn test_headerless_xlsx_uses_columns_a_and_b() {
    let temp_dir = create_test_dir();
    let path = write_xlsx(
        temp_dir.path(),
        "map.xlsx",
        &[&["Ana", "a1.pdf,a2.pdf"], &["Bruno", "http://x/doc"]],
    );

    let mapping = load_mapping(&path, None).expect("Should load");
    assert_eq!(mapping.layout, ColumnLayout::Positional);
    assert_eq!(
        pairs(&mapping.entries),
        vec![("Ana", "a1.pdf"), ("Ana", "a2.pdf"), ("Bruno", "http://x/doc")]
    );
}

#[test]
fn test_headered_xlsx_with_swapped_columns() {
    let temp_dir = create_test_dir();
    let path = write_xlsx(
        temp_dir.path(),
        "map.xlsx",
        &[
            &["Turma", "Arquivo do Parecer", "Nome do Aluno"],
            &["A", "ana.pdf", "Ana"],
            &["B", "bruno.pdf", "Bruno"],
        ],
    );

    let mapping = load_mapping(&path, None).expect("Should load");
    assert_eq!(mapping.layout, ColumnLayout::Headered { student: 2, file: 1 });
    assert_eq!(
        pairs(&mapping.entries),
        vec![("Ana", "ana.pdf"), ("Bruno", "bruno.pdf")]
    );
}

#[test]
fn test_partial_header_falls_back_to_positional() {
    let temp_dir = create_test_dir();
    let path = write_xlsx(
        temp_dir.path(),
        "map.xlsx",
        &[&["Aluno", "Link"], &["Ana", "a.pdf"]],
    );

    let mapping = load_mapping(&path, None).expect("Should load");
    assert_eq!(mapping.layout, ColumnLayout::Positional);
    // The label row is read back as data
    assert_eq!(
        pairs(&mapping.entries),
        vec![("Aluno", "Link"), ("Ana", "a.pdf")]
    );
}

#[test]
fn test_used_range_starting_at_column_b_stays_anchored() {
    let temp_dir = create_test_dir();
    let path = write_xlsx(
        temp_dir.path(),
        "map.xlsx",
        &[&["", "Ana", "a.pdf"]],
    );

    let entries = load(&path).expect("Should load");
    // Column A is empty, so every row lacks a student
    assert!(entries.is_empty());
}

// ============ Cell normalization ============

#[test]
fn test_nan_cells_produce_no_entries() {
    let temp_dir = create_test_dir();
    let path = write_xlsx(
        temp_dir.path(),
        "map.xlsx",
        &[&["Ana", "nan"], &["Bruno", "NAN"], &["Carla", "c.pdf"]],
    );

    let entries = load(&path).expect("Should load");
    assert_eq!(pairs(&entries), vec![("Carla", "c.pdf")]);
}

#[test]
fn test_all_separators_split_the_same_way() {
    let temp_dir = create_test_dir();
    let path = write_xlsx(
        temp_dir.path(),
        "map.xlsx",
        &[
            &["Ana", "a.pdf,b.pdf"],
            &["Bruno", "a.pdf; b.pdf"],
            &["Carla", "a.pdf|b.pdf"],
        ],
    );

    let entries = load(&path).expect("Should load");
    for student in ["Ana", "Bruno", "Carla"] {
        let refs: Vec<&str> = entries
            .iter()
            .filter(|e| e.student == student)
            .map(|e| e.file_ref.as_str())
            .collect();
        assert_eq!(refs, vec!["a.pdf", "b.pdf"], "student {student}");
    }
}

#[test]
fn test_duplicate_rows_collapse() {
    let temp_dir = create_test_dir();
    let path = write_csv(
        temp_dir.path(),
        "map.csv",
        "Aluno,Parecer\nAna,a.pdf\nAna,a.pdf\nAna,\"a.pdf;b.pdf\"\n",
    );

    let entries = load(&path).expect("Should load");
    assert_eq!(pairs(&entries), vec![("Ana", "a.pdf"), ("Ana", "b.pdf")]);
}

#[test]
fn test_semicolon_csv_is_sniffed() {
    let temp_dir = create_test_dir();
    let path = write_csv(
        temp_dir.path(),
        "map.csv",
        "Discente;PDF\nAna;a.pdf\nBruno;b.pdf\n",
    );

    let mapping = load_mapping(&path, None).expect("Should load");
    assert_eq!(mapping.layout, ColumnLayout::Headered { student: 0, file: 1 });
    assert_eq!(
        pairs(&mapping.entries),
        vec![("Ana", "a.pdf"), ("Bruno", "b.pdf")]
    );
}

#[test]
fn test_semicolon_csv_with_comma_separated_files() {
    let temp_dir = create_test_dir();
    let path = write_csv(
        temp_dir.path(),
        "map.csv",
        "Ana;a1.pdf,a2.pdf\nBruno;b1.pdf,b2.pdf\n",
    );

    let entries = load(&path).expect("Should load");
    assert_eq!(
        pairs(&entries),
        vec![
            ("Ana", "a1.pdf"),
            ("Ana", "a2.pdf"),
            ("Bruno", "b1.pdf"),
            ("Bruno", "b2.pdf"),
        ]
    );
}

#[test]
fn test_tsv_with_comma_separated_files() {
    let temp_dir = create_test_dir();
    let path = write_csv(
        temp_dir.path(),
        "map.tsv",
        "Ana\ta1.pdf,a2.pdf\nBruno\tb1.pdf,b2.pdf\n",
    );

    let entries = load(&path).expect("Should load");
    assert_eq!(
        pairs(&entries),
        vec![
            ("Ana", "a1.pdf"),
            ("Ana", "a2.pdf"),
            ("Bruno", "b1.pdf"),
            ("Bruno", "b2.pdf"),
        ]
    );
}

// ============ Idempotence ============

#[test]
fn test_load_is_idempotent() {
    let temp_dir = create_test_dir();
    let path = write_xlsx(
        temp_dir.path(),
        "map.xlsx",
        &[
            &["Aluno", "Arquivo"],
            &["Ana", "a1.pdf | a2.pdf"],
            &["Bruno", "https://example.com/b.pdf"],
        ],
    );

    let first = load(&path).expect("Should load");
    let second = load(&path).expect("Should load again");
    assert_eq!(first, second);
}

// ============ Errors ============

#[test]
fn test_missing_source_is_not_found() {
    let result = load(Path::new("/nonexistent/pareceres_recebidos.xlsx"));
    assert!(matches!(result, Err(MappingError::SourceNotFound(_))));
}

#[test]
fn test_garbage_workbook_is_unreadable() {
    let temp_dir = create_test_dir();
    let path = temp_dir.path().join("map.xlsx");
    std::fs::write(&path, b"this is not a zip archive").unwrap();

    let result = load(&path);
    assert!(matches!(result, Err(MappingError::SourceUnreadable(_))));
}

#[test]
fn test_unknown_extension_is_unreadable() {
    let temp_dir = create_test_dir();
    let path = temp_dir.path().join("map.docx");
    std::fs::write(&path, b"Ana,a.pdf").unwrap();

    let result = load(&path);
    assert!(matches!(result, Err(MappingError::SourceUnreadable(_))));
}

#[test]
fn test_empty_csv_loads_no_entries() {
    let temp_dir = create_test_dir();
    let path = write_csv(temp_dir.path(), "map.csv", "");

    let entries = load(&path).expect("Empty source is still a table");
    assert!(entries.is_empty());
}
