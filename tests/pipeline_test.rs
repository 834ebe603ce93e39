//! 読み込み〜比較の統合テスト

mod support;

use indicatif::ProgressBar;
use param_compare::error::CompareError;
use param_compare::pipeline::{compare_paths, run_comparison};
use param_compare::reader::{scan_folder, SourceDocument};
use param_compare_common::{CellValue, ExtractionSource, NullTagger, RowFilter, RuleTagger};
use tempfile::tempdir;

fn weight_documents() -> Vec<SourceDocument> {
    vec![
        SourceDocument::new("a.xlsx", support::xlsx(&["Weight: 120kg"])),
        SourceDocument::new("b.docx", support::docx(&["Weight: 120 kg"])),
        SourceDocument::new("c.XML", support::xml("Weight: 125kg")),
    ]
}

#[test]
fn test_mixed_formats_weight_scenario() {
    let run = run_comparison(&weight_documents(), &NullTagger, &ProgressBar::hidden()).unwrap();

    assert_eq!(run.document_names(), vec!["a.xlsx", "b.docx", "c.XML"]);
    assert!(run.documents.iter().all(|d| d.source == ExtractionSource::RegexFallback));

    let row = run.table.get("Weight").unwrap();
    assert_eq!(
        row.values,
        vec![
            CellValue::Value("120kg".into()),
            CellValue::Value("120 kg".into()),
            CellValue::Value("125kg".into()),
        ]
    );
    assert_eq!(row.confidence, 0.9);
    assert!(row.is_match);
}

#[test]
fn test_unsupported_file_is_reported_not_fatal() {
    let mut docs = weight_documents();
    docs.insert(1, SourceDocument::new("notes.txt", b"Weight: 1kg".to_vec()));

    let run = run_comparison(&docs, &NullTagger, &ProgressBar::hidden()).unwrap();
    assert_eq!(run.table.document_count(), 3);
    assert_eq!(run.failures.len(), 1);
    assert_eq!(run.failures[0].file_name, "notes.txt");
}

#[test]
fn test_single_valid_document_is_insufficient() {
    let docs = vec![
        SourceDocument::new("a.docx", support::docx(&["Weight: 120kg"])),
        SourceDocument::new("b.pdf", b"%PDF-broken".to_vec()),
    ];
    let err = run_comparison(&docs, &NullTagger, &ProgressBar::hidden()).unwrap_err();
    match err {
        CompareError::InsufficientDocuments { processed, failures } => {
            assert_eq!(processed, 1);
            assert_eq!(failures[0].file_name, "b.pdf");
        }
        other => panic!("Expected InsufficientDocuments, got {:?}", other),
    }
}

#[test]
fn test_missing_parameter_row() {
    let docs = vec![
        SourceDocument::new("a.xml", support::xml("Color: red")),
        SourceDocument::new("b.xml", support::xml("Finish: matte")),
    ];
    let run = run_comparison(&docs, &NullTagger, &ProgressBar::hidden()).unwrap();

    let keys: Vec<&str> = run.table.rows().iter().map(|r| r.parameter.as_str()).collect();
    assert_eq!(keys, vec!["Color", "Finish"]);

    let finish = run.table.get("Finish").unwrap();
    assert_eq!(finish.values[0], CellValue::Missing);
    assert!(!finish.is_match);

    let view = RowFilter::new(true, None).apply(&run.table);
    assert_eq!(view.len(), 2);
}

#[test]
fn test_rule_tagger_entities() {
    let docs = vec![
        SourceDocument::new("a.xml", support::xml("Issued 2024-01-05")),
        SourceDocument::new("b.docx", support::docx(&["Issued 2024-01-05"])),
    ];
    let run = run_comparison(&docs, &RuleTagger::new(), &ProgressBar::hidden()).unwrap();

    assert!(run.documents.iter().all(|d| d.source == ExtractionSource::Entities));
    let row = run.table.get("2024-01-05").unwrap();
    assert_eq!(row.values, vec![CellValue::Value("DATE".into()), CellValue::Value("DATE".into())]);
    assert_eq!(row.confidence, 1.0);
}

#[test]
fn test_documents_from_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("b.docx"), support::docx(&["Torque: 300 Nm"])).unwrap();
    std::fs::write(dir.path().join("a.xml"), support::xml("Torque: 300 Nm")).unwrap();
    std::fs::write(dir.path().join("readme.txt"), "Torque: 1 Nm").unwrap();

    let docs: Vec<SourceDocument> = scan_folder(dir.path())
        .unwrap()
        .iter()
        .map(|p| SourceDocument::from_path(p).unwrap())
        .collect();
    assert_eq!(docs.len(), 2);

    let run = run_comparison(&docs, &NullTagger, &ProgressBar::hidden()).unwrap();
    assert_eq!(run.document_names(), vec!["a.xml", "b.docx"]);
    let row = run.table.get("Torque").unwrap();
    assert_eq!(row.values[0], CellValue::Value("300 Nm".into()));
    assert_eq!(row.confidence, 1.0);
}

#[test]
fn test_missing_path_is_a_file_failure() {
    let dir = tempdir().expect("Failed to create temp dir");
    let a = dir.path().join("a.xml");
    let b = dir.path().join("b.docx");
    std::fs::write(&a, support::xml("Weight: 120kg")).unwrap();
    std::fs::write(&b, support::docx(&["Weight: 120kg"])).unwrap();
    let missing = dir.path().join("missing.pdf");

    let paths = vec![a, missing, b];
    let run = compare_paths(&paths, &NullTagger, &ProgressBar::hidden()).unwrap();

    assert_eq!(run.document_names(), vec!["a.xml", "b.docx"]);
    assert_eq!(run.failures.len(), 1);
    assert_eq!(run.failures[0].file_name, "missing.pdf");
    assert!(run.failures[0].reason.contains("ファイルが見つかりません"));
    assert_eq!(run.table.get("Weight").unwrap().confidence, 1.0);
}
