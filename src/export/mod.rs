//! 比較表の出力（CSV / Excel / JSON）

use crate::cli::ExportFormat;
use crate::error::{CompareError, Result};
use crate::pipeline::{ComparisonRun, FileFailure, ProcessedDocument};
use param_compare_common::export::csv_core::generate_csv;
use param_compare_common::export::excel_core::generate_excel_buffer;
use param_compare_common::{ComparisonRow, TableView};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_STEM: &str = "parameter_comparison";

/// 出力先パスを決める
///
/// ディレクトリまたは拡張子なしのパスなら `<dir>/parameter_comparison.<ext>`、
/// それ以外は指定パスそのもの。
pub fn output_path_for_format(output: &Path, extension: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.{}", DEFAULT_FILE_STEM, extension))
    } else {
        output.to_path_buf()
    }
}

/// 形式ごとの出力先（all のときは同じ stem で拡張子違い）
///
/// 単一形式で拡張子付きのパスが指定されたときは、拡張子に関係なく
/// 指定形式でそのパスに書き出す。
pub fn output_paths(output: &Path, format: ExportFormat) -> Vec<(ExportFormat, PathBuf)> {
    let formats = format.expand();
    if let [single] = formats {
        return vec![(*single, output_path_for_format(output, single.extension()))];
    }

    if output.is_dir() || output.extension().is_none() {
        formats
            .iter()
            .map(|f| (*f, output.join(format!("{}.{}", DEFAULT_FILE_STEM, f.extension()))))
            .collect()
    } else {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(DEFAULT_FILE_STEM);
        formats
            .iter()
            .map(|f| (*f, parent.join(format!("{}.{}", stem, f.extension()))))
            .collect()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    generated_at: String,
    documents: &'a [ProcessedDocument],
    failures: &'a [FileFailure],
    rows: &'a [&'a ComparisonRow],
}

pub fn write_csv(view: &TableView, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, generate_csv(view))?;
    Ok(())
}

pub fn write_excel(view: &TableView, document_names: &[String], path: &Path) -> Result<()> {
    let buffer = generate_excel_buffer(view, document_names).map_err(CompareError::ExcelGeneration)?;
    ensure_parent(path)?;
    std::fs::write(path, buffer)?;
    Ok(())
}

pub fn write_json(run: &ComparisonRun, view: &TableView, path: &Path) -> Result<()> {
    let report = JsonReport {
        generated_at: chrono::Local::now().to_rfc3339(),
        documents: &run.documents,
        failures: &run.failures,
        rows: &view.rows,
    };
    ensure_parent(path)?;
    std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// 指定形式で出力し、書き出したパスを返す
pub fn export_results(
    run: &ComparisonRun,
    view: &TableView,
    format: ExportFormat,
    output: &Path,
) -> Result<Vec<PathBuf>> {
    let targets = output_paths(output, format);
    let names = run.document_names();

    for (kind, path) in &targets {
        match kind {
            ExportFormat::Excel => {
                println!("- Excelを生成中...");
                write_excel(view, &names, path)?;
                println!("✔ Excel出力: {}", path.display());
            }
            ExportFormat::Json => {
                println!("- JSONを生成中...");
                write_json(run, view, path)?;
                println!("✔ JSON出力: {}", path.display());
            }
            ExportFormat::Csv | ExportFormat::All => {
                println!("- CSVを生成中...");
                write_csv(view, path)?;
                println!("✔ CSV出力: {}", path.display());
            }
        }
    }

    let paths = targets.into_iter().map(|(_, path)| path).collect();
    Ok(paths)
}
