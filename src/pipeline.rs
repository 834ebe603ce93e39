//! 比較パイプライン
//!
//! 文書ごとの処理（形式判定 → テキスト化 → パラメータ抽出）を rayon で並列に
//! 実行し、入力順に戻してから比較表を作る。失敗した文書は理由付きで集め、
//! 成功が2件未満のときだけ全体を失敗にする。

use crate::error::{CompareError, Result};
use crate::reader::SourceDocument;
use indicatif::ProgressBar;
use param_compare_common::{
    compare_documents, extract_with_source, ComparisonTable, EntityTagger, ExtractionSource, ParameterMap,
};
use rayon::prelude::*;
use serde::Serialize;
use std::path::PathBuf;

/// 比較に必要な最小文書数
pub const MIN_DOCUMENTS: usize = 2;

/// 処理できなかった文書
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFailure {
    pub file_name: String,
    pub reason: String,
}

/// 抽出まで終えた文書
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedDocument {
    pub file_name: String,
    pub source: ExtractionSource,
    pub parameters: ParameterMap,
}

/// 比較結果一式
#[derive(Debug, Clone)]
pub struct ComparisonRun {
    /// 比較に使った文書（Doc 1..Doc N の順）
    pub documents: Vec<ProcessedDocument>,
    pub table: ComparisonTable,
    pub failures: Vec<FileFailure>,
}

impl ComparisonRun {
    pub fn document_names(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.file_name.clone()).collect()
    }
}

/// 1文書を処理
pub fn process_document(document: &SourceDocument, tagger: &dyn EntityTagger) -> Result<ProcessedDocument> {
    let format = document.format()?;
    let text = format.to_text(&document.bytes)?;
    tracing::debug!("{} ({}): {}文字", document.file_name, format, text.chars().count());

    let extraction = extract_with_source(&text, tagger).map_err(|e| match e {
        param_compare_common::Error::Tagger(msg) => CompareError::Tagger(msg),
        other => CompareError::Common(other),
    })?;

    match extraction.source {
        ExtractionSource::RegexFallback => {
            tracing::info!("{}: エンティティなし、正規表現フォールバックを使用", document.file_name)
        }
        ExtractionSource::Empty => tracing::info!("{}: パラメータが見つかりません", document.file_name),
        ExtractionSource::Entities => {}
    }

    Ok(ProcessedDocument {
        file_name: document.file_name.clone(),
        source: extraction.source,
        parameters: extraction.parameters,
    })
}

/// 複数文書を比較
///
/// 失敗した文書は `failures` に入り、比較からは除外される。
pub fn run_comparison(
    documents: &[SourceDocument],
    tagger: &dyn EntityTagger,
    progress: &ProgressBar,
) -> Result<ComparisonRun> {
    let results: Vec<(String, Result<ProcessedDocument>)> = documents
        .par_iter()
        .map(|doc| {
            let result = process_document(doc, tagger);
            progress.inc(1);
            (doc.file_name.clone(), result)
        })
        .collect();

    collect_run(results)
}

/// パスから読み込んで比較
///
/// 存在しない・読めないファイルも他の失敗と同じく `failures` に入る。
pub fn compare_paths(paths: &[PathBuf], tagger: &dyn EntityTagger, progress: &ProgressBar) -> Result<ComparisonRun> {
    let results: Vec<(String, Result<ProcessedDocument>)> = paths
        .par_iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());
            let result = SourceDocument::from_path(path).and_then(|doc| process_document(&doc, tagger));
            progress.inc(1);
            (name, result)
        })
        .collect();

    collect_run(results)
}

/// 入力順の処理結果から比較表を作る
fn collect_run(results: Vec<(String, Result<ProcessedDocument>)>) -> Result<ComparisonRun> {
    let mut processed = Vec::new();
    let mut failures = Vec::new();
    for (file_name, result) in results {
        match result {
            Ok(p) => processed.push(p),
            Err(e) => {
                tracing::warn!("{} をスキップ: {}", file_name, e);
                failures.push(FileFailure {
                    file_name,
                    reason: e.to_string(),
                });
            }
        }
    }

    if processed.len() < MIN_DOCUMENTS {
        return Err(CompareError::InsufficientDocuments {
            processed: processed.len(),
            failures,
        });
    }

    let maps: Vec<ParameterMap> = processed.iter().map(|p| p.parameters.clone()).collect();
    let table = compare_documents(&maps);
    tracing::debug!("比較表: {}行 x {}文書", table.len(), table.document_count());

    Ok(ComparisonRun {
        documents: processed,
        table,
        failures,
    })
}
