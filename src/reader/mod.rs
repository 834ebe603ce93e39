//! 文書読み込み
//!
//! ファイル形式ごとのアダプタでバイト列をプレーンテキストに変換する。
//! 形式は拡張子（大文字小文字を区別しない）で判定する。

mod docx;
mod pdf;
mod xlsx;
mod xml;

use crate::error::{CompareError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 対応形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Xlsx,
    Xml,
}

pub const SUPPORTED_EXTENSIONS: &[&str] = &["pdf", "docx", "xlsx", "xml"];

impl DocumentFormat {
    /// ファイル名の拡張子から形式を判定
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let ext = Path::new(file_name).extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentFormat::Pdf),
            "docx" => Some(DocumentFormat::Docx),
            "xlsx" => Some(DocumentFormat::Xlsx),
            "xml" => Some(DocumentFormat::Xml),
            _ => None,
        }
    }

    /// バイト列をテキストに変換
    pub fn to_text(&self, bytes: &[u8]) -> Result<String> {
        match self {
            DocumentFormat::Pdf => pdf::to_text(bytes),
            DocumentFormat::Docx => docx::to_text(bytes),
            DocumentFormat::Xlsx => xlsx::to_text(bytes),
            DocumentFormat::Xml => xml::to_text(bytes),
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Pdf => write!(f, "PDF"),
            DocumentFormat::Docx => write!(f, "DOCX"),
            DocumentFormat::Xlsx => write!(f, "XLSX"),
            DocumentFormat::Xml => write!(f, "XML"),
        }
    }
}

/// 名前付きバイト列（比較対象の1文書）
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(CompareError::FileNotFound(path.display().to_string()));
        }
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn format(&self) -> Result<DocumentFormat> {
        DocumentFormat::from_file_name(&self.file_name)
            .ok_or_else(|| CompareError::UnsupportedFormat(self.file_name.clone()))
    }

    /// 形式を判定してテキストに変換
    pub fn to_text(&self) -> Result<String> {
        self.format()?.to_text(&self.bytes)
    }
}

/// フォルダ直下の対応文書を列挙（ファイル名順）
pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(CompareError::FolderNotFound(folder.display().to_string()));
    }

    let mut paths: Vec<PathBuf> = WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.file_name()
                .to_str()
                .and_then(DocumentFormat::from_file_name)
                .is_some()
        })
        .map(|e| e.into_path())
        .collect();

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}
