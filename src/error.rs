use crate::pipeline::FileFailure;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("未対応のファイル形式です: {0}（対応形式: PDF, DOCX, XLSX, XML）")]
    UnsupportedFormat(String),

    #[error("{format}として読み込めません: {reason}")]
    Format { format: String, reason: String },

    #[error("タガー実行エラー: {0}")]
    Tagger(String),

    #[error("比較には2件以上の文書が必要です（処理成功: {processed}件）")]
    InsufficientDocuments {
        processed: usize,
        failures: Vec<FileFailure>,
    },

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error(transparent)]
    Common(#[from] param_compare_common::Error),
}

impl CompareError {
    pub fn format(format: impl std::fmt::Display, reason: impl std::fmt::Display) -> Self {
        CompareError::Format {
            format: format.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompareError>;
