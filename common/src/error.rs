//! エラー型定義

use thiserror::Error;

/// 抽出処理のエラー
#[derive(Error, Debug)]
pub enum Error {
    /// タガー出力などの解釈に失敗
    #[error("解析エラー: {0}")]
    Parse(String),

    /// タガーの実行に失敗（起動失敗・異常終了・タイムアウト）
    #[error("タガーエラー: {0}")]
    Tagger(String),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_tagger_response;
    use std::collections::HashMap;

    #[test]
    fn test_parse_error_from_tagger_output() {
        let err = parse_tagger_response("no json here", &HashMap::new()).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().starts_with("解析エラー"));
    }

    #[test]
    fn test_tagger_error_display() {
        let err = Error::Tagger("5秒以内に終了しませんでした".to_string());
        assert_eq!(err.to_string(), "タガーエラー: 5秒以内に終了しませんでした");
    }

    #[test]
    fn test_io_conversion_with_question_mark() {
        fn open_missing() -> Result<String> {
            Ok(std::fs::read_to_string("/nonexistent/param-compare/input.txt")?)
        }
        assert!(matches!(open_missing(), Err(Error::Io(_))));
    }
}
