//! XML読み込み
//!
//! 整形式であることを検証し、ルート要素をそのままの文字列で返す。
//! XML宣言やルート外のコメントは含めない。

use crate::error::{CompareError, Result};
use roxmltree::{Document, ParsingOptions};

pub(super) fn to_text(bytes: &[u8]) -> Result<String> {
    let source = std::str::from_utf8(bytes).map_err(|e| CompareError::format("XML", e))?;
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);

    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(source, options).map_err(|e| CompareError::format("XML", e))?;

    Ok(source[doc.root_element().range()].to_string())
}
