//! PDF読み込み
//!
//! 全ページのテキストをページ順に連結する。テキスト層のないページ（画像のみ）は
//! 空文字として扱う。

use crate::error::{CompareError, Result};
use lopdf::Document;

pub(super) fn to_text(bytes: &[u8]) -> Result<String> {
    let document = Document::load_mem(bytes).map_err(|e| CompareError::format("PDF", e))?;

    let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
    if page_numbers.is_empty() {
        return Ok(String::new());
    }

    let mut text = String::new();
    for page in page_numbers {
        match document.extract_text(&[page]) {
            Ok(page_text) => text.push_str(&page_text),
            Err(e) => tracing::debug!("PDF {}ページ目のテキスト抽出をスキップ: {}", page, e),
        }
    }
    Ok(text)
}
