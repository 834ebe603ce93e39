//! 外部タガー出力パーサー
//!
//! 外部コマンドの標準出力からJSONを抽出し、タグ付きスパンの配列として
//! パースする

use crate::error::{Error, Result};
use crate::tagger::TaggedSpan;
use std::collections::HashMap;

/// 出力からJSON部分を抽出
///
/// 抽出優先順位:
/// 1. ```json ... ``` ブロック
/// 2. 生の [...] 配列
/// 3. エラー
///
/// # Examples
/// ```
/// use param_compare_common::extract_json;
///
/// let response = "entities: [{\"text\": \"5 kg\", \"label\": \"QUANTITY\"}]";
/// let json = extract_json(response).unwrap();
/// assert!(json.starts_with('['));
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    // ```json ... ``` ブロックを探す
    if let Some(start_marker) = response.find("```json") {
        let start = start_marker + 7; // "```json" の長さ
        if let Some(end_offset) = response[start..].find("```") {
            let end = start + end_offset;
            return Ok(response[start..end].trim());
        }
    }

    // 生の [...] を探す
    if let Some(start) = response.find('[') {
        if let Some(end) = response.rfind(']') {
            if end >= start {
                return Ok(&response[start..=end]);
            }
        }
    }

    Err(Error::Parse("JSONが見つかりません".into()))
}

/// タガー出力をパースし、ラベルを対応表で置き換える
///
/// # Arguments
/// * `response` - 外部タガーの標準出力
/// * `label_map` - 外部ラベル → 正規カテゴリ名（対応がなければそのまま）
pub fn parse_tagger_response(response: &str, label_map: &HashMap<String, String>) -> Result<Vec<TaggedSpan>> {
    let json_str = extract_json(response)?;
    let spans: Vec<TaggedSpan> = serde_json::from_str(json_str.trim())
        .map_err(|e| Error::Parse(format!("タガー出力のJSONパースエラー: {}", e)))?;

    Ok(spans
        .into_iter()
        .map(|span| match label_map.get(&span.label) {
            Some(mapped) => TaggedSpan::new(span.text, mapped.clone()),
            None => span,
        })
        .collect())
}
