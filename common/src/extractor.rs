//! パラメータ抽出
//!
//! 1. エンティティタガーで数量・日付などのスパンを検出（スパン → カテゴリ名）
//! 2. 1件も見つからなければ「キー: 値」形式の正規表現フォールバック
//!
//! フォールバックは全件置き換えで、タガーの結果とマージしない。

use crate::error::Result;
use crate::tagger::{EntityCategory, EntityTagger};
use crate::types::ParameterMap;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// 抽出結果の出どころ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtractionSource {
    /// タガーが検出したエンティティ
    Entities,
    /// 正規表現フォールバック
    RegexFallback,
    /// どちらでも見つからなかった
    Empty,
}

impl fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractionSource::Entities => write!(f, "エンティティ"),
            ExtractionSource::RegexFallback => write!(f, "正規表現"),
            ExtractionSource::Empty => write!(f, "なし"),
        }
    }
}

/// 抽出結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    pub source: ExtractionSource,
    pub parameters: ParameterMap,
}

lazy_static::lazy_static! {
    // キー（最短一致）、区切り ":" or "-"、値（英数字・ドット・%・空白）
    static ref KEY_VALUE_RE: Regex = Regex::new(r"([\w\s]+?)\s*[:\-]\s*([\w\d\.\%\s]+)").unwrap();
}

/// タガーで検出したエンティティをパラメータ化する
///
/// 採用カテゴリ以外のスパンは無視。同じスパンが複数回出たら後勝ち。
pub fn extract_entity_parameters(text: &str, tagger: &dyn EntityTagger) -> Result<ParameterMap> {
    let mut parameters = ParameterMap::new();
    for span in tagger.tag(text)? {
        if let Some(category) = EntityCategory::from_label(&span.label) {
            parameters.insert(span.text, category.label().to_string());
        }
    }
    Ok(parameters)
}

/// 「キー: 値」「キー - 値」形式の抽出
///
/// 前後の空白を除去し、どちらかが空になった組は捨てる。同じキーは後勝ち。
pub fn regex_fallback(text: &str) -> ParameterMap {
    let mut parameters = ParameterMap::new();
    for cap in KEY_VALUE_RE.captures_iter(text) {
        let key = cap[1].trim();
        let value = cap[2].trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        parameters.insert(key.to_string(), value.to_string());
    }
    parameters
}

/// パラメータを抽出し、どの方式で得たかも返す
pub fn extract_with_source(text: &str, tagger: &dyn EntityTagger) -> Result<Extraction> {
    let parameters = extract_entity_parameters(text, tagger)?;
    if !parameters.is_empty() {
        return Ok(Extraction {
            source: ExtractionSource::Entities,
            parameters,
        });
    }

    let parameters = regex_fallback(text);
    let source = if parameters.is_empty() {
        ExtractionSource::Empty
    } else {
        ExtractionSource::RegexFallback
    };
    Ok(Extraction { source, parameters })
}

/// テキストからパラメータを抽出
///
/// 何も見つからない場合は空のマップ（エラーではない）。
pub fn extract_parameters(text: &str, tagger: &dyn EntityTagger) -> Result<ParameterMap> {
    extract_with_source(text, tagger).map(|e| e.parameters)
}
