//! 比較データの型定義
//!
//! - ParameterMap: 1文書から抽出したパラメータ
//! - CellValue: 比較表の1セル（値 or 欠損）
//! - ComparisonRow / ComparisonTable: 比較結果
//! - TableView: フィルタ適用後の表示用ビュー

use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// 欠損セルの表示ラベル
///
/// 類似度計算にもこの文字列がそのまま使われる。
pub const MISSING_LABEL: &str = "❌ Missing";

/// パラメータ名 → 値
///
/// 同一テキストに対して反復順序が決定的になるよう BTreeMap を使う。
pub type ParameterMap = BTreeMap<String, String>;

/// 比較表のセル
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellValue {
    /// 文書から抽出された値（空文字列もここに入る）
    Value(String),
    /// 文書にそのパラメータが存在しない
    Missing,
}

impl CellValue {
    /// 表示・類似度計算用の文字列
    pub fn as_str(&self) -> &str {
        match self {
            CellValue::Value(v) => v,
            CellValue::Missing => MISSING_LABEL,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSONでは欠損を null として出力する
impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            CellValue::Value(v) => serializer.serialize_str(v),
            CellValue::Missing => serializer.serialize_none(),
        }
    }
}

/// 1パラメータの横断比較結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub parameter: String,
    /// 入力文書順の値（長さは常に文書数）
    pub values: Vec<CellValue>,
    /// 小数2桁に丸めた信頼度
    pub confidence: f64,
    #[serde(rename = "match")]
    pub is_match: bool,
}

/// 比較表（パラメータ名の辞書順）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonTable {
    document_count: usize,
    rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub(crate) fn new(document_count: usize, rows: Vec<ComparisonRow>) -> Self {
        Self { document_count, rows }
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    pub fn rows(&self) -> &[ComparisonRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// パラメータ名で行を検索
    pub fn get(&self, parameter: &str) -> Option<&ComparisonRow> {
        self.rows
            .binary_search_by(|row| row.parameter.as_str().cmp(parameter))
            .ok()
            .map(|idx| &self.rows[idx])
    }

    pub fn match_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_match).count()
    }

    /// 全行のビュー
    pub fn view(&self) -> TableView<'_> {
        TableView {
            document_count: self.document_count,
            rows: self.rows.iter().collect(),
        }
    }
}

/// 表示・出力用のビュー（フィルタ済みの行参照）
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView<'a> {
    pub document_count: usize,
    pub rows: Vec<&'a ComparisonRow>,
}

impl TableView<'_> {
    /// 出力列: [Parameter, Doc 1..Doc N, Confidence, Match]
    pub fn headers(&self) -> Vec<String> {
        let mut headers = Vec::with_capacity(self.document_count + 3);
        headers.push("Parameter".to_string());
        headers.extend((1..=self.document_count).map(|i| format!("Doc {}", i)));
        headers.push("Confidence".to_string());
        headers.push("Match".to_string());
        headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
