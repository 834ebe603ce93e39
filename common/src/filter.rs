//! 比較結果の絞り込み
//!
//! 比較表そのものは変更せず、条件に合う行の参照だけを集める。

use crate::types::{ComparisonRow, ComparisonTable, TableView};

/// 行フィルタ
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    /// 不一致行のみ
    pub only_mismatches: bool,
    /// パラメータ名の部分一致（大文字小文字を区別しない）
    pub search: Option<String>,
}

impl RowFilter {
    pub fn new(only_mismatches: bool, search: Option<String>) -> Self {
        let search = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        Self { only_mismatches, search }
    }

    pub fn is_active(&self) -> bool {
        self.only_mismatches || self.search.is_some()
    }

    pub fn matches(&self, row: &ComparisonRow) -> bool {
        if self.only_mismatches && row.is_match {
            return false;
        }
        match &self.search {
            Some(needle) => row.parameter.to_lowercase().contains(needle.as_str()),
            None => true,
        }
    }

    pub fn apply<'a>(&self, table: &'a ComparisonTable) -> TableView<'a> {
        TableView {
            document_count: table.document_count(),
            rows: table.rows().iter().filter(|r| self.matches(r)).collect(),
        }
    }
}
