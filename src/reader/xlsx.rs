//! XLSX読み込み
//!
//! 全シートを順に走査し、空でないセルの値を1セル1行で連結する。
//! 空セル・0・FALSE・空文字は読み飛ばす。

use crate::error::{CompareError, Result};
use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use std::io::Cursor;

pub(super) fn to_text(bytes: &[u8]) -> Result<String> {
    let mut workbook: Xlsx<_> =
        open_workbook_from_rs(Cursor::new(bytes)).map_err(|e| CompareError::format("XLSX", e))?;

    let mut text = String::new();
    for sheet in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| CompareError::format("XLSX", format!("{}: {}", sheet, e)))?;

        for row in range.rows() {
            for cell in row {
                if let Some(value) = cell_text(cell) {
                    text.push_str(&value);
                    text.push('\n');
                }
            }
        }
    }
    Ok(text)
}

/// セルの表示文字列（読み飛ばす値は None）
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) if s.is_empty() => None,
        Data::Int(0) => None,
        Data::Float(f) if *f == 0.0 => None,
        Data::Bool(false) => None,
        Data::Bool(true) => Some("True".to_string()),
        Data::DateTime(dt) => Some(
            dt.as_datetime()
                .map(|d| d.to_string())
                .unwrap_or_else(|| dt.as_f64().to_string()),
        ),
        other => Some(other.to_string()),
    }
}
