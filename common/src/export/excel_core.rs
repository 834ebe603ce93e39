//! Excel生成（共通ライブラリ）
//!
//! 比較表シートと文書一覧シートを持つxlsxを生成する。
//! 信頼度は小数のまま格納し、表示形式 `0%` で整数パーセント表示にする。

use crate::types::TableView;
use rust_xlsxwriter::*;

const COMPARISON_SHEET: &str = "Comparison";
const DOCUMENTS_SHEET: &str = "Documents";

/// 不一致行の背景色
const MISMATCH_COLOR: u32 = 0xFFCCCC;

const PARAMETER_COL_WIDTH: f64 = 28.0;
const VALUE_COL_WIDTH: f64 = 22.0;

/// Excelをバッファに生成
///
/// # Arguments
/// * `view` - 出力する行
/// * `document_names` - Doc 1..Doc N に対応するファイル名
pub fn generate_excel_buffer(view: &TableView, document_names: &[String]) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    // フォーマット定義
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(0x004C97))
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin);

    let base_format = Format::new().set_border(FormatBorder::Hair);
    let mismatch_format = base_format
        .clone()
        .set_background_color(Color::RGB(MISMATCH_COLOR));
    let missing_format = base_format.clone().set_font_color(Color::RGB(0x999999));
    let missing_mismatch_format = mismatch_format.clone().set_font_color(Color::RGB(0x999999));
    let percent_format = base_format.clone().set_num_format("0%");
    let percent_mismatch_format = mismatch_format.clone().set_num_format("0%");

    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(COMPARISON_SHEET)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;

    // ヘッダー
    let headers = view.headers();
    for (col, header) in headers.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, header, &header_format)
            .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    }

    // 列幅
    worksheet
        .set_column_width(0, PARAMETER_COL_WIDTH)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;
    for col in 1..=view.document_count {
        worksheet
            .set_column_width(col as u16, VALUE_COL_WIDTH)
            .map_err(|e| format!("列幅設定エラー: {}", e))?;
    }
    worksheet
        .set_freeze_panes(1, 1)
        .map_err(|e| format!("ウィンドウ枠固定エラー: {}", e))?;

    let confidence_col = (view.document_count + 1) as u16;
    let match_col = confidence_col + 1;

    for (idx, row) in view.rows.iter().enumerate() {
        let excel_row = (idx + 1) as u32;
        let (text_format, missing, percent) = if row.is_match {
            (&base_format, &missing_format, &percent_format)
        } else {
            (&mismatch_format, &missing_mismatch_format, &percent_mismatch_format)
        };

        worksheet
            .write_string_with_format(excel_row, 0, &row.parameter, text_format)
            .map_err(|e| format!("パラメータ書き込みエラー: {}", e))?;

        for (doc_idx, value) in row.values.iter().enumerate() {
            let format = if value.is_missing() { missing } else { text_format };
            worksheet
                .write_string_with_format(excel_row, (doc_idx + 1) as u16, value.as_str(), format)
                .map_err(|e| format!("値書き込みエラー: {}", e))?;
        }

        worksheet
            .write_number_with_format(excel_row, confidence_col, row.confidence, percent)
            .map_err(|e| format!("信頼度書き込みエラー: {}", e))?;
        worksheet
            .write_boolean_with_format(excel_row, match_col, row.is_match, text_format)
            .map_err(|e| format!("一致判定書き込みエラー: {}", e))?;
    }

    // 文書一覧
    let documents = workbook.add_worksheet();
    documents
        .set_name(DOCUMENTS_SHEET)
        .map_err(|e| format!("シート名設定エラー: {}", e))?;
    documents
        .write_string_with_format(0, 0, "Column", &header_format)
        .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    documents
        .write_string_with_format(0, 1, "File", &header_format)
        .map_err(|e| format!("ヘッダー書き込みエラー: {}", e))?;
    documents
        .set_column_width(1, 48.0)
        .map_err(|e| format!("列幅設定エラー: {}", e))?;
    for (idx, name) in document_names.iter().enumerate() {
        let row = (idx + 1) as u32;
        documents
            .write_string(row, 0, format!("Doc {}", idx + 1))
            .map_err(|e| format!("文書一覧書き込みエラー: {}", e))?;
        documents
            .write_string(row, 1, name)
            .map_err(|e| format!("文書一覧書き込みエラー: {}", e))?;
    }

    // バッファに書き出し
    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel保存エラー: {}", e))
}
