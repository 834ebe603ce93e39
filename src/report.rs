//! 端末向けの比較表表示

use crate::pipeline::{ComparisonRun, FileFailure};
use param_compare_common::{ParameterMap, TableView};
use std::fmt::Write;

/// 値列の最大表示幅（超えたら省略）
const MAX_CELL_WIDTH: usize = 24;

fn truncate(value: &str) -> String {
    if value.chars().count() <= MAX_CELL_WIDTH {
        value.to_string()
    } else {
        let head: String = value.chars().take(MAX_CELL_WIDTH - 1).collect();
        format!("{}…", head)
    }
}

fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    format!("{}{}", value, " ".repeat(width.saturating_sub(len)))
}

/// 信頼度を整数パーセントで表示
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.0}%", confidence * 100.0)
}

/// 比較表を文字列に整形
pub fn render_table(view: &TableView, document_names: &[String]) -> String {
    let mut out = String::new();

    for (idx, name) in document_names.iter().enumerate() {
        let _ = writeln!(out, "  Doc {} = {}", idx + 1, name);
    }
    out.push('\n');

    if view.is_empty() {
        out.push_str("  （該当するパラメータはありません）\n");
        return out;
    }

    let headers = view.headers();
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(view.len());
    for row in &view.rows {
        let mut cells = vec![truncate(&row.parameter)];
        cells.extend(row.values.iter().map(|v| truncate(v.as_str())));
        cells.push(format_confidence(row.confidence));
        cells.push(if row.is_match { "✔" } else { "✘" }.to_string());
        rows.push(cells);
    }

    let widths: Vec<usize> = (0..headers.len())
        .map(|col| {
            rows.iter()
                .map(|r| r[col].chars().count())
                .chain(std::iter::once(headers[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells.iter().zip(&widths).map(|(c, w)| pad(c, *w)).collect();
        format!("  {}", padded.join(" | ").trim_end())
    };

    let _ = writeln!(out, "{}", line(&headers));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "  {}", rule.join("-+-"));
    for cells in &rows {
        let _ = writeln!(out, "{}", line(cells));
    }
    out
}

/// 集計行
pub fn render_summary(run: &ComparisonRun, view: &TableView) -> String {
    let matches = view.rows.iter().filter(|r| r.is_match).count();
    let mut summary = format!(
        "{}文書 / {}パラメータ（一致 {} / 不一致 {}）",
        run.documents.len(),
        view.len(),
        matches,
        view.len() - matches
    );
    if view.len() != run.table.len() {
        let _ = write!(
            summary,
            " ※全{}件（一致 {}）から絞り込み",
            run.table.len(),
            run.table.match_count()
        );
    }
    summary
}

/// 処理できなかった文書の一覧
pub fn render_failures(failures: &[FileFailure]) -> String {
    let mut out = String::new();
    for failure in failures {
        let _ = writeln!(out, "  ✘ {}: {}", failure.file_name, failure.reason);
    }
    out
}

/// 抽出結果（extract コマンド）
pub fn render_parameters(parameters: &ParameterMap) -> String {
    let width = parameters.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for (key, value) in parameters {
        let _ = writeln!(out, "  {} : {}", pad(key, width), value);
    }
    out
}
