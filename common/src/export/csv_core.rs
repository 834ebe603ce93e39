//! CSV生成（共通ライブラリ）
//!
//! 列順: Parameter, Doc 1..Doc N, Confidence, Match
//! 欠損セルは欠損ラベル、信頼度は丸め済みの値をそのまま書き出す。

use crate::types::TableView;
use std::borrow::Cow;

/// RFC 4180 形式でフィールドをクォート
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn write_record<'a>(out: &mut String, fields: impl IntoIterator<Item = Cow<'a, str>>) {
    let line = fields
        .into_iter()
        .map(|f| escape_field(&f).into_owned())
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&line);
    out.push_str("\r\n");
}

/// 比較表をCSV文字列に変換
pub fn generate_csv(view: &TableView) -> String {
    let mut out = String::new();
    write_record(&mut out, view.headers().into_iter().map(Cow::Owned));

    for row in &view.rows {
        let mut fields: Vec<Cow<'_, str>> = Vec::with_capacity(view.document_count + 3);
        fields.push(Cow::Borrowed(row.parameter.as_str()));
        fields.extend(row.values.iter().map(|v| Cow::Borrowed(v.as_str())));
        fields.push(Cow::Owned(row.confidence.to_string()));
        fields.push(Cow::Owned(row.is_match.to_string()));
        write_record(&mut out, fields);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aligner::compare_documents;
    use crate::types::ParameterMap;

    fn map(pairs: &[(&str, &str)]) -> ParameterMap {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("1,200"), "\"1,200\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("a\nb"), "\"a\nb\"");
    }

    #[test]
    fn test_generate_csv() {
        let table = compare_documents(&[
            map(&[("Weight", "120kg"), ("Price", "$1,200")]),
            map(&[("Weight", "120kg")]),
        ]);
        let csv = generate_csv(&table.view());
        let lines: Vec<&str> = csv.split("\r\n").collect();

        assert_eq!(lines[0], "Parameter,Doc 1,Doc 2,Confidence,Match");
        assert_eq!(lines[1], "Price,\"$1,200\",❌ Missing,0.5,false");
        assert_eq!(lines[2], "Weight,120kg,120kg,1,true");
        assert_eq!(lines[3], "");
    }

    #[test]
    fn test_generate_csv_empty_view() {
        let table = compare_documents(&[ParameterMap::new(), ParameterMap::new()]);
        assert_eq!(generate_csv(&table.view()), "Parameter,Doc 1,Doc 2,Confidence,Match\r\n");
    }
}
