//! 比較表の構築
//!
//! N件のパラメータマップを、全キーの和集合1行ずつの比較表にまとめる。
//!
//! ## 信頼度
//! 1文書目の値（欠損含む）を基準に、各文書の値との類似度を平均する。
//! 基準自身との比較（= 1.0）も平均に含める。
//!
//! ## 丸め
//! 小数2桁に丸めてから閾値と比較する。丸めは f64 が表す正確な2進値に
//! 対する最近接偶数丸め。`x * 100` の乗算誤差で境界の判定がずれないよう、
//! 候補の前後の境界 `(2k±1)/200` と整数演算で比べて補正する。

use crate::similarity::{similarity, DEFAULT_MATCH_THRESHOLD};
use crate::types::{CellValue, ComparisonRow, ComparisonTable, ParameterMap};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// 有限の非負 f64 を `mantissa * 2^exponent` に分解
fn decompose(value: f64) -> (u64, i32) {
    let bits = value.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i32;
    let fraction = bits & ((1u64 << 52) - 1);
    if exponent == 0 {
        (fraction, -1074)
    } else {
        (fraction | (1u64 << 52), exponent - 1075)
    }
}

/// `value` と境界 `odd / 200` を正確に比較する
fn cmp_with_tie(value: f64, odd: u64) -> Ordering {
    let (mantissa, exponent) = decompose(value);
    let lhs = 200u128 * mantissa as u128;
    let rhs = odd as u128;
    if exponent >= 0 {
        if exponent > 60 {
            return Ordering::Greater;
        }
        (lhs << exponent).cmp(&rhs)
    } else {
        let shift = exponent.unsigned_abs();
        match 1u128.checked_shl(shift).and_then(|scale| rhs.checked_mul(scale)) {
            Some(scaled) => lhs.cmp(&scaled),
            // 右辺が u128 に収まらないほど指数が小さい
            None => Ordering::Less,
        }
    }
}

fn even_of(a: u64, b: u64) -> u64 {
    if a % 2 == 0 {
        a
    } else {
        b
    }
}

/// 信頼度を小数2桁に丸める
pub fn round_confidence(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if value < 0.0 {
        return -round_confidence(-value);
    }

    // 候補は正解から高々1ずれる
    let mut k = (value * 100.0).round_ties_even() as u64;
    if k > 0 {
        match cmp_with_tie(value, 2 * k - 1) {
            Ordering::Less => k -= 1,
            Ordering::Equal => k = even_of(k - 1, k),
            Ordering::Greater => {}
        }
    }
    match cmp_with_tie(value, 2 * k + 1) {
        Ordering::Greater => k += 1,
        Ordering::Equal => k = even_of(k, k + 1),
        Ordering::Less => {}
    }

    k as f64 / 100.0
}

/// 1行分の信頼度（丸め前）
fn mean_similarity(values: &[CellValue]) -> f64 {
    let Some(baseline) = values.first() else {
        return 0.0;
    };
    let total: f64 = values
        .iter()
        .map(|v| similarity(baseline.as_str(), v.as_str()))
        .sum();
    total / values.len() as f64
}

/// 複数文書のパラメータを比較する
///
/// 行はパラメータ名の辞書順（大文字小文字を区別するコードポイント順）。
/// 入力順は各行の `values` の順序と基準値の選択に影響する。
pub fn compare_documents(maps: &[ParameterMap]) -> ComparisonTable {
    let keys: BTreeSet<&str> = maps
        .iter()
        .flat_map(|m| m.keys().map(String::as_str))
        .collect();

    let rows = keys
        .into_iter()
        .map(|key| {
            let values: Vec<CellValue> = maps
                .iter()
                .map(|m| match m.get(key) {
                    Some(v) => CellValue::Value(v.clone()),
                    None => CellValue::Missing,
                })
                .collect();

            let confidence = round_confidence(mean_similarity(&values));

            ComparisonRow {
                parameter: key.to_string(),
                values,
                confidence,
                is_match: confidence >= DEFAULT_MATCH_THRESHOLD,
            }
        })
        .collect();

    ComparisonTable::new(maps.len(), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MISSING_LABEL;

    fn map(pairs: &[(&str, &str)]) -> ParameterMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_single_document() {
        let m = map(&[("Weight", "120kg"), ("Length", "2 m")]);
        let table = compare_documents(std::slice::from_ref(&m));
        assert_eq!(table.document_count(), 1);
        assert_eq!(table.len(), 2);
        for row in table.rows() {
            assert_eq!(row.values, vec![CellValue::Value(m[&row.parameter].clone())]);
            assert_eq!(row.confidence, 1.0);
            assert!(row.is_match);
        }
    }

    #[test]
    fn test_missing_key_policy() {
        let table = compare_documents(&[map(&[("A", "10")]), ParameterMap::new()]);
        assert_eq!(table.len(), 1);

        let row = &table.rows()[0];
        assert_eq!(row.parameter, "A");
        assert_eq!(row.values, vec![CellValue::Value("10".into()), CellValue::Missing]);

        let expected = (similarity("10", "10") + similarity("10", MISSING_LABEL)) / 2.0;
        assert_eq!(row.confidence, round_confidence(expected));
        assert_eq!(row.confidence, 0.5);
        assert!(!row.is_match);
    }

    #[test]
    fn test_baseline_missing_in_first_document() {
        let table = compare_documents(&[ParameterMap::new(), map(&[("A", "10")]), map(&[("A", "10")])]);
        let row = table.get("A").unwrap();
        assert_eq!(row.values[0], CellValue::Missing);
        // 基準は欠損ラベル: (1.0 + 0.0 + 0.0) / 3
        assert_eq!(row.confidence, 0.33);
        assert!(!row.is_match);
    }

    #[test]
    fn test_weight_scenario() {
        let maps = [
            map(&[("Weight", "120kg")]),
            map(&[("Weight", "120 kg")]),
            map(&[("Weight", "125kg")]),
        ];
        let table = compare_documents(&maps);
        let row = table.get("Weight").unwrap();

        // 1.0, 10/11, 0.8 の平均 = 0.9030...
        assert_eq!(row.confidence, 0.9);
        assert!(row.is_match);
        assert_eq!(row.values.len(), 3);
    }

    #[test]
    fn test_case_sensitive_key_order() {
        let table = compare_documents(&[
            map(&[("Zeta", "1"), ("mid", "2")]),
            map(&[("Alpha", "3")]),
        ]);
        let keys: Vec<&str> = table.rows().iter().map(|r| r.parameter.as_str()).collect();
        assert_eq!(keys, vec!["Alpha", "Zeta", "mid"]);
    }

    #[test]
    fn test_values_length_matches_document_count() {
        let maps = [
            map(&[("A", "1")]),
            map(&[("B", "2")]),
            map(&[("C", "3")]),
            ParameterMap::new(),
        ];
        let table = compare_documents(&maps);
        assert_eq!(table.len(), 3);
        assert!(table.rows().iter().all(|r| r.values.len() == 4));
    }

    #[test]
    fn test_idempotent() {
        let maps = [
            map(&[("Weight", "120kg"), ("Date", "2024-01-05")]),
            map(&[("Weight", "121kg")]),
        ];
        assert_eq!(compare_documents(&maps), compare_documents(&maps));
    }

    #[test]
    fn test_no_documents() {
        let table = compare_documents(&[]);
        assert!(table.is_empty());
        assert_eq!(table.document_count(), 0);
    }

    #[test]
    fn test_round_confidence() {
        assert_eq!(round_confidence(0.903030), 0.9);
        assert_eq!(round_confidence(0.7951), 0.8);
        assert_eq!(round_confidence(0.7949), 0.79);
        // ちょうど中間は偶数側
        assert_eq!(round_confidence(0.125), 0.12);
        assert_eq!(round_confidence(0.375), 0.38);
    }

    #[test]
    fn test_round_confidence_exact_binary_value() {
        // 0.795 の直下の値。x * 100 だと 79.5 に丸まってしまう
        assert_eq!(round_confidence(0.7949999999999999), 0.79);
        assert_eq!(round_confidence(0.0), 0.0);
        assert_eq!(round_confidence(1.0), 1.0);
        assert_eq!(round_confidence(0.004), 0.0);
        assert_eq!(round_confidence(0.005), 0.01);
    }

    #[test]
    fn test_boundary_mean_is_not_a_match() {
        // 類似度 0.59 の2文書: 平均 (1.0 + 0.59) / 2 は 0.795 をわずかに下回る
        let a = format!("{}{}", "a".repeat(59), "b".repeat(41));
        let b = format!("{}{}", "a".repeat(59), "c".repeat(41));
        assert_eq!(similarity(&a, &b), 0.59);

        let table = compare_documents(&[map(&[("K", a.as_str())]), map(&[("K", b.as_str())])]);
        let row = table.get("K").unwrap();
        assert_eq!(row.confidence, 0.79);
        assert!(!row.is_match);
    }

    #[test]
    fn test_match_uses_rounded_confidence() {
        // 0.7951 は丸めると 0.8 になり一致扱い
        assert!(round_confidence(0.7951) >= DEFAULT_MATCH_THRESHOLD);
    }
}
