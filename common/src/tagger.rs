//! エンティティタガー
//!
//! テキスト中のスパンに意味カテゴリを付与する外部機能の抽象。
//! 抽出処理はこのトレイトにのみ依存するため、テストでは決定的な
//! スタブに差し替えられる。
//!
//! - NullTagger: 何も検出しない（常に正規表現フォールバック）
//! - RuleTagger: 正規表現ベースの決定的な簡易認識器

use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// パラメータとして採用するエンティティカテゴリ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityCategory {
    Quantity,
    Cardinal,
    Percent,
    Money,
    Ordinal,
    Date,
    Time,
}

impl EntityCategory {
    pub const ALL: [EntityCategory; 7] = [
        EntityCategory::Quantity,
        EntityCategory::Cardinal,
        EntityCategory::Percent,
        EntityCategory::Money,
        EntityCategory::Ordinal,
        EntityCategory::Date,
        EntityCategory::Time,
    ];

    /// ラベル文字列（完全一致のみ）からカテゴリを得る
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityCategory::Quantity => "QUANTITY",
            EntityCategory::Cardinal => "CARDINAL",
            EntityCategory::Percent => "PERCENT",
            EntityCategory::Money => "MONEY",
            EntityCategory::Ordinal => "ORDINAL",
            EntityCategory::Date => "DATE",
            EntityCategory::Time => "TIME",
        }
    }
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// タガーが返す1スパン
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaggedSpan {
    #[serde(alias = "span")]
    pub text: String,
    #[serde(alias = "label_", alias = "category")]
    pub label: String,
}

impl TaggedSpan {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// エンティティタガー
///
/// 複数文書を並列に処理するため `Send + Sync` を要求する。
pub trait EntityTagger: Send + Sync {
    fn name(&self) -> &str;

    /// テキスト中のスパンを出現順に返す
    fn tag(&self, text: &str) -> Result<Vec<TaggedSpan>>;
}

/// 何も検出しないタガー
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTagger;

impl EntityTagger for NullTagger {
    fn name(&self) -> &str {
        "none"
    }

    fn tag(&self, _text: &str) -> Result<Vec<TaggedSpan>> {
        Ok(Vec::new())
    }
}

/// 正規表現ベースのタガー
///
/// 候補スパンを全パターンから集め、開始位置が早い順・長い順・
/// 優先度順に重ならないものを採用する。
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleTagger;

lazy_static::lazy_static! {
    static ref RULES: Vec<(EntityCategory, Regex)> = vec![
        (EntityCategory::Money, Regex::new(
            r"(?i)(?:[$€£¥]\s?\d[\d,]*(?:\.\d+)?(?:\s?(?:million|billion|thousand|[kmb])\b)?)|(?:\b\d[\d,]*(?:\.\d+)?\s?(?:usd|eur|gbp|jpy|dollars?|euros?|pounds?|yen)\b)"
        ).unwrap()),
        (EntityCategory::Date, Regex::new(
            r"(?i)\b\d{4}-\d{1,2}-\d{1,2}\b|\b\d{1,2}[/.]\d{1,2}[/.]\d{2,4}\b|\b(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+\d{1,2}(?:st|nd|rd|th)?,?\s+\d{4}\b|\b\d{1,2}\s+(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\.?\s+\d{4}\b"
        ).unwrap()),
        (EntityCategory::Time, Regex::new(
            r"(?i)\b\d{1,2}:\d{2}(?::\d{2})?(?:\s?[ap]\.?m\b\.?)?|\b\d{1,2}\s?[ap]\.?m\b\.?"
        ).unwrap()),
        (EntityCategory::Percent, Regex::new(
            r"(?i)\b\d+(?:[.,]\d+)?\s?(?:%|percent\b|per cent\b)"
        ).unwrap()),
        (EntityCategory::Quantity, Regex::new(
            r"\b\d+(?:[.,]\d+)?\s?(?:(?:mm|cm|km|m|kg|mg|g|t|lbs?|oz|kN|Nm|N|MPa|kPa|Pa|bar|psi|kV|mV|V|mA|A|kWh|Wh|kW|MW|W|GHz|MHz|kHz|Hz|rpm|ml|mL|L|ms|min|hrs?|h|s|ft|mph)\b|°[CF]\b|℃)"
        ).unwrap()),
        (EntityCategory::Ordinal, Regex::new(
            r"(?i)\b\d+(?:st|nd|rd|th)\b|\b(?:first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth)\b"
        ).unwrap()),
        (EntityCategory::Cardinal, Regex::new(
            r"\b\d[\d,]*(?:\.\d+)?\b"
        ).unwrap()),
    ];
}

impl RuleTagger {
    pub fn new() -> Self {
        Self
    }
}

impl EntityTagger for RuleTagger {
    fn name(&self) -> &str {
        "rules"
    }

    fn tag(&self, text: &str) -> Result<Vec<TaggedSpan>> {
        // (開始, 終了, 優先度)
        let mut candidates: Vec<(usize, usize, usize)> = Vec::new();
        for (priority, (_, re)) in RULES.iter().enumerate() {
            for m in re.find_iter(text) {
                let end = m.start() + m.as_str().trim_end().len();
                if end > m.start() {
                    candidates.push((m.start(), end, priority));
                }
            }
        }

        candidates.sort_by(|a, b| {
            a.0.cmp(&b.0)
                .then_with(|| (b.1 - b.0).cmp(&(a.1 - a.0)))
                .then_with(|| a.2.cmp(&b.2))
        });

        let mut spans = Vec::new();
        let mut last_end = 0;
        for (start, end, priority) in candidates {
            if start < last_end {
                continue;
            }
            spans.push(TaggedSpan::new(&text[start..end], RULES[priority].0.label()));
            last_end = end;
        }

        Ok(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(text: &str) -> Vec<(String, String)> {
        RuleTagger::new()
            .tag(text)
            .unwrap()
            .into_iter()
            .map(|s| (s.text, s.label))
            .collect()
    }

    #[test]
    fn test_category_labels() {
        for category in EntityCategory::ALL {
            assert_eq!(EntityCategory::from_label(category.label()), Some(category));
        }
        assert_eq!(EntityCategory::from_label("PERSON"), None);
        assert_eq!(EntityCategory::from_label("quantity"), None);
    }

    #[test]
    fn test_null_tagger() {
        assert!(NullTagger.tag("Weight 120 kg on 2024-01-05").unwrap().is_empty());
    }

    #[test]
    fn test_rule_tagger_quantity() {
        assert_eq!(
            labels("Torque: 300 Nm"),
            vec![("300 Nm".to_string(), "QUANTITY".to_string())]
        );
    }

    #[test]
    fn test_rule_tagger_mixed() {
        let spans = labels("Price $1,200.50, efficiency 95% delivered 2024-01-05 at 10:30 in the 3rd batch of 12");
        assert_eq!(
            spans,
            vec![
                ("$1,200.50".to_string(), "MONEY".to_string()),
                ("95%".to_string(), "PERCENT".to_string()),
                ("2024-01-05".to_string(), "DATE".to_string()),
                ("10:30".to_string(), "TIME".to_string()),
                ("3rd".to_string(), "ORDINAL".to_string()),
                ("12".to_string(), "CARDINAL".to_string()),
            ]
        );
    }

    #[test]
    fn test_rule_tagger_longest_span_wins() {
        // "120" (CARDINAL) より "120 kg" (QUANTITY) を優先
        assert_eq!(
            labels("Weight 120 kg"),
            vec![("120 kg".to_string(), "QUANTITY".to_string())]
        );
    }

    #[test]
    fn test_rule_tagger_month_names() {
        assert_eq!(
            labels("signed March 5, 2024"),
            vec![("March 5, 2024".to_string(), "DATE".to_string())]
        );
    }

    #[test]
    fn test_rule_tagger_no_entities() {
        assert!(labels("Material: steel, finish: matte").is_empty());
    }

    #[test]
    fn test_tagged_span_aliases() {
        let span: TaggedSpan = serde_json::from_str(r#"{"span": "5 kg", "label_": "QUANTITY"}"#).unwrap();
        assert_eq!(span, TaggedSpan::new("5 kg", "QUANTITY"));
    }
}
