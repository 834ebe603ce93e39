//! Parameter Compare Common Library
//!
//! パラメータ抽出・比較のコアロジック（I/Oを持たない純粋関数群）

pub mod types;
pub mod error;
pub mod similarity;
pub mod tagger;
pub mod extractor;
pub mod aligner;
pub mod parser;
pub mod filter;
pub mod export;

pub use types::{CellValue, ComparisonRow, ComparisonTable, ParameterMap, TableView, MISSING_LABEL};
pub use error::{Error, Result};
pub use similarity::{is_similar, similarity, SequenceMatcher, DEFAULT_MATCH_THRESHOLD};
pub use tagger::{EntityCategory, EntityTagger, NullTagger, RuleTagger, TaggedSpan};
pub use extractor::{extract_parameters, extract_with_source, regex_fallback, Extraction, ExtractionSource};
pub use aligner::{compare_documents, round_confidence};
pub use parser::{extract_json, parse_tagger_response};
pub use filter::RowFilter;
