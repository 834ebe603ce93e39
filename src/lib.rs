//! param-compare
//!
//! PDF/DOCX/XLSX/XML 文書からパラメータを抽出し、文書横断で比較する。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod pipeline;
pub mod reader;
pub mod report;
pub mod tagger;
