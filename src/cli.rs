use crate::tagger::TaggerKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "param-compare")]
#[command(about = "文書パラメータ抽出・横断比較ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 複数文書のパラメータを比較
    Compare {
        /// 比較する文書（PDF/DOCX/XLSX/XML）
        files: Vec<PathBuf>,

        /// フォルダ直下の対応文書も追加
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// 出力形式 (csv/excel/json/all)
        #[arg(short, long)]
        format: Option<ExportFormat>,

        /// 出力ファイル/ディレクトリ（デフォルト: カレント）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 不一致行のみ表示・出力
        #[arg(long)]
        only_mismatches: bool,

        /// パラメータ名で絞り込み（部分一致）
        #[arg(short, long)]
        search: Option<String>,

        /// タガー (none/rules/command)、省略時は設定値
        #[arg(long)]
        tagger: Option<TaggerKind>,
    },

    /// 1文書から抽出したパラメータを表示
    Extract {
        /// 対象文書
        #[arg(required = true)]
        file: PathBuf,

        /// タガー (none/rules/command)、省略時は設定値
        #[arg(long)]
        tagger: Option<TaggerKind>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 既定のタガーを設定
        #[arg(long)]
        tagger: Option<TaggerKind>,

        /// 外部タガーのコマンドを設定
        #[arg(long)]
        tagger_command: Option<String>,

        /// 外部タガーのタイムアウト（秒）を設定
        #[arg(long)]
        timeout: Option<u64>,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Excel,
    Json,
    All,
}

impl ExportFormat {
    /// 実際に書き出す単一形式の並び（all は3形式に展開）
    pub fn expand(&self) -> &'static [ExportFormat] {
        match self {
            ExportFormat::Csv => &[ExportFormat::Csv],
            ExportFormat::Excel => &[ExportFormat::Excel],
            ExportFormat::Json => &[ExportFormat::Json],
            ExportFormat::All => &[ExportFormat::Csv, ExportFormat::Excel, ExportFormat::Json],
        }
    }

    /// 出力ファイルの拡張子
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv | ExportFormat::All => "csv",
            ExportFormat::Excel => "xlsx",
            ExportFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "json" => Ok(ExportFormat::Json),
            "all" => Ok(ExportFormat::All),
            _ => Err(format!("Unknown format: {}. Use csv, excel, json, or all", s)),
        }
    }
}
