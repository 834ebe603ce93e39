//! タガーの選択
//!
//! 設定（とCLIの上書き）からエンティティタガーを組み立てる。

mod command;

pub use command::CommandTagger;

use crate::config::Config;
use crate::error::Result;
use clap::ValueEnum;
use param_compare_common::{EntityTagger, NullTagger, RuleTagger};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaggerKind {
    /// エンティティ検出なし（常に正規表現フォールバック）
    None,
    /// 組み込みの規則ベース検出
    #[default]
    Rules,
    /// 外部コマンド
    Command,
}

impl fmt::Display for TaggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaggerKind::None => write!(f, "none"),
            TaggerKind::Rules => write!(f, "rules"),
            TaggerKind::Command => write!(f, "command"),
        }
    }
}

/// タガーを生成
pub fn build_tagger(kind: TaggerKind, config: &Config) -> Result<Box<dyn EntityTagger>> {
    let tagger: Box<dyn EntityTagger> = match kind {
        TaggerKind::None => Box::new(NullTagger),
        TaggerKind::Rules => Box::new(RuleTagger::new()),
        TaggerKind::Command => Box::new(CommandTagger::new(
            config.tagger_command()?,
            config.tagger_args.clone(),
            config.label_map.clone(),
            Duration::from_secs(config.timeout_seconds),
        )),
    };
    tracing::debug!("タガー: {}", tagger.name());
    Ok(tagger)
}
