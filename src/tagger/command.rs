//! 外部コマンドによるエンティティ検出
//!
//! 文書テキストを標準入力に渡し、標準出力の JSON 配列
//! `[{"text": ..., "label": ...}]`（```json ブロック可）を読む。
//! 呼び出しごとにタイムアウトがあり、超過したら子プロセスを kill する。

use param_compare_common::{parse_tagger_response, EntityTagger, Error, Result, TaggedSpan};
use std::collections::HashMap;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct CommandTagger {
    program: String,
    args: Vec<String>,
    label_map: HashMap<String, String>,
    timeout: Duration,
}

impl CommandTagger {
    pub fn new(
        program: impl Into<String>,
        args: Vec<String>,
        label_map: HashMap<String, String>,
        timeout: Duration,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            label_map,
            timeout,
        }
    }

    /// 子プロセスを実行し、終了まで待って出力を返す
    async fn execute(&self, text: &str) -> Result<Output> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd
            .spawn()
            .map_err(|e| Error::Tagger(format!("{} の起動に失敗: {}", self.program, e)))?;

        let stdin = child.stdin.take();
        let writer = async move {
            if let Some(mut stdin) = stdin {
                match stdin.write_all(text.as_bytes()).await {
                    // 入力を読まずに終了するタガーもある
                    Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => return Err(e),
                    _ => {}
                }
            }
            Ok(())
        };

        let (written, output) = tokio::join!(writer, child.wait_with_output());
        if let Err(e) = written {
            tracing::warn!("{} への入力書き込みに失敗: {}", self.program, e);
        }
        output.map_err(|e| Error::Tagger(format!("{} の実行に失敗: {}", self.program, e)))
    }

    async fn run(&self, text: &str) -> Result<String> {
        // タイムアウト時は future ごと破棄され、kill_on_drop で子プロセスも止まる
        let output = match tokio::time::timeout(self.timeout, self.execute(text)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(Error::Tagger(format!(
                    "{} が{}秒以内に終了しませんでした",
                    self.program,
                    self.timeout.as_secs_f64()
                )))
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Tagger(format!(
                "{} failed (code {:?}): {}",
                self.program,
                output.status.code(),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl EntityTagger for CommandTagger {
    fn name(&self) -> &str {
        "command"
    }

    fn tag(&self, text: &str) -> Result<Vec<TaggedSpan>> {
        // rayon のワーカーから呼ばれるため、呼び出しごとに小さなランタイムを使う
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let response = runtime.block_on(self.run(text))?;
        tracing::debug!("{} 出力 {} bytes", self.program, response.len());
        parse_tagger_response(&response, &self.label_map)
            .map_err(|e| Error::Tagger(format!("{} の出力を解釈できません: {}", self.program, e)))
    }
}
