use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use param_compare::{cli, config, error, export, logging, pipeline, reader, report, tagger};
use param_compare_common::{extract_with_source, RowFilter};
use cli::{Cli, Commands};
use config::Config;
use error::{CompareError, Result};
use reader::SourceDocument;
use std::path::PathBuf;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("\n✘ {}", e);
        if let CompareError::InsufficientDocuments { failures, .. } = &e {
            eprint!("{}", report::render_failures(failures));
        }
        std::process::exit(1);
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("  [{bar:30.cyan/blue}] {pos}/{len} {msg}") {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Compare { files, dir, format, output, only_mismatches, search, tagger: tagger_kind } => {
            println!("📑 param-compare - パラメータ比較\n");

            // 1. 文書の収集
            println!("[1/3] 文書を収集中...");
            let mut paths: Vec<PathBuf> = files;
            if let Some(dir) = dir {
                paths.extend(reader::scan_folder(&dir)?);
            }
            println!("✔ {}件の文書\n", paths.len());

            // 2. 抽出・比較
            let kind = tagger_kind.unwrap_or(config.tagger);
            let entity_tagger = tagger::build_tagger(kind, &config)?;
            println!("[2/3] パラメータを抽出中... (タガー: {})", kind);
            let pb = progress_bar(paths.len());
            let result = pipeline::compare_paths(&paths, entity_tagger.as_ref(), &pb);
            pb.finish_and_clear();
            let run = result?;
            for doc in &run.documents {
                println!("  {}: {}件 ({})", doc.file_name, doc.parameters.len(), doc.source);
            }
            if !run.failures.is_empty() {
                println!("⚠ {}件の文書をスキップ", run.failures.len());
                print!("{}", report::render_failures(&run.failures));
            }
            println!("✔ 比較完了\n");

            // 3. 表示・出力
            let filter = RowFilter::new(only_mismatches, search);
            if filter.is_active() {
                println!(
                    "絞り込み: {}{}",
                    if filter.only_mismatches { "不一致のみ " } else { "" },
                    filter.search.as_deref().map(|s| format!("「{}」", s)).unwrap_or_default()
                );
            }
            let view = filter.apply(&run.table);
            print!("{}", report::render_table(&view, &run.document_names()));
            println!("\n{}\n", report::render_summary(&run, &view));

            if format.is_some() || output.is_some() {
                println!("[3/3] エクスポート中...");
                let output_dir = output.unwrap_or_else(|| PathBuf::from("."));
                export::export_results(&run, &view, format.unwrap_or_default(), &output_dir)?;
            }

            println!("\n✅ 完了");
        }

        Commands::Extract { file, tagger: tagger_kind } => {
            let document = SourceDocument::from_path(&file)?;
            let kind = tagger_kind.unwrap_or(config.tagger);
            let entity_tagger = tagger::build_tagger(kind, &config)?;

            let text = document.to_text()?;
            let extraction = extract_with_source(&text, entity_tagger.as_ref())?;

            println!("📄 {} ({}件, {})\n", document.file_name, extraction.parameters.len(), extraction.source);
            print!("{}", report::render_parameters(&extraction.parameters));
        }

        Commands::Config { show, tagger, tagger_command, timeout } => {
            let mut config = config;

            if let Some(kind) = tagger {
                config.set_tagger(kind)?;
                println!("✔ タガーを設定しました: {}", kind);
            }

            if let Some(command) = tagger_command {
                config.set_tagger_command(command)?;
                println!("✔ 外部タガーのコマンドを設定しました");
            }

            if let Some(seconds) = timeout {
                config.set_timeout(seconds)?;
                println!("✔ タイムアウトを設定しました: {}秒", seconds);
            }

            if show {
                println!("設定: {}", Config::config_path()?.display());
                println!("  タガー: {}", config.tagger);
                println!(
                    "  外部コマンド: {}",
                    config.tagger_command().unwrap_or_else(|_| "未設定".into())
                );
                println!("  引数: {:?}", config.tagger_args);
                println!("  ラベル対応: {}件", config.label_map.len());
                println!("  タイムアウト: {}秒", config.timeout_seconds);
            }
        }
    }

    Ok(())
}
