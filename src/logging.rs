use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// ログ初期化（stderr、`RUST_LOG` があればそちらを優先）
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    // 二重初期化（テストなど）は無視
    let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
}
