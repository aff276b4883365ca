//! ロギング初期化
//!
//! 標準出力へのfmtレイヤーに加え、`POLLER_LOG_DIR`が設定されていれば
//! 日次ローテーションのファイルレイヤーを追加する。

use crate::config::get_env;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// デフォルトのログレベル
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// ログファイル名の接頭辞
const LOG_FILE_PREFIX: &str = "service-poller.log";

/// フィルタ指定を決定する
///
/// `POLLER_LOG_LEVEL` → `RUST_LOG` → `info` の順に採用する。
pub fn filter_directive() -> String {
    get_env("POLLER_LOG_LEVEL")
        .or_else(|| get_env("RUST_LOG"))
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

fn env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|e| {
        eprintln!(
            "Invalid log filter '{}': {}. Falling back to {}",
            directive, e, DEFAULT_LOG_LEVEL
        );
        EnvFilter::new(DEFAULT_LOG_LEVEL)
    })
}

/// グローバルサブスクライバーを初期化する
///
/// ファイル出力が有効な場合は`WorkerGuard`を返す。
/// 破棄するとバッファ中のログが失われるため、プロセス終了まで保持すること。
pub fn init() -> Result<Option<WorkerGuard>, Box<dyn std::error::Error + Send + Sync>> {
    let (file_layer, guard) = match get_env("POLLER_LOG_DIR") {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter(&filter_directive()))
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}
