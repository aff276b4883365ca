//! serve サブコマンド
//!
//! APIサーバーとポーリングスケジューラを起動します。
//! 環境変数は`PollerConfig::from_env`で読み込み、指定されたフラグだけを上書きする。

use crate::config::PollerConfig;
use clap::Args;

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// Listen port [env: POLLER_PORT, default: 8080]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Bind address [env: POLLER_HOST, default: 0.0.0.0]
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// SQLite database URL [env: POLLER_DATABASE_URL, default: sqlite://poller.db]
    #[arg(long)]
    pub database_url: Option<String>,
}

impl ServeArgs {
    /// 指定されたフラグで設定を上書きする
    pub fn apply_to(self, config: PollerConfig) -> PollerConfig {
        PollerConfig {
            host: self.host.unwrap_or(config.host),
            port: self.port.unwrap_or(config.port),
            database_url: self.database_url.unwrap_or(config.database_url),
            ..config
        }
    }
}
