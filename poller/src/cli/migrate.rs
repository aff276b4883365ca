//! migrate サブコマンド
//!
//! データベースファイルとserviceテーブルを作成して終了します。

use crate::common::error::PollerError;
use crate::db::migrations::initialize_database;
use clap::Args;
use tracing::info;

/// migrate サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct MigrateArgs {
    /// SQLite database URL
    #[arg(long, default_value = "sqlite://poller.db", env = "POLLER_DATABASE_URL")]
    pub database_url: String,
}

/// データベースを初期化する
pub async fn execute(args: &MigrateArgs) -> Result<(), PollerError> {
    let pool = initialize_database(&args.database_url).await?;
    pool.close().await;
    info!(database_url = %args.database_url, "Database is ready");
    Ok(())
}
