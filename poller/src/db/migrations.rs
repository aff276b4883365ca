//! データベース初期化
//!
//! SQLiteファイルの作成、接続プールの生成、テーブル作成を行う。

use crate::common::error::PollerError;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};

/// 接続プールの最大接続数
const MAX_POOL_SIZE: u32 = 30;

/// SQLiteデータベース接続プールを作成してスキーマを用意する
///
/// # Arguments
/// * `database_url` - データベースURL（例: "sqlite://poller.db"）
///
/// # Returns
/// * `Ok(SqlitePool)` - 初期化済みデータベースプール
/// * `Err(PollerError)` - 初期化失敗
pub async fn initialize_database(database_url: &str) -> Result<SqlitePool, PollerError> {
    // データベースファイルが存在しない場合は作成
    if !Sqlite::database_exists(database_url).await? {
        ensure_parent_dir(database_url)?;
        tracing::info!(database_url, "Creating database");
        Sqlite::create_database(database_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(MAX_POOL_SIZE)
        .connect(database_url)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// SQLiteファイルはディレクトリが存在しないと作成できないため、先に作成しておく
fn ensure_parent_dir(database_url: &str) -> Result<(), PollerError> {
    let Some(path) = database_url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    // `sqlite::memory:` のような特殊指定はスキップ
    if path.starts_with(':') {
        return Ok(());
    }
    let normalized = path.trim_start_matches("//");
    let path_without_params = normalized.split('?').next().unwrap_or(normalized);
    if let Some(parent) = std::path::Path::new(path_without_params).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PollerError::Config(format!(
                    "Failed to create database directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }
    Ok(())
}

/// スキーマを作成（冪等）
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), PollerError> {
    tracing::info!("Running database migrations");

    super::services::create_table(pool).await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}
