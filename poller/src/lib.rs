//! Service poller
//!
//! 監視対象サービスのURLを登録し、定期的なHTTP GETで到達可否を記録するサーバー

#![warn(missing_docs)]

/// 共通エラー型
pub mod common;

/// REST APIハンドラー
pub mod api;

/// ヘルスポーリング（プローバー・ポーラー・スケジューラ）
pub mod health;

/// サービス登録管理
pub mod registry;

/// データベースアクセス
pub mod db;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// CLIインターフェース
pub mod cli;

/// 型定義
pub mod types;

/// axumサーバー起動
pub mod server;

/// Shutdown controller
pub mod shutdown;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// サービスレジストリ
    pub registry: registry::ServiceRegistry,
}
