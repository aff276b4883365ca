//! データベースアクセス層
//!
//! SQLiteベースのデータ永続化

/// データベース初期化
pub mod migrations;

/// サービス管理
pub mod services;

/// Repository traitパターン（テスタビリティ向上）
pub mod traits;
