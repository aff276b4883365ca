//! サービス登録管理
//!
//! 監視対象サービスの検証付きCRUDを提供し、SQLiteへ委譲する

pub mod services;

pub use services::ServiceRegistry;
