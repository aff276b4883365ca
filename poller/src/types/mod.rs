//! 型定義モジュール
//!
//! ドメインエンティティの型定義を提供

/// サービス関連の型定義
pub mod service;

pub use service::{Service, ServiceStatus, ServiceUpdate};
