//! 共通定義

/// エラー型
pub mod error;
