//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::error::PollerError;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub enum AppError {
    /// 対象サービスが存在しない
    NotFound,
    /// レジストリ・永続化層のエラー
    Poller(PollerError),
}

impl From<PollerError> for AppError {
    fn from(err: PollerError) -> Self {
        AppError::Poller(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // 外部にはexternal_message()のみを返し、詳細はログにだけ残す
        let (status, message) = match &self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Service not found"),
            AppError::Poller(err) => {
                let status = err.status_code();
                if status.is_server_error() {
                    tracing::error!(error = %err, "Request failed");
                } else {
                    tracing::debug!(error = %err, "Request rejected");
                }
                (status, err.external_message())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
