//! REST APIハンドラー
//!
//! サービス登録・一覧・更新・削除API

pub mod error;
pub mod services;

use crate::AppState;
use axum::{
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

/// APIルーターを作成
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/services",
            get(services::list_services).post(services::create_service),
        )
        .route(
            "/api/v1/services/:id",
            put(services::update_service).delete(services::delete_service),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
