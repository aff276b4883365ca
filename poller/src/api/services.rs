//! サービス管理API
//!
//! `/api/v1/services`のCRUDハンドラー

use super::error::AppError;
use crate::types::service::{Service, ServiceUpdate};
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// サービス登録・更新リクエスト
#[derive(Debug, Default, Deserialize)]
pub struct ServiceRequest {
    /// 監視対象URL
    #[serde(default)]
    pub url: Option<String>,
    /// 表示名（任意）
    #[serde(default)]
    pub name: Option<String>,
}

/// サービス登録レスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateServiceResponse {
    /// 生成されたID
    pub id: Uuid,
}

/// GET /api/v1/services - サービス一覧
pub async fn list_services(
    State(state): State<AppState>,
) -> Result<Json<Vec<Service>>, AppError> {
    Ok(Json(state.registry.get_all().await?))
}

/// POST /api/v1/services - サービス登録
pub async fn create_service(
    State(state): State<AppState>,
    Json(req): Json<ServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let id = state
        .registry
        .create(req.url.as_deref(), req.name.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(CreateServiceResponse { id })))
}

/// PUT /api/v1/services/:id - URL・表示名の更新
pub async fn update_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ServiceRequest>,
) -> Result<StatusCode, AppError> {
    let update = ServiceUpdate {
        id,
        url: req.url,
        name: req.name.unwrap_or_default(),
    };

    if state.registry.update(update).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

/// DELETE /api/v1/services/:id - サービス削除
pub async fn delete_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.registry.delete(Some(id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}
