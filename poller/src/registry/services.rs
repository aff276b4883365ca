//! サービスレジストリ
//!
//! 入力検証とリポジトリ呼び出しの仲介を行う。状態は持たず、
//! 並行制御は永続化層に委ねる。

use crate::common::error::{PollerError, PollerResult};
use crate::db::services::SERVICE_PAGE_SIZE;
use crate::db::traits::{ServiceRepository, SqliteServiceRepository};
use crate::types::service::{Service, ServiceStatus, ServiceUpdate};
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// 受け付けるURL形式
///
/// 完全なURI文法ではなく、スキーム・任意の`www.`・英数字と`-./`のみを許可する。
/// クエリ文字列やポート番号は拒否される。
static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^http(s?)://(www\.)?[a-zA-Z0-9\-./]*$").expect("valid regex"));

/// サービスレジストリ
#[derive(Clone)]
pub struct ServiceRegistry {
    repository: Arc<dyn ServiceRepository>,
}

impl ServiceRegistry {
    /// リポジトリからレジストリを作成
    pub fn new(repository: Arc<dyn ServiceRepository>) -> Self {
        Self { repository }
    }

    /// SQLiteプールからレジストリを作成
    pub fn with_pool(pool: SqlitePool) -> Self {
        Self::new(Arc::new(SqliteServiceRepository::new(pool)))
    }

    /// URLが受け付け可能な形式か判定
    pub fn is_valid_url(url: &str) -> bool {
        URL_PATTERN.is_match(url)
    }

    /// サービスを登録し、生成したIDを返す
    ///
    /// ステータスは常にUNKNOWNで登録される。URL重複は永続化層の制約違反として
    /// `PollerError::Database`で返る。
    pub async fn create(&self, url: Option<&str>, name: Option<&str>) -> PollerResult<Uuid> {
        let url = validate_url(url)?;
        let service = Service::new(url.to_string(), name.unwrap_or_default().to_string());

        self.repository.create_service(&service).await?;

        info!(service_id = %service.id, url = %service.url, "Service registered");
        Ok(service.id)
    }

    /// 全サービスを取得（最大100件）
    pub async fn get_all(&self) -> PollerResult<Vec<Service>> {
        Ok(self.repository.list_services(SERVICE_PAGE_SIZE).await?)
    }

    /// URLと表示名を更新する
    ///
    /// エンドポイントが変わった場合に健全と見なさないよう、ステータスはUNKNOWNに戻る。
    /// 対象IDが存在しない場合は`Ok(false)`。
    pub async fn update(&self, update: ServiceUpdate) -> PollerResult<bool> {
        let url = validate_url(update.url.as_deref())?;

        let updated = self
            .repository
            .update_service(update.id, url, &update.name)
            .await?;

        debug!(service_id = %update.id, updated, "Service update applied");
        Ok(updated)
    }

    /// ステータスのみを更新する（バックグラウンドポーラー用）
    pub async fn update_status(
        &self,
        id: Option<Uuid>,
        status: Option<ServiceStatus>,
    ) -> PollerResult<bool> {
        let id = id.ok_or_else(|| {
            PollerError::Validation("Id to update service must not be null".to_string())
        })?;
        let status = status.ok_or_else(|| {
            PollerError::Validation("Status to update service must not be null".to_string())
        })?;

        Ok(self.repository.update_service_status(id, status).await?)
    }

    /// サービスを削除
    pub async fn delete(&self, id: Option<Uuid>) -> PollerResult<bool> {
        let id = id.ok_or_else(|| {
            PollerError::Validation("Id to delete service must not be null".to_string())
        })?;

        let deleted = self.repository.delete_service(id).await?;
        if deleted {
            info!(service_id = %id, "Service deleted");
        }
        Ok(deleted)
    }

    /// 全サービスを削除（テスト・リセット用）
    pub async fn delete_all(&self) -> PollerResult<bool> {
        let removed = self.repository.truncate().await?;
        info!(removed, "All services deleted");
        Ok(true)
    }
}

fn validate_url(url: Option<&str>) -> PollerResult<&str> {
    match url {
        Some(url) if ServiceRegistry::is_valid_url(url) => Ok(url),
        _ => Err(PollerError::Validation("Invalid url format".to_string())),
    }
}
