//! Repository traitパターン定義
//!
//! DB操作を抽象化し、テスタビリティを向上させるためのtrait。
//! 既存のフリー関数（`db::services`）に対応する。

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::types::service::{Service, ServiceStatus};

use super::services as db;

/// サービスCRUD操作のRepository trait
///
/// 複数タスクから同時に呼ばれる前提で、実装側が並行制御を担う。
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// テーブルを作成（存在しない場合のみ）
    async fn create_table(&self) -> Result<(), sqlx::Error>;
    /// サービスを登録
    async fn create_service(&self, service: &Service) -> Result<(), sqlx::Error>;
    /// サービス一覧を取得（最大`limit`件）
    async fn list_services(&self, limit: i64) -> Result<Vec<Service>, sqlx::Error>;
    /// URLと表示名を更新し、ステータスをUNKNOWNに戻す
    async fn update_service(&self, id: Uuid, url: &str, name: &str) -> Result<bool, sqlx::Error>;
    /// ステータスのみを更新
    async fn update_service_status(
        &self,
        id: Uuid,
        status: ServiceStatus,
    ) -> Result<bool, sqlx::Error>;
    /// サービスを削除
    async fn delete_service(&self, id: Uuid) -> Result<bool, sqlx::Error>;
    /// 全サービスを削除
    async fn truncate(&self) -> Result<u64, sqlx::Error>;
}

/// SQLite実装
#[derive(Clone)]
pub struct SqliteServiceRepository {
    pool: SqlitePool,
}

impl SqliteServiceRepository {
    /// 接続プールからリポジトリを作成
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceRepository for SqliteServiceRepository {
    async fn create_table(&self) -> Result<(), sqlx::Error> {
        db::create_table(&self.pool).await
    }

    async fn create_service(&self, service: &Service) -> Result<(), sqlx::Error> {
        db::create_service(&self.pool, service).await
    }

    async fn list_services(&self, limit: i64) -> Result<Vec<Service>, sqlx::Error> {
        db::list_services(&self.pool, limit).await
    }

    async fn update_service(&self, id: Uuid, url: &str, name: &str) -> Result<bool, sqlx::Error> {
        db::update_service(&self.pool, id, url, name).await
    }

    async fn update_service_status(
        &self,
        id: Uuid,
        status: ServiceStatus,
    ) -> Result<bool, sqlx::Error> {
        db::update_service_status(&self.pool, id, status).await
    }

    async fn delete_service(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        db::delete_service(&self.pool, id).await
    }

    async fn truncate(&self) -> Result<u64, sqlx::Error> {
        db::truncate(&self.pool).await
    }
}
