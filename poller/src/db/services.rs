//! サービスデータベース操作
//!
//! 各関数は単一のSQL文を発行し、個別にawaitする（複数文トランザクションは使わない）。

use crate::types::service::{Service, ServiceStatus};
use chrono::{DateTime, Local};
use sqlx::SqlitePool;
use uuid::Uuid;

/// 一覧取得の上限件数（ページングカーソルは持たない）
pub const SERVICE_PAGE_SIZE: i64 = 100;

/// serviceテーブルを作成（存在しない場合のみ）
pub async fn create_table(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS service (
            id CHAR(36) PRIMARY KEY NOT NULL,
            name VARCHAR(128) NOT NULL DEFAULT '',
            url VARCHAR(128) NOT NULL UNIQUE,
            status VARCHAR(12) NOT NULL,
            creation_date INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// サービスを登録
pub async fn create_service(pool: &SqlitePool, service: &Service) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO service (id, name, url, status, creation_date)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(service.id.to_string())
    .bind(&service.name)
    .bind(&service.url)
    .bind(service.status.as_str())
    .bind(service.creation_date.timestamp_millis())
    .execute(pool)
    .await?;

    Ok(())
}

/// サービス一覧を取得（登録順、最大`limit`件）
pub async fn list_services(pool: &SqlitePool, limit: i64) -> Result<Vec<Service>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ServiceRow>(
        r#"
        SELECT id, name, url, status, creation_date
        FROM service
        ORDER BY creation_date ASC, id ASC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(Service::try_from).collect()
}

/// URLと表示名を更新し、ステータスをUNKNOWNに戻す
///
/// 変更された行がちょうど1行の場合に`true`を返す。
pub async fn update_service(
    pool: &SqlitePool,
    id: Uuid,
    url: &str,
    name: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE service SET
            url = ?,
            name = ?,
            status = ?
        WHERE id = ?
        "#,
    )
    .bind(url)
    .bind(name)
    .bind(ServiceStatus::Unknown.as_str())
    .bind(id.to_string())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// ステータスのみを更新
pub async fn update_service_status(
    pool: &SqlitePool,
    id: Uuid,
    status: ServiceStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE service SET status = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() == 1)
}

/// サービスを削除
pub async fn delete_service(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM service WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() == 1)
}

/// 全サービスを削除し、削除件数を返す
pub async fn truncate(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM service").execute(pool).await?;
    Ok(result.rows_affected())
}

#[derive(sqlx::FromRow)]
struct ServiceRow {
    id: String,
    name: String,
    url: String,
    status: String,
    /// エポックミリ秒
    creation_date: i64,
}

impl TryFrom<ServiceRow> for Service {
    type Error = sqlx::Error;

    fn try_from(row: ServiceRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        let status = row
            .status
            .parse::<ServiceStatus>()
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
        let creation_date = DateTime::from_timestamp_millis(row.creation_date)
            .ok_or_else(|| {
                sqlx::Error::Decode(
                    format!("creation_date out of range: {}", row.creation_date).into(),
                )
            })?
            .with_timezone(&Local);

        Ok(Service {
            id,
            url: row.url,
            name: row.name,
            status,
            creation_date,
        })
    }
}
