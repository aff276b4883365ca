//! Integration Test: バックグラウンドポーリング
//!
//! スケジューラ → プローブ → ステータス書き込み → APIでの参照

use crate::support::{http::spawn_poller, test_db};
use reqwest::Client;
use serde_json::Value;
use service_poller::db::services as db;
use service_poller::health::{BackgroundPoller, HttpProber, PollScheduler};
use service_poller::types::{Service, ServiceStatus};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn wait_for_status(
    pool: &sqlx::SqlitePool,
    service: &Service,
    expected: ServiceStatus,
) -> ServiceStatus {
    let mut status = ServiceStatus::Unknown;
    for _ in 0..100 {
        let services = db::list_services(pool, 100).await.unwrap();
        status = services
            .iter()
            .find(|s| s.id == service.id)
            .map(|s| s.status)
            .unwrap_or_default();
        if status == expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(30)).await;
    }
    status
}

#[tokio::test]
async fn test_scheduled_polling_records_reachability() {
    let up = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&up)
        .await;
    let slow = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&slow)
        .await;

    let env = test_db().await;
    // ポート付きのURLは登録APIの検証を通らないため直接保存する
    let up_service = Service::new(up.uri(), "up".to_string());
    let slow_service = Service::new(slow.uri(), "slow".to_string());
    db::create_service(&env.pool, &up_service).await.unwrap();
    db::create_service(&env.pool, &slow_service).await.unwrap();

    let server = spawn_poller(env.state()).await;
    let poller = BackgroundPoller::new(
        env.registry.clone(),
        Arc::new(HttpProber::new(Duration::from_millis(200))),
    );
    let scheduler =
        PollScheduler::new(poller, Duration::from_millis(100)).start(server.shutdown());

    assert_eq!(
        wait_for_status(&env.pool, &up_service, ServiceStatus::Ok).await,
        ServiceStatus::Ok
    );
    assert_eq!(
        wait_for_status(&env.pool, &slow_service, ServiceStatus::Failed).await,
        ServiceStatus::Failed
    );

    let services: Vec<Value> = Client::new()
        .get(server.services_url(""))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let status_of = |id: &str| {
        services
            .iter()
            .find(|s| s["id"] == id)
            .map(|s| s["status"].clone())
            .unwrap()
    };
    assert_eq!(status_of(&up_service.id.to_string()), "OK");
    assert_eq!(status_of(&slow_service.id.to_string()), "FAILED");

    server.stop().await;
    tokio::time::timeout(Duration::from_secs(2), scheduler)
        .await
        .expect("scheduler did not stop with the server")
        .unwrap();
}

#[tokio::test]
async fn test_update_after_poll_resets_status() {
    let env = test_db().await;
    let id = env
        .registry
        .create(Some("http://www.example.com"), Some("example"))
        .await
        .unwrap();
    env.registry
        .update_status(Some(id), Some(ServiceStatus::Ok))
        .await
        .unwrap();

    let server = spawn_poller(env.state()).await;
    let res = Client::new()
        .put(server.services_url(&format!("/{}", id)))
        .json(&serde_json::json!({"url": "http://www.example.org"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NO_CONTENT);

    let services = env.registry.get_all().await.unwrap();
    assert_eq!(services[0].status, ServiceStatus::Unknown);
    assert_eq!(services[0].name, "");

    server.stop().await;
}
