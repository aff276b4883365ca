//! Integration Test: サービス管理API
//!
//! 実ポートで起動したサーバーに対して登録 → 一覧 → 更新 → 削除を行う

use crate::support::{http::spawn_poller, test_db};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

#[tokio::test]
async fn test_service_lifecycle_over_http() {
    let db = test_db().await;
    let server = spawn_poller(db.state()).await;
    let client = Client::new();

    // 登録
    let res = client
        .post(server.services_url(""))
        .json(&json!({"url": "https://www.kry.se", "name": "kry"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let id = res.json::<Value>().await.unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    // 一覧
    let services: Vec<Value> = client
        .get(server.services_url(""))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(services.len(), 1);
    assert_eq!(services[0]["id"], id.as_str());
    assert_eq!(services[0]["status"], "UNKNOWN");

    // 更新
    let res = client
        .put(server.services_url(&format!("/{}", id)))
        .json(&json!({"url": "http://www.example.com/health", "name": "example"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let services: Vec<Value> = client
        .get(server.services_url(""))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(services[0]["url"], "http://www.example.com/health");
    assert_eq!(services[0]["name"], "example");

    // 削除
    let res = client
        .delete(server.services_url(&format!("/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .delete(server.services_url(&format!("/{}", id)))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    server.stop().await;
}

#[tokio::test]
async fn test_invalid_registration_is_rejected() {
    let db = test_db().await;
    let server = spawn_poller(db.state()).await;
    let client = Client::new();

    let res = client
        .post(server.services_url(""))
        .json(&json!({"url": "mailto:someone@example.com"}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Invalid request");

    assert!(db.registry.get_all().await.unwrap().is_empty());
    server.stop().await;
}

#[tokio::test]
async fn test_duplicate_url_is_server_error() {
    let db = test_db().await;
    let server = spawn_poller(db.state()).await;
    let client = Client::new();
    let body = json!({"url": "http://dup.example.com"});

    let first = client
        .post(server.services_url(""))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = client
        .post(server.services_url(""))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::INTERNAL_SERVER_ERROR);
    // SQLのエラー詳細は返さない
    let text = second.text().await.unwrap();
    assert!(!text.contains("UNIQUE"));

    assert_eq!(db.registry.get_all().await.unwrap().len(), 1);
    server.stop().await;
}

#[tokio::test]
async fn test_list_is_capped_at_one_hundred() {
    let db = test_db().await;
    for i in 0..105 {
        db.registry
            .create(Some(format!("http://host{}.example.com", i).as_str()), None)
            .await
            .unwrap();
    }
    let server = spawn_poller(db.state()).await;

    let services: Vec<Value> = Client::new()
        .get(server.services_url(""))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(services.len(), 100);

    server.stop().await;
}
