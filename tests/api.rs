//! HTTP API integration tests

use axum::http::{Method, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use netscribe_server::config::Config;
use netscribe_server::inventory::{Document, Server};
use netscribe_server::notify::{notification_channel, NotificationReceiver};
use netscribe_server::routes;
use netscribe_server::state::AppState;

fn test_server(seed_servers: bool) -> (TestServer, NotificationReceiver) {
    let mut config = Config::default();
    config.inventory.seed_servers = seed_servers;

    let (notifier, receiver) = notification_channel(64);
    let app = routes::router(AppState::new(config, notifier));
    (TestServer::new(app).unwrap(), receiver)
}

#[tokio::test]
async fn test_health_is_independent_of_state() {
    let (server, _rx) = test_server(true);

    server
        .post("/documents")
        .json(&json!({"text": "noise"}))
        .await;

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<Value>(),
        json!({"status": "up", "system": "healthy"})
    );
}

#[tokio::test]
async fn test_seeded_inventory_is_listed() {
    let (server, _rx) = test_server(true);

    let response = server.get("/servers").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Vec<Server>>(), Server::examples());
}

#[tokio::test]
async fn test_document_round_trip() {
    let (server, mut rx) = test_server(false);

    let created = server
        .post("/documents")
        .json(&json!({"text": "hello"}))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    assert_eq!(created.json::<Value>(), json!({"text": "hello"}));

    let listed = server.get("/documents").await;
    assert_eq!(listed.status_code(), StatusCode::OK);
    assert_eq!(listed.json::<Vec<Document>>(), vec![Document::new("hello")]);

    assert_eq!(rx.recv().await.unwrap(), "hello");
}

#[tokio::test]
async fn test_servers_keep_insertion_order() {
    let (server, _rx) = test_server(false);

    for name in ["alpha", "bravo", "alpha"] {
        let response = server
            .post("/servers")
            .json(&json!({"server_name": name, "ip_address": "192.168.0.1", "is_online": false}))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    let names: Vec<String> = server
        .get("/servers")
        .await
        .json::<Vec<Server>>()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["alpha", "bravo", "alpha"]);
}

#[tokio::test]
async fn test_malformed_server_does_not_change_count() {
    let (server, _rx) = test_server(true);
    let before = server.get("/servers").await.json::<Vec<Server>>().len();

    let response = server
        .post("/servers")
        .text(r#"{"server_name": "half-written", "ip_addr"#)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server
        .post("/servers")
        .json(&json!({"server_name": "typed-wrong", "is_online": "yes"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let after = server.get("/servers").await.json::<Vec<Server>>().len();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_array_bodies_are_not_records() {
    let (server, _rx) = test_server(false);

    let response = server
        .post("/servers")
        .text(r#"["x","1.2.3.4",true]"#)
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let response = server.post("/documents").text("[]").await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    assert!(server.get("/servers").await.json::<Vec<Server>>().is_empty());
    assert!(server.get("/documents").await.json::<Vec<Document>>().is_empty());
}

#[tokio::test]
async fn test_unsupported_method_on_servers() {
    let (server, _rx) = test_server(true);

    let response = server.delete("/servers").await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);

    let response = server.method(Method::OPTIONS, "/documents").await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);

    let response = server.put("/documents").json(&json!({"text": "nope"})).await;
    assert_eq!(response.status_code(), StatusCode::METHOD_NOT_ALLOWED);

    assert!(server.get("/documents").await.json::<Vec<Document>>().is_empty());
}
