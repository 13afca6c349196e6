//! HTTP API integration tests.
//!
//! Tests for REST API endpoints (health check, room list, room details).

mod fixtures;
use fixtures::TestServer;

#[tokio::test]
async fn test_health_endpoint() {
    // テスト項目: /api/health エンドポイントが正常に動作する
    // given (前提条件):
    let port = 19080;
    let server = TestServer::start(port);
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/health", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_rooms_list_is_empty_before_any_join() {
    // テスト項目: /api/rooms は参加が一度も無ければ空の一覧を返す
    //             （ルームは最初の参照で遅延作成される）
    // given (前提条件):
    let port = 19081;
    let server = TestServer::start(port);
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/rooms", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body.is_array(), "Response should be an array");
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_room_detail_endpoint_not_found() {
    // テスト項目: /api/rooms/:room_id エンドポイントが存在しないルームに対して404を返す
    // given (前提条件):
    let port = 19082;
    let server = TestServer::start(port);
    let client = reqwest::Client::new();

    // when (操作):
    let response = client
        .get(format!("{}/api/rooms/nonexistent", server.base_url()))
        .send()
        .await
        .expect("Failed to send request");

    // then (期待する結果):
    assert_eq!(response.status(), 404);
}
