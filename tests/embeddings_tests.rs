//! Integration tests for the `/embeddings` endpoints and transport failures.

mod common;

use chat_explorer_client::{ChatExplorerClient, ChatExplorerError, SearchRequest};
use common::{client_for, client_with_timeout, setup_mock_server};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::json;
use std::io::Read;
use std::time::{Duration, Instant};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_search_messages_default_limit() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/embeddings/search"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"chat_id": "abc", "query": "hello", "limit": 10})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .search_messages("abc", "hello", None)
        .await
        .unwrap();
    assert_eq!(result, json!([]));
}

#[tokio::test]
async fn test_search_messages_explicit_limit() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/embeddings/search"))
        .and(body_json(json!({"chat_id": "abc", "query": "hello", "limit": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 9, "message": "hello there", "similarity": 0.91}
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .search_messages("abc", "hello", Some(3))
        .await
        .unwrap();
    assert_eq!(result[0]["id"], 9);
}

#[derive(Debug, Deserialize, PartialEq)]
struct Match {
    id: u64,
    similarity: f64,
}

#[tokio::test]
async fn test_search_through_service_with_typed_response() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/embeddings/search"))
        .and(body_json(json!({"chat_id": "7", "query": "trip", "limit": 2})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "similarity": 0.5, "message": "ignored"}
        ])))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = SearchRequest::new(7_u64, "trip").limit(2);
    let matches: Vec<Match> = client.embeddings().search(&request).await.unwrap();

    assert_eq!(matches, vec![Match { id: 1, similarity: 0.5 }]);
}

#[tokio::test]
async fn test_get_clusters() {
    let mock_server = setup_mock_server().await;
    let clusters = json!([
        {"id": 1, "sender": "Ana", "message": "hi", "cluster_x": 0.1, "cluster_y": -2.3, "sentiment": 0.4}
    ]);

    Mock::given(method("GET"))
        .and(path("/api/embeddings/abc/clusters"))
        .respond_with(ResponseTemplate::new(200).set_body_json(clusters.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).get_clusters("abc").await.unwrap();
    assert_eq!(result, clusters);
}

#[tokio::test]
async fn test_process_chat_posts_without_body() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/embeddings/abc/process"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "processed_count": 12})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).process_chat("abc").await.unwrap();
    assert_eq!(result["processed_count"], 12);

    let received = mock_server.received_requests().await.unwrap();
    assert!(received[0].body.is_empty());
}

#[tokio::test]
async fn test_search_validation_error_from_server() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/embeddings/search"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "Query and chat_id are required"})),
        )
        .mount(&mock_server)
        .await;

    let error = client_for(&mock_server)
        .search_messages("abc", "", None)
        .await
        .unwrap_err();

    assert_eq!(error.status(), Some(400));
    assert!(error.to_string().contains("Query and chat_id are required"));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/api/embeddings/abc/process"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client = client_with_timeout(&mock_server, Duration::from_millis(200));

    let started = Instant::now();
    let error = client.process_chat("abc").await.unwrap_err();

    assert!(error.is_timeout(), "expected timeout, got {:?}", error);
    assert_eq!(error.status(), None);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Bind then drop a listener so the port is known to be closed.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = ChatExplorerClient::builder()
        .origin(format!("http://127.0.0.1:{}", port))
        .build()
        .unwrap();

    let error = client.get_chats().await.unwrap_err();

    assert!(
        matches!(error, ChatExplorerError::Network { .. }),
        "expected network error, got {:?}",
        error
    );
    assert_eq!(error.status(), None);
}

#[tokio::test]
async fn test_connection_dropped_before_reply_is_network_error() {
    // Accept, read the request, then hang up without answering.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0_u8; 4096];
            let _ = stream.read(&mut buf);
        }
    });

    let client = ChatExplorerClient::builder()
        .origin(format!("http://127.0.0.1:{}", port))
        .build()
        .unwrap();

    let error = client.get_chats().await.unwrap_err();
    server.join().unwrap();

    assert!(error.is_network(), "expected network error, got {:?}", error);
    assert_eq!(error.status(), None);
}

#[tokio::test]
async fn test_health_check() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "message": "WhatsApp Chat Backend is running"
        })))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server).health().await.unwrap();
    assert_eq!(result["status"], "OK");
}

#[tokio::test]
async fn test_custom_base_path_and_headers() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/v2/messages/chats"))
        .and(header("x-client", "integration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = ChatExplorerClient::builder()
        .origin(mock_server.uri())
        .base_path("/v2/")
        .header("X-Client", "integration")
        .build()
        .unwrap();

    client.get_chats().await.unwrap();
}
