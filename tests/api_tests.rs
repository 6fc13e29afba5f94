//! HTTP client tests against a throwaway local server

use pokesearch::api;
use pokesearch::error::SearchError;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const PIKACHU: &str = r#"{"id":25,"name":"pikachu","height":4,"weight":60,
"types":[{"slot":1,"type":{"name":"electric","url":"x"}}],
"sprites":{"front_default":"http://sprites.test/25.png"}}"#;

/// Serve a single canned response and return the base URL.
async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 2048];
        let _ = socket.read(&mut request).await;
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{addr}/api/v2")
}

#[tokio::test]
async fn test_fetch_pokemon_success() {
    let base = serve_once("200 OK", PIKACHU).await;

    let record = api::fetch_pokemon(&api::pokemon_url(&base, "Pikachu"))
        .await
        .unwrap();

    assert_eq!(record.id, 25);
    assert_eq!(record.name, "pikachu");
    assert_eq!(record.types, vec!["electric"]);
    assert_eq!(
        record.sprite_url.as_deref(),
        Some("http://sprites.test/25.png")
    );
}

#[tokio::test]
async fn test_fetch_pokemon_not_found() {
    let base = serve_once("404 Not Found", "Not Found").await;

    let error = api::fetch_pokemon(&api::pokemon_url(&base, "notarealmon"))
        .await
        .unwrap_err();

    assert_eq!(error, SearchError::NotFound("notarealmon".into()));
    assert_eq!(error.message(), "Pokemon not found");
}

#[tokio::test]
async fn test_fetch_pokemon_malformed_body() {
    let base = serve_once("200 OK", r#"{"id":"twenty-five"}"#).await;

    let error = api::fetch_pokemon(&api::pokemon_url(&base, "25"))
        .await
        .unwrap_err();

    assert!(matches!(error, SearchError::Parse(_)), "got {error:?}");
}

#[tokio::test]
async fn test_fetch_pokemon_server_error() {
    let base = serve_once("500 Internal Server Error", "").await;

    let error = api::fetch_pokemon(&api::pokemon_url(&base, "25"))
        .await
        .unwrap_err();

    assert_eq!(error, SearchError::Transport("server returned 500".into()));
}

#[tokio::test]
async fn test_fetch_pokemon_connection_refused() {
    // bind then drop so nothing is listening on the port
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = api::pokemon_url(&format!("http://{addr}/api/v2"), "pikachu");
    let error = api::fetch_pokemon(&url).await.unwrap_err();

    assert!(matches!(error, SearchError::Transport(_)), "got {error:?}");
    assert!(error.message().starts_with("Request failed: "));
}

#[tokio::test]
async fn test_fetch_bytes_rejects_error_status() {
    let base = serve_once("404 Not Found", "").await;

    let result = api::fetch_bytes(&format!("{base}/sprite.png")).await;

    assert!(result.is_err());
}
