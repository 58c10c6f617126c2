//! Integration tests for the image generation client against a raw TCP
//! server that returns canned responses.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use creative404_imagegen::{ImageGenClient, ImageGenConfig, ImageGenError};
use creative404_types::{ErrorKind, InspectionResult, McpToolInfo};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Raw request text (head + body) as seen by the server.
type Recorded = Arc<Mutex<Vec<String>>>;

fn http_response(status: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

async fn start_test_server(response: String) -> (String, Recorded) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let recorded_clone = Arc::clone(&recorded);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = Vec::new();
            let mut chunk = [0u8; 8192];
            // Read until the declared body has arrived.
            loop {
                let n = match socket.read(&mut chunk).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => n,
                };
                buf.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&buf).to_string();
                if let Some(pos) = text.find("\r\n\r\n") {
                    let content_length = text[..pos]
                        .lines()
                        .filter_map(|l| l.split_once(':'))
                        .find(|(k, _)| k.trim().eq_ignore_ascii_case("content-length"))
                        .and_then(|(_, v)| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if buf.len() >= pos + 4 + content_length {
                        break;
                    }
                }
            }
            recorded_clone
                .lock()
                .unwrap()
                .push(String::from_utf8_lossy(&buf).to_string());
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{addr}/v1/images/generations"), recorded)
}

fn client(endpoint: &str, timeout_ms: u64) -> ImageGenClient {
    ImageGenClient::new(ImageGenConfig {
        api_key: Some("sk-test".into()),
        endpoint: endpoint.to_string(),
        timeout_ms,
        ..ImageGenConfig::default()
    })
    .unwrap()
}

fn inspection() -> InspectionResult {
    InspectionResult {
        success: true,
        error_message: None,
        error_kind: None,
        server_name: "Weather".into(),
        server_version: "1.0".into(),
        protocol_version: "2024-11-05".into(),
        tools: vec![McpToolInfo {
            name: "forecast".into(),
            description: "Get a forecast".into(),
            input_schema: serde_json::json!({"type": "object"}),
        }],
        tools_error: None,
    }
}

#[tokio::test]
async fn generate_returns_url_and_revised_prompt() {
    let (endpoint, requests) = start_test_server(http_response(
        "200 OK",
        r#"{"created":1700000000,"data":[{"url":"https://img.example/1.png","revised_prompt":"a cat"}]}"#,
    ))
    .await;

    let image = client(&endpoint, 5_000).generate(&inspection()).await.unwrap();
    assert_eq!(image.image_url, "https://img.example/1.png");
    assert_eq!(image.revised_prompt.as_deref(), Some("a cat"));

    let requests = requests.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    let raw = &requests[0];
    assert!(raw.starts_with("POST /v1/images/generations"));
    assert!(raw.to_ascii_lowercase().contains("authorization: bearer sk-test"));

    let body = &raw[raw.find("\r\n\r\n").unwrap() + 4..];
    let json: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(json["model"], "dall-e-3");
    assert_eq!(json["n"], 1);
    assert_eq!(json["size"], "1024x1024");
    assert_eq!(json["response_format"], "url");
    assert!(
        json["prompt"]
            .as_str()
            .unwrap()
            .contains("forecast (Get a forecast)")
    );
}

#[tokio::test]
async fn revised_prompt_is_optional() {
    let (endpoint, _) = start_test_server(http_response(
        "200 OK",
        r#"{"created":1,"data":[{"url":"https://img.example/2.png"}]}"#,
    ))
    .await;

    let image = client(&endpoint, 5_000).generate(&inspection()).await.unwrap();
    assert!(image.revised_prompt.is_none());
}

#[tokio::test]
async fn empty_data_is_an_error() {
    let (endpoint, _) =
        start_test_server(http_response("200 OK", r#"{"created":1,"data":[]}"#)).await;

    let err = client(&endpoint, 5_000).generate(&inspection()).await.unwrap_err();
    assert!(matches!(err, ImageGenError::EmptyResponse));
    assert_eq!(err.kind(), ErrorKind::Protocol);
}

#[tokio::test]
async fn entry_without_url_is_an_error() {
    for body in [
        r#"{"created":1,"data":[{"revised_prompt":"a cat"}]}"#,
        r#"{"created":1,"data":[{"url":"","revised_prompt":"a cat"}]}"#,
    ] {
        let (endpoint, _) = start_test_server(http_response("200 OK", body)).await;
        let err = client(&endpoint, 5_000).generate(&inspection()).await.unwrap_err();
        assert!(matches!(err, ImageGenError::EmptyResponse), "{body}");
    }
}

#[tokio::test]
async fn api_error_message_is_surfaced() {
    let (endpoint, _) = start_test_server(http_response(
        "400 Bad Request",
        r#"{"error":{"message":"Your request was rejected by the safety system."}}"#,
    ))
    .await;

    let err = client(&endpoint, 5_000).generate(&inspection()).await.unwrap_err();
    match &err {
        ImageGenError::Api { status, message } => {
            assert_eq!(*status, 400);
            assert_eq!(message, "Your request was rejected by the safety system.");
        }
        _ => panic!("Expected Api, got {err:?}"),
    }
    assert!(!err.kind().is_client_error());
}

#[tokio::test]
async fn unparseable_body_is_a_decode_error() {
    let (endpoint, _) = start_test_server(http_response("200 OK", "not json")).await;

    let err = client(&endpoint, 5_000).generate(&inspection()).await.unwrap_err();
    assert!(matches!(err, ImageGenError::Decode(_)));
}

#[tokio::test]
async fn slow_api_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(30)).await;
                drop(socket);
            });
        }
    });

    let err = client(&format!("http://{addr}/"), 200)
        .generate(&inspection())
        .await
        .unwrap_err();
    assert!(matches!(err, ImageGenError::Timeout));
    assert_eq!(err.to_string(), "Image generation timed out.");
}

#[tokio::test]
async fn connection_refused_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}/"), 2_000)
        .generate(&inspection())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.to_string().starts_with("Image generation failed"));
}
