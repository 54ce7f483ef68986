use std::sync::{Arc, Mutex};
use std::time::Duration;

use parse_client::{ClientConfig, ErrorCode, ParseClient, ParseOptions, ParseRequest, ParseResult};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Debug, Clone)]
struct Recorded {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl Recorded {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }

    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

type Log = Arc<Mutex<Vec<Recorded>>>;

/// Serves one scripted `(status, body)` per connection, in order, and records
/// each request. Connections past the script get a 500.
async fn fake_server(script: Vec<(u16, &'static str)>) -> (String, Log) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: Log = Arc::new(Mutex::new(Vec::new()));
    let seen = log.clone();

    tokio::spawn(async move {
        let mut script = script.into_iter();
        loop {
            let Ok((mut stream, _)) = listener.accept().await else { break };
            let recorded = read_request(&mut stream).await;
            seen.lock().unwrap().push(recorded);
            let (status, body) = script.next().unwrap_or((500, r#"{"error":"script exhausted"}"#));
            let response = format!(
                "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    (format!("http://{}", addr), log)
}

async fn read_request(stream: &mut TcpStream) -> Recorded {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        let n = stream.read(&mut chunk).await.unwrap();
        assert!(n > 0, "client closed before sending headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.split("\r\n");
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers: Vec<(String, String)> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
        .collect();

    let length: usize = headers
        .iter()
        .find(|(k, _)| k == "content-length")
        .and_then(|(_, v)| v.parse().ok())
        .unwrap_or(0);
    while buf.len() < header_end + length {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

    Recorded { request_line, headers, body }
}

fn client(base: &str) -> ParseClient {
    let config = ClientConfig::new(base)
        .with_timeout(Duration::from_secs(5))
        .with_retry(true, Duration::from_millis(10));
    ParseClient::new(config).unwrap()
}

fn detailed_request() -> ParseRequest {
    ParseRequest::new("title: Hello\nbody: world")
        .with_format("yaml")
        .with_options(ParseOptions {
            extract_metadata: true,
            strict: true,
            ..ParseOptions::default()
        })
}

#[tokio::test]
async fn parse_success_sends_bearer_and_body() {
    let (base, log) = fake_server(vec![(200, r#"{"title":"Hello","body":"world"}"#)]).await;
    let mut client = client(&base);
    client.set_api_key("sk-test");

    let result = client.parse(&detailed_request()).await;
    assert!(result.is_ok());
    assert_eq!(result.attempts(), 1);
    assert_eq!(result.data().unwrap()["title"], "Hello");

    let requests = log.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].request_line.starts_with("POST /v1/parse "));
    assert_eq!(
        requests[0].header("authorization").map(str::to_lowercase).as_deref(),
        Some("bearer sk-test")
    );
    let sent = requests[0].json();
    assert_eq!(sent["format"], "yaml");
    assert_eq!(sent["options"]["strict"], true);
}

#[tokio::test]
async fn no_key_means_no_authorization_header() {
    let (base, log) = fake_server(vec![(200, "{}")]).await;
    let result = client(&base).parse(&ParseRequest::new("x")).await;
    assert!(result.is_ok());
    assert!(log.lock().unwrap()[0].header("authorization").is_none());
}

#[tokio::test]
async fn rate_limit_retries_once_simplified() {
    let (base, log) = fake_server(vec![
        (429, r#"{"error":"slow down"}"#),
        (200, r#"{"ok":true}"#),
    ])
    .await;

    let result = client(&base).parse(&detailed_request()).await;
    match result {
        ParseResult::Parsed(success) => {
            assert_eq!(success.attempts, 2);
            assert!(success.simplified);
            assert_eq!(success.data["ok"], true);
        }
        ParseResult::Failed(failure) => panic!("expected success, got {:?}", failure),
    }

    let requests = log.lock().unwrap().clone();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].json().get("options").is_some());
    let retried = requests[1].json();
    assert!(retried.get("options").is_none());
    assert_eq!(retried["content"], "title: Hello\nbody: world");
    assert_eq!(retried["format"], "yaml");
}

#[tokio::test]
async fn unauthorized_is_not_retried() {
    let (base, log) = fake_server(vec![(401, r#"{"error":"invalid key"}"#)]).await;
    let result = client(&base).parse(&detailed_request()).await;

    let failure = result.failure().expect("should fail");
    assert_eq!(failure.code, ErrorCode::Unauthorized);
    assert_eq!(failure.attempts, 1);
    assert!(failure.message.contains("invalid key"));
    assert!(failure.recovery.contains("API key"));
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn server_error_twice_reports_both_attempts() {
    let (base, log) = fake_server(vec![(500, "boom"), (503, "still down")]).await;
    let result = client(&base).parse(&detailed_request()).await;

    let failure = result.failure().expect("should fail");
    assert_eq!(failure.code, ErrorCode::Server);
    assert_eq!(failure.attempts, 2);
    assert!(failure.message.contains("still down"));
    assert_eq!(log.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn retry_can_be_disabled() {
    let (base, log) = fake_server(vec![(500, "boom")]).await;
    let config = ClientConfig::new(base).with_retry(false, Duration::ZERO);
    let result = ParseClient::new(config).unwrap().parse(&detailed_request()).await;

    assert_eq!(result.failure().unwrap().attempts, 1);
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn refused_connection_is_a_network_failure() {
    // Bind then drop to get a port with nothing listening.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = client(&format!("http://{}", addr)).parse(&ParseRequest::new("x")).await;
    let failure = result.failure().expect("should fail");
    assert_eq!(failure.code, ErrorCode::Network);
    assert_eq!(failure.attempts, 2);
}

#[tokio::test]
async fn empty_content_fails_without_a_request() {
    let (base, log) = fake_server(vec![]).await;
    let result = client(&base).parse(&ParseRequest::new("   ")).await;

    let failure = result.failure().expect("should fail");
    assert_eq!(failure.code, ErrorCode::InvalidInput);
    assert_eq!(failure.attempts, 0);
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn slow_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(5)).await;
                drop(stream);
            });
        }
    });

    let config = ClientConfig::new(format!("http://{}", addr))
        .with_timeout(Duration::from_millis(200))
        .with_retry(false, Duration::ZERO);
    let result = ParseClient::new(config).unwrap().parse(&ParseRequest::new("x")).await;
    assert_eq!(result.failure().unwrap().code, ErrorCode::Timeout);
}

#[tokio::test]
async fn health_check_reads_status() {
    let (base, log) =
        fake_server(vec![(200, r#"{"status":"ok","timestamp":"2026-01-01T00:00:00Z"}"#)]).await;
    let mut client = client(&base);
    client.set_api_key("sk-test");

    let health = client.health_check().await.unwrap();
    assert!(health.is_healthy());
    assert_eq!(health.timestamp, "2026-01-01T00:00:00Z");

    let requests = log.lock().unwrap().clone();
    assert!(requests[0].request_line.starts_with("GET /health "));
    assert!(requests[0].header("authorization").is_some());
}

#[tokio::test]
async fn health_check_surfaces_status_errors() {
    let (base, _log) = fake_server(vec![(503, r#"{"message":"maintenance"}"#)]).await;
    let err = client(&base).health_check().await.unwrap_err();
    assert_eq!(err.code(), ErrorCode::Server);
    assert!(err.to_string().contains("maintenance"));
}
