use hr_related_job_positions::core::{ApiRequest, ServiceClient, Transport};
use hr_related_job_positions::{ConfigOverrides, HrRelatedJobPositionsService, SharpApiError};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serve a single canned HTTP response and hand back the raw request text
async fn serve_once(status_line: &'static str, body: String) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/api/v1", listener.local_addr().unwrap());
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];

        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            raw.extend_from_slice(&buf[..n]);
            if request_complete(&raw) {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        let _ = tx.send(String::from_utf8_lossy(&raw).into_owned());
    });

    (base_url, rx)
}

fn request_complete(raw: &[u8]) -> bool {
    let text = String::from_utf8_lossy(raw);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    raw.len() >= header_end + 4 + content_length
}

fn config_for(base_url: &str) -> hr_related_job_positions::SharpApiConfig {
    ConfigOverrides::default()
        .with_api_key("secret-key")
        .with_base_url(base_url)
        .with_user_agent("RelatedJobPositionsTest/1.0")
        .resolve()
        .unwrap()
}

#[tokio::test]
async fn post_carries_auth_headers_and_json_body() {
    let (base_url, request) = serve_once(
        "200 OK",
        json!({"status_url": "https://sharpapi.com/api/v1/job/status/1"}).to_string(),
    )
    .await;

    let service = HrRelatedJobPositionsService::new(config_for(&base_url)).unwrap();
    let status_url = service
        .related_job_positions("Software Engineer", Some("en"), Some(5))
        .await
        .unwrap();
    assert_eq!(status_url, "https://sharpapi.com/api/v1/job/status/1");

    let raw = request.await.unwrap();
    let lower = raw.to_ascii_lowercase();
    assert!(raw.starts_with("POST /api/v1/hr/related_job_positions HTTP/1.1"));
    assert!(lower.contains("authorization: bearer secret-key"));
    assert!(lower.contains("accept: application/json"));
    assert!(lower.contains("user-agent: relatedjobpositionstest/1.0"));

    let body = &raw[raw.find("\r\n\r\n").unwrap() + 4..];
    let body: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(
        body,
        json!({"content": "Software Engineer", "language": "en", "max_quantity": 5})
    );
}

#[tokio::test]
async fn non_success_status_becomes_http_error() {
    let (base_url, _request) =
        serve_once("422 Unprocessable Entity", json!({"message": "invalid"}).to_string()).await;

    let client = ServiceClient::new(&config_for(&base_url)).unwrap();
    let err = client
        .send(ApiRequest::post("/hr/related_job_positions", json!({"content": ""})))
        .await
        .unwrap_err();

    match err {
        SharpApiError::Http { status, body } => {
            assert_eq!(status, 422);
            assert!(body.contains("invalid"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    // Bind and drop to get a port nobody is listening on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ServiceClient::new(&config_for(&format!("http://{}", addr))).unwrap();
    let err = client
        .send(ApiRequest::get(format!("http://{}/job/status/1", addr)))
        .await
        .unwrap_err();

    assert!(matches!(err, SharpApiError::Transport(_)));
}
