// ==========================================
// 销售看板 - 远程接口数据源集成测试
// ==========================================
// 本地 TCP 监听返回固定 HTTP 响应
// ==========================================

use sales_dashboard::api::DashboardApi;
use sales_dashboard::source::{ApiRecordSource, FetchError, RecordSource};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// 启动单次响应的 HTTP 服务,返回根地址与收到的请求行
async fn serve_once(status_line: &str, body: &str) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_line,
        body.len(),
        body
    );
    let (request_tx, request_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let request = String::from_utf8_lossy(&buf).to_string();
        let first_line = request.lines().next().unwrap_or_default().to_string();
        let _ = request_tx.send(first_line);

        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
    });

    (format!("http://{}/api/", addr), request_rx)
}

fn source(base_url: &str) -> ApiRecordSource {
    ApiRecordSource::new(base_url, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_success_envelope() {
    let body = r#"{"success":true,"timestamp":"2024-03-01T10:00:00Z","data":[{"AÑO":2024,"MES":"ENE","VENTAS":"1.000","META1":2000},42]}"#;
    let (base_url, request) = serve_once("200 OK", body).await;

    let batch = source(&base_url).fetch_batch().await.unwrap();

    assert_eq!(request.await.unwrap(), "GET /api/ventas HTTP/1.1");
    assert_eq!(batch.timestamp, "2024-03-01T10:00:00Z");
    // 非对象元素被跳过
    assert_eq!(batch.records.len(), 1);
}

#[tokio::test]
async fn test_non_2xx_is_transport_failure() {
    let (base_url, _request) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;

    let err = source(&base_url).fetch_batch().await.unwrap_err();
    match err {
        FetchError::HttpStatus { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_success_false_is_contract_violation() {
    let (base_url, _request) = serve_once("200 OK", r#"{"success":false,"data":[]}"#).await;

    let err = source(&base_url).fetch_batch().await.unwrap_err();
    assert!(err.is_contract_violation());
}

#[tokio::test]
async fn test_api_refresh_end_to_end() {
    let body = r#"{"success":true,"data":[{"ano":2024,"mes":"ene","ventas":"1.000.000","meta1":"800000"},{"ano":2024,"mes":"FEB","ventas":500000,"meta1":1000000,"cumplimiento1":50}]}"#;
    let (base_url, _request) = serve_once("200 OK", body).await;

    let api = DashboardApi::new(Arc::new(source(&base_url)));
    let summary = api.refresh().await.unwrap();
    assert_eq!(summary.record_count, 2);

    let views = api.views();
    assert!((views.summary.attainment1 - 1_500_000.0 / 1_800_000.0 * 100.0).abs() < 1e-9);
    assert_eq!(views.periods.len(), 2);
}
