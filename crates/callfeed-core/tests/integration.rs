use callfeed_core::config::PipelineConfig;
use callfeed_core::error::{ErrorKind, PipelineError};
use callfeed_core::fetch::{Fetch, FileFetcher, HttpFetcher};
use callfeed_core::payload::shape::PayloadShape;
use callfeed_core::records::model::CanonicalRecord;
use callfeed_core::report::model::{FeedReport, ToolInfo};
use callfeed_core::report::render::{Presenter, TextPresenter};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Path to the fixtures directory relative to the crate root.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn read_fixture(name: &str) -> Vec<u8> {
    let path = fixtures_dir().join(name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("failed to read {name}: {e}"))
}

/// Runs the synchronous pipeline over a fixture with default settings.
fn process_fixture(name: &str) -> Result<Vec<CanonicalRecord>, PipelineError> {
    callfeed_core::process(&read_fixture(name), &PipelineConfig::default())
}

fn tool() -> ToolInfo {
    ToolInfo {
        name: "callfeed".into(),
        version: "0.1.0-test".into(),
    }
}

/// Loads a fixture through the file fetcher and the full load cycle.
async fn load_fixture(name: &str, config: &PipelineConfig) -> FeedReport {
    let fetcher = FileFetcher::new(fixtures_dir().join(name));
    callfeed_core::load(&fetcher, config, tool()).await
}

fn labels(records: &[CanonicalRecord]) -> Vec<&str> {
    records.iter().map(|r| r.caller_label.as_str()).collect()
}

/// Serves exactly one HTTP response on a random local port.
///
/// Returns the endpoint URL and a receiver for the raw request head.
async fn serve_once(
    status_line: &'static str,
    body: &'static str,
) -> (String, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        let _ = tx.send(String::from_utf8_lossy(&head).into_owned());

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });

    (format!("http://{addr}/last5"), rx)
}

fn local_fetcher(endpoint: String, timeout: Duration) -> HttpFetcher {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    HttpFetcher::with_client(client, endpoint, timeout)
}

#[test]
fn bare_array_selects_latest_five() {
    let records = process_fixture("bare_array.json").unwrap();

    assert_eq!(
        labels(&records),
        vec![
            "+13035550102",
            "+13035550106",
            "+13035550104",
            "+13035550107",
            "+13035550103",
        ]
    );
    assert_eq!(
        records[0].candidates,
        vec!["303-555-CAKE", "303-555-BAKE", "303-555-LAKE"]
    );
    assert!(records[4].candidates.is_empty());
}

#[test]
fn items_wrapper_from_api_handler() {
    let records = process_fixture("items_wrapped.json").unwrap();

    assert_eq!(labels(&records), vec!["+12065550199", "+12065550188"]);
    assert_eq!(records[1].candidates, vec!["206-555-TACO", "206-555-0188"]);
}

#[test]
fn proxy_envelope_yields_single_record() {
    let records = process_fixture("proxy_envelope.json").unwrap();

    assert_eq!(
        records,
        vec![CanonicalRecord {
            caller_label: "+15551234".into(),
            created_at: "2024-01-01T00:00:00Z".into(),
            candidates: vec!["555-FLOWERS".into()],
        }]
    );
}

#[test]
fn proxy_envelope_around_items_wrapper() {
    let records = process_fixture("proxy_items_envelope.json").unwrap();

    assert_eq!(labels(&records), vec!["+17205550123"]);
    assert_eq!(records[0].candidates, vec!["720-555-PIZZA", "720-555-0123"]);
}

#[test]
fn legacy_raw_and_timestamp_aliases() {
    let records = process_fixture("legacy_raw.json").unwrap();

    assert_eq!(labels(&records), vec!["+19705550112", "+19705550111"]);
    assert_eq!(records[0].created_at, "2024-01-01T00:01:00Z");
    assert!(records[0].candidates.is_empty());
    assert_eq!(records[1].created_at, "2023-12-31T23:59:00Z");
    assert_eq!(records[1].candidates, vec!["970-555-SNOW", "970-555-0111"]);
}

#[test]
fn malformed_items_never_abort_the_payload() {
    let config = PipelineConfig {
        limit: 10,
        ..Default::default()
    };
    let records = callfeed_core::process(&read_fixture("mixed_shapes.json"), &config).unwrap();

    assert_eq!(records.len(), 6);
    assert_eq!(records[0].caller_label, "+18005550101");
    assert!(records[0].candidates.is_empty());

    // Unknown times keep their input order behind the dated record.
    assert_eq!(
        labels(&records[1..]),
        vec!["Unknown", "Unknown", "Unknown", "Unknown", "+18005550100"]
    );
    assert_eq!(records[5].candidates, vec!["800-555-HELP"]);
    assert_eq!(records[5].created_at, "not a date");
}

#[test]
fn default_limit_drops_oldest_unknowns() {
    let records = process_fixture("mixed_shapes.json").unwrap();

    assert_eq!(records.len(), 5);
    assert!(!labels(&records).contains(&"+18005550100"));
}

#[test]
fn empty_and_unrecognized_payloads_are_not_errors() {
    assert!(process_fixture("empty.json").unwrap().is_empty());
    assert!(process_fixture("unrecognized.json").unwrap().is_empty());
    assert!(callfeed_core::process(b"42", &PipelineConfig::default())
        .unwrap()
        .is_empty());
}

#[test]
fn truncated_payload_is_malformed() {
    let err = process_fixture("truncated.json").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedPayload);
}

#[test]
fn error_envelope_default_and_strict() {
    assert!(process_fixture("error_envelope.json").unwrap().is_empty());

    let strict = PipelineConfig {
        strict_envelope: true,
        ..Default::default()
    };
    let err = callfeed_core::process(&read_fixture("error_envelope.json"), &strict).unwrap_err();
    assert_eq!(err, PipelineError::http_status(500));
}

#[tokio::test]
async fn file_load_cycle_reports_payload_metadata() {
    let report = load_fixture("proxy_envelope.json", &PipelineConfig::default()).await;

    assert!(report.is_ok());
    let payload = report.payload.as_ref().expect("payload info present");
    assert_eq!(payload.shape, Some(PayloadShape::ProxyEnvelope));
    assert_eq!(payload.hash.algorithm, "sha256");
    assert_eq!(payload.hash.value.len(), 64);
    assert!(payload.source.ends_with("proxy_envelope.json"));
}

#[tokio::test]
async fn identical_payloads_share_a_fingerprint() {
    let a = load_fixture("bare_array.json", &PipelineConfig::default()).await;
    let b = load_fixture("bare_array.json", &PipelineConfig::default()).await;
    let c = load_fixture("empty.json", &PipelineConfig::default()).await;

    assert_eq!(a.payload_hash(), b.payload_hash());
    assert_ne!(a.payload_hash(), c.payload_hash());
}

#[tokio::test]
async fn empty_payload_renders_empty_state() {
    let report = load_fixture("empty.json", &PipelineConfig::default()).await;
    let text = TextPresenter::default().render(&report).unwrap();

    assert_eq!(report.exit_code(), 0);
    assert!(text.contains("No calls yet."));
    assert!(!text.contains("Couldn't load"));
}

#[tokio::test]
async fn http_fetch_sends_accept_header_and_decodes() {
    let (endpoint, request) = serve_once(
        "200 OK",
        r#"{"items":[{"caller":"+15550001","created_at":"2024-01-01T00:00:00Z","top3":["555-0001"]}]}"#,
    )
    .await;

    let fetcher = local_fetcher(endpoint.clone(), Duration::from_secs(5));
    let report = callfeed_core::load(&fetcher, &PipelineConfig::default(), tool()).await;

    assert!(report.is_ok(), "unexpected failure: {:?}", report.outcome);
    assert_eq!(labels(report.records()), vec!["+15550001"]);
    assert_eq!(report.payload.as_ref().unwrap().source, endpoint);

    let head = request.await.unwrap().to_ascii_lowercase();
    assert!(head.starts_with("get /last5 http/1.1"));
    assert!(head.contains("accept: application/json"));
}

#[tokio::test]
async fn http_non_success_status_is_transport_failure() {
    let (endpoint, _request) = serve_once("503 Service Unavailable", "{}").await;

    let err = local_fetcher(endpoint, Duration::from_secs(5))
        .fetch()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TransportFailure);
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.to_string(), "HTTP 503");
}

#[tokio::test]
async fn http_timeout_is_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        // Accept and hold the connection without answering.
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
    });

    let err = local_fetcher(format!("http://{addr}/last5"), Duration::from_millis(200))
        .fetch()
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TransportFailure);
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn refused_connection_renders_error_state() {
    // Bind then drop to get a port nothing listens on.
    let addr = TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap()
        .local_addr()
        .unwrap();

    let fetcher = local_fetcher(format!("http://{addr}/last5"), Duration::from_secs(2));
    let report = callfeed_core::load(&fetcher, &PipelineConfig::default(), tool()).await;
    let text = TextPresenter::default().render(&report).unwrap();

    assert_eq!(report.exit_code(), 1);
    assert!(report.payload.is_none());
    assert!(text.contains("Couldn't load recent calls ("));
}
