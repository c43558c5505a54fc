//! No-mock tests for the HTTP report source.
//!
//! Spins up a real tiny_http server on a loopback port and checks:
//! - Request paths and query encoding
//! - Successful bundle decoding
//! - Non-success statuses surface as `FetchError::Status`
//! - Malformed bodies surface as `FetchError::Decode`
//! - Unreachable servers surface as `FetchError::Transport`

use std::thread;
use std::time::Duration;

use rv_common::{FetchError, Selection};
use rv_session::{HttpReportSource, ReportSource, SourceConfig};

// ============================================================================
// Helpers
// ============================================================================

/// Serve `responses` in order, one per request, then stop. The handle yields
/// the request URLs seen.
fn serve(responses: Vec<(u16, &'static str)>) -> (String, thread::JoinHandle<Vec<String>>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("bind loopback");
    let addr = server.server_addr().to_ip().expect("tcp listener");

    let handle = thread::spawn(move || {
        let mut seen = Vec::new();
        for (status, body) in responses {
            let request = match server.recv_timeout(Duration::from_secs(5)) {
                Ok(Some(r)) => r,
                _ => break,
            };
            seen.push(request.url().to_string());
            let header = "Content-Type: application/json"
                .parse::<tiny_http::Header>()
                .expect("static header");
            let response = tiny_http::Response::from_string(body)
                .with_status_code(status)
                .with_header(header);
            let _ = request.respond(response);
        }
        seen
    });

    (format!("http://{}", addr), handle)
}

fn source_for(base_url: &str) -> HttpReportSource {
    HttpReportSource::new(
        &SourceConfig::default()
            .with_base_url(base_url)
            .with_fetch_timeout(Duration::from_secs(5))
            .with_generate_timeout(Duration::from_secs(5)),
    )
}

const BUNDLE_JSON: &str = r##"{
    "host": "web01",
    "date": "2025-07-21",
    "report": "# Summary",
    "logs": "Jul 21 sshd: accepted key",
    "specs": "cpu: 8"
}"##;

// ============================================================================
// report-data
// ============================================================================

#[test]
fn test_fetch_decodes_bundle() {
    let (base, handle) = serve(vec![(200, BUNDLE_JSON)]);
    let bundle = source_for(&base)
        .fetch_report(&Selection::new("web01", "2025-07-21"))
        .expect("fetch");

    assert_eq!(bundle.host, "web01");
    assert_eq!(bundle.report, "# Summary");
    assert_eq!(bundle.specs, "cpu: 8");
    assert_eq!(
        handle.join().unwrap(),
        vec!["/report-data?host=web01&date=2025-07-21".to_string()]
    );
}

#[test]
fn test_fetch_encodes_query_values() {
    let (base, handle) = serve(vec![(200, BUNDLE_JSON)]);
    source_for(&base)
        .fetch_report(&Selection::new("web 01&x", "a=b"))
        .expect("fetch");

    assert_eq!(
        handle.join().unwrap(),
        vec!["/report-data?host=web%2001%26x&date=a%3Db".to_string()]
    );
}

#[test]
fn test_fetch_server_error_is_status() {
    let (base, handle) = serve(vec![(500, "boom")]);
    let err = source_for(&base)
        .fetch_report(&Selection::new("web01", "d"))
        .unwrap_err();

    assert_eq!(err, FetchError::Status(500));
    handle.join().unwrap();
}

#[test]
fn test_fetch_malformed_body_is_decode_error() {
    let (base, handle) = serve(vec![(200, "<html>not json</html>")]);
    let err = source_for(&base)
        .fetch_report(&Selection::new("web01", "d"))
        .unwrap_err();

    assert_eq!(err.kind(), "decode");
    handle.join().unwrap();
}

#[test]
fn test_fetch_unreachable_server_is_transport_error() {
    // Grab a free port, then release it so nothing is listening.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .and_then(|l| l.local_addr())
        .map(|a| a.port())
        .expect("probe port");

    let err = source_for(&format!("http://127.0.0.1:{port}"))
        .fetch_report(&Selection::new("web01", "d"))
        .unwrap_err();

    assert_eq!(err.kind(), "transport");
}

// ============================================================================
// report-generate
// ============================================================================

#[test]
fn test_generate_ignores_body_on_success() {
    let (base, handle) = serve(vec![(200, "Report generated, not json")]);
    source_for(&base)
        .generate_report(&Selection::new("web01", "2025-07-21"))
        .expect("generate");

    assert_eq!(
        handle.join().unwrap(),
        vec!["/report-generate?host=web01&date=2025-07-21".to_string()]
    );
}

#[test]
fn test_generate_failure_status_message() {
    let (base, handle) = serve(vec![(502, "model offline")]);
    let err = source_for(&base)
        .generate_report(&Selection::new("web01", "d"))
        .unwrap_err();

    assert_eq!(err.to_string(), "Response status: 502");
    handle.join().unwrap();
}
