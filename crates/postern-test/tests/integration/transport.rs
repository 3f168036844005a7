//! Tests for `HttpTransport` against a live loopback server.

use std::sync::Arc;
use std::time::Duration;

use postern_test::fixtures::SERVER_BUSY_FAULT;
use postern_transport::{
    CancelReason, CancellationToken, Credentials, Request, TransportError, TransportOptions,
};

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn non_success_status_keeps_the_body_byte_for_byte() {
    let server = start_mock_server(vec![
        Canned::new("503 Service Unavailable", SERVER_BUSY_FAULT)
            .header("Content-Type: text/xml; charset=utf-8"),
    ])
    .await;

    let err = transport(TransportOptions::default())
        .send(Request::post(server.url("/EWS/Exchange.asmx"), "<x/>"), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert!(!err.is_retryable());
    let response = err.into_response().unwrap();
    assert_eq!(response.reason(), "Service Unavailable");
    assert_eq!(response.content_type(), Some("text/xml; charset=utf-8"));
    assert_eq!(response.bytes().await.unwrap(), SERVER_BUSY_FAULT.as_bytes());
}

#[test_log::test(tokio::test)]
async fn fired_cancellation_sends_nothing() {
    let server = start_mock_server(vec![Canned::ok("<ok/>")]).await;
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = transport(TransportOptions::default())
        .send(Request::get(server.url("/")), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Cancelled(CancelReason::Caller)));
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(server.requests().is_empty());
}

#[test_log::test(tokio::test)]
async fn repeated_response_header_keeps_last_value() {
    let server = start_mock_server(vec![
        Canned::ok("<ok/>").header("X-Thing: a").header("X-Thing: b"),
    ])
    .await;

    let response = transport(TransportOptions::default())
        .send(Request::get(server.url("/")), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(response.header("x-thing"), Some("b"));
}

#[test_log::test(tokio::test)]
async fn response_metadata_and_double_close() {
    let server = start_mock_server(vec![Canned::ok("<ok/>")]).await;

    let mut response = transport(TransportOptions::default())
        .send(Request::get(server.url("/ews")), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.version(), postern_transport::Version::HTTP_11);
    assert_eq!(response.url(), server.url("/ews"));

    response.close();
    response.close();
    assert!(response.is_closed());
    assert!(response.take_body().is_none());
}

#[test_log::test(tokio::test)]
async fn outgoing_request_carries_configured_headers() {
    let server = start_mock_server(vec![Canned::ok("<ok/>")]).await;

    let response = transport(TransportOptions::default())
        .send(
            Request::post(server.url("/ews"), "<GetPerson/>").with_header("X-AnchorMailbox", "ann@contoso.com"),
            &CancellationToken::new(),
        )
        .await
        .unwrap();
    assert_eq!(response.text().await.unwrap(), "<ok/>");

    let requests = server.requests();
    let raw = &requests[0];
    assert!(raw.starts_with("POST /ews HTTP/1.1"));
    assert_eq!(request_header(raw, "content-type"), Some("text/xml; charset=utf-8"));
    assert_eq!(request_header(raw, "accept"), Some("text/xml"));
    assert!(request_header(raw, "user-agent").unwrap().starts_with("postern/"));
    assert_eq!(request_header(raw, "x-anchormailbox"), Some("ann@contoso.com"));
    assert_eq!(request_header(raw, "return-client-request-id"), Some("true"));
    assert_eq!(request_header(raw, "client-request-id").unwrap().len(), 36);
    assert!(request_header(raw, "authorization").is_none());
    assert!(raw.ends_with("<GetPerson/>"));
}

#[test_log::test(tokio::test)]
async fn client_request_id_can_be_turned_off() {
    let server = start_mock_server(vec![Canned::ok("")]).await;
    let options = TransportOptions {
        send_client_request_id: false,
        ..TransportOptions::default()
    };

    transport(options)
        .send(Request::get(server.url("/")), &CancellationToken::new())
        .await
        .unwrap();

    assert!(request_header(&server.requests()[0], "client-request-id").is_none());
}

#[test_log::test(tokio::test)]
async fn abort_cancels_in_flight_sends_only() {
    let stalled = start_stalling_server().await;
    let transport = Arc::new(transport(TransportOptions::default()));

    let pending = {
        let transport = Arc::clone(&transport);
        let url = stalled.url("/");
        tokio::spawn(async move {
            transport
                .send(Request::get(url), &CancellationToken::new())
                .await
        })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    transport.abort();

    let err = pending.await.unwrap().unwrap_err();
    assert!(matches!(err, TransportError::Cancelled(CancelReason::Aborted)));

    let server = start_mock_server(vec![Canned::ok("<ok/>")]).await;
    let response = transport
        .send(Request::get(server.url("/")), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[test_log::test(tokio::test)]
async fn caller_cancellation_interrupts_the_exchange() {
    let stalled = start_stalling_server().await;
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let err = transport(TransportOptions::default())
        .send(Request::get(stalled.url("/")), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Cancelled(CancelReason::Caller)));
    assert!(!err.is_retryable());
}

#[test_log::test(tokio::test)]
async fn elapsed_timeout_is_a_cancellation() {
    let stalled = start_stalling_server().await;

    let err = transport(TransportOptions::default())
        .send(
            Request::get(stalled.url("/")).with_timeout(Duration::from_millis(200)),
            &CancellationToken::new(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Cancelled(CancelReason::Timeout)));
}

#[test_log::test(tokio::test)]
async fn refused_connection_is_a_retryable_transport_error() {
    let addr = closed_port().await;

    let err = transport(TransportOptions::default())
        .send(Request::get(format!("http://{addr}/")), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Transport(_)));
    assert!(err.is_retryable());
}

#[test_log::test(tokio::test)]
async fn challenge_is_answered_once_with_credentials() {
    let server = start_mock_server(vec![
        Canned::new("401 Unauthorized", "").header("WWW-Authenticate: Basic realm=\"mail\""),
        Canned::ok("<ok/>"),
    ])
    .await;
    let options = TransportOptions {
        credentials: Some(Credentials::Basic {
            username: "ann".to_owned(),
            password: "pw".to_owned(),
        }),
        ..TransportOptions::default()
    };

    let response = transport(options)
        .send(Request::get(server.url("/")), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    assert!(request_header(&requests[0], "authorization").is_none());
    // base64("ann:pw")
    assert_eq!(request_header(&requests[1], "authorization"), Some("Basic YW5uOnB3"));
}

#[test_log::test(tokio::test)]
async fn pre_authenticate_sends_credentials_first() {
    let server = start_mock_server(vec![Canned::ok("")]).await;
    let options = TransportOptions {
        credentials: Some(Credentials::Bearer("token-1".to_owned())),
        pre_authenticate: true,
        ..TransportOptions::default()
    };

    transport(options)
        .send(Request::get(server.url("/")), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        request_header(&server.requests()[0], "authorization"),
        Some("Bearer token-1")
    );
}

#[test_log::test(tokio::test)]
async fn unanswerable_challenge_is_a_status_error() {
    let server = start_mock_server(vec![
        Canned::new("401 Unauthorized", "").header("WWW-Authenticate: Negotiate"),
    ])
    .await;
    let options = TransportOptions {
        credentials: Some(Credentials::Bearer("t".to_owned())),
        ..TransportOptions::default()
    };

    let err = transport(options)
        .send(Request::get(server.url("/")), &CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(server.requests().len(), 1);
}

#[test_log::test(tokio::test)]
async fn cookies_set_by_the_server_are_sent_back() {
    let server = start_mock_server(vec![
        Canned::ok("").header("Set-Cookie: exchangecookie=abc123; Path=/"),
        Canned::ok(""),
    ])
    .await;
    let transport = transport(TransportOptions::default());

    for _ in 0..2 {
        transport
            .send(Request::get(server.url("/ews")), &CancellationToken::new())
            .await
            .unwrap();
    }

    let requests = server.requests();
    assert!(request_header(&requests[0], "cookie").is_none());
    assert_eq!(request_header(&requests[1], "cookie"), Some("exchangecookie=abc123"));
}

#[test_log::test(tokio::test)]
async fn keep_alive_off_asks_the_server_to_close() {
    let server = start_mock_server(vec![Canned::ok("")]).await;
    let options = TransportOptions {
        keep_alive: false,
        ..TransportOptions::default()
    };

    transport(options)
        .send(Request::get(server.url("/")), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(request_header(&server.requests()[0], "connection"), Some("close"));
}

#[test_log::test(tokio::test)]
async fn disposed_transport_fails_later_sends() {
    let server = start_mock_server(vec![Canned::ok("")]).await;
    let transport = transport(TransportOptions::default());
    transport.dispose();

    let err = transport
        .send(Request::get(server.url("/")), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, TransportError::Disposed));
    assert!(server.requests().is_empty());
}

#[test_log::test(tokio::test)]
async fn reason_phrase_is_the_one_the_server_sent() {
    let server = start_mock_server(vec![
        Canned::new("503 Mailbox Move In Progress", SERVER_BUSY_FAULT),
        Canned::new("299 Partly Fine", ""),
        Canned::new("404 Not Found", ""),
    ])
    .await;
    let transport = transport(TransportOptions::default());

    let err = transport
        .send(Request::get(server.url("/")), &CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.response().unwrap().reason(), "Mailbox Move In Progress");

    let response = transport
        .send(Request::get(server.url("/")), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(response.status(), 299);
    assert_eq!(response.reason(), "Partly Fine");

    let err = transport
        .send(Request::get(server.url("/")), &CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.response().unwrap().reason(), "Not Found");
}

#[test_log::test(tokio::test)]
async fn truncated_body_is_a_transport_error_not_an_empty_body() {
    let server = start_mock_server(vec![
        Canned::ok("<Partial").declared_length(100),
        Canned::ok(""),
    ])
    .await;
    let transport = transport(TransportOptions::default());

    let truncated = transport
        .send(Request::get(server.url("/")), &CancellationToken::new())
        .await
        .unwrap();
    let err = truncated.bytes().await.unwrap_err();
    assert!(matches!(err, TransportError::Transport(_)), "got {err:?}");
    assert!(err.is_retryable());

    let empty = transport
        .send(Request::get(server.url("/")), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(empty.bytes().await.unwrap(), Vec::<u8>::new());
}

#[test_log::test(tokio::test)]
async fn caller_headers_replace_transport_defaults() {
    let server = start_mock_server(vec![Canned::ok("")]).await;

    transport(TransportOptions::default())
        .send(
            Request::post(server.url("/"), "<x/>")
                .with_header("Accept", "application/soap+xml")
                .with_header("User-Agent", "custom-agent/2"),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    let requests = server.requests();
    let raw = &requests[0];
    let accept_lines = raw
        .lines()
        .filter(|line| line.to_ascii_lowercase().starts_with("accept:"))
        .count();
    assert_eq!(accept_lines, 1);
    assert_eq!(request_header(raw, "accept"), Some("application/soap+xml"));
    assert_eq!(request_header(raw, "user-agent"), Some("custom-agent/2"));
    assert_eq!(request_header(raw, "content-type"), Some("text/xml; charset=utf-8"));
}
