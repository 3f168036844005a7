//! Tests for `ServiceClient::execute` over the real and the fake transport.

use postern_client::{ClientError, ServiceClient};
use postern_test::FakeTransport;
use postern_test::fixtures::{PERSON_ENVELOPE, SERVER_BUSY_FAULT};
use postern_transport::{CancellationToken, Request, TransportError, TransportOptions};
use postern_xml::ParseErrorKind;
use postern_xml::people::{InsightContent, Person};

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn execute_decodes_a_person_from_a_live_reply() {
    let server = start_mock_server(vec![
        Canned::ok(PERSON_ENVELOPE).header("Content-Type: text/xml; charset=utf-8"),
    ])
    .await;
    let client = ServiceClient::with_options(TransportOptions::default(), Some(server.url("/EWS/Exchange.asmx")))
        .unwrap();

    let request = client.post("<GetPerson/>").unwrap();
    let person: Person = client
        .execute(request, "Person", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(person.email_address(), Some("ann@contoso.com"));
    assert_eq!(person.display_name(), Some("Ann Smith"));

    let insights = person.insights().unwrap();
    assert_eq!(insights.len(), 2);
    let Some(InsightContent::Skill(skill)) = insights.items()[0].content() else {
        panic!("expected a skill insight");
    };
    assert_eq!(skill.name(), Some("Rust"));
    assert_eq!(skill.base().insight_source(), Some("Graph"));
    let Some(InsightContent::String(note)) = insights.items()[1].content() else {
        panic!("expected a string insight");
    };
    assert_eq!(note.data(), Some("On leave & travelling"));
}

#[test_log::test(tokio::test)]
async fn execute_surfaces_status_errors_with_their_body() {
    let transport = FakeTransport::new();
    transport.push_response(503, SERVER_BUSY_FAULT);
    let client = ServiceClient::new(transport);

    let err = client
        .execute::<Person>(Request::get("http://fake/"), "Person", &CancellationToken::new())
        .await
        .unwrap_err();

    let ClientError::Transport(err) = err else {
        panic!("expected a transport error, got {err:?}");
    };
    assert_eq!(err.status(), Some(503));
    let body = err.into_response().unwrap().bytes().await.unwrap();
    assert_eq!(body, SERVER_BUSY_FAULT.as_bytes());
}

#[test_log::test(tokio::test)]
async fn execute_reports_malformed_values_as_parse_errors() {
    let transport = FakeTransport::new();
    transport.push_response(
        200,
        "<Person><Insights><Insight><Rank>high</Rank></Insight></Insights></Person>",
    );
    let client = ServiceClient::new(transport);

    let err = client
        .execute::<Person>(Request::get("http://fake/"), "Person", &CancellationToken::new())
        .await
        .unwrap_err();

    let ClientError::Parse(err) = err else {
        panic!("expected a parse error, got {err:?}");
    };
    assert_eq!(err.kind, ParseErrorKind::InvalidValue);
    assert_eq!(err.element.as_deref(), Some("Rank"));
}

#[test_log::test(tokio::test)]
async fn execute_without_the_element_is_a_missing_element() {
    let transport = FakeTransport::new();
    transport.push_response(200, "<Envelope><Body/></Envelope>");
    let client = ServiceClient::new(transport);

    let err = client
        .execute::<Person>(Request::get("http://fake/"), "Person", &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Parse(ref e) if e.kind == ParseErrorKind::MissingElement));
}

#[test_log::test(tokio::test)]
async fn fired_cancellation_reaches_no_transport() {
    let transport = FakeTransport::new();
    transport.push_response(200, "<Person/>");
    let client = ServiceClient::new(transport);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client
        .execute::<Person>(Request::get("http://fake/"), "Person", &cancel)
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert!(client.transport().requests().is_empty());
}

#[test_log::test(tokio::test)]
async fn transport_failures_stay_retryable_through_the_client() {
    let transport = FakeTransport::new();
    transport.push_outcome(Err(TransportError::Transport("connection reset".into())));
    let client = ServiceClient::new(transport);

    let err = client
        .execute::<Person>(Request::get("http://fake/"), "Person", &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    assert!(!err.is_cancelled());
}

#[test]
fn abort_is_forwarded_to_the_transport() {
    let client = ServiceClient::new(FakeTransport::new());
    client.abort();
    assert_eq!(client.transport().abort_count(), 1);
}
