//! Integration tests for `BioClient` against a mock bio-generation service.

use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use leadgen::client::{BioClient, BioService};
use leadgen::errors::FlowError;
use leadgen::flow::{BatchFlow, FlowState, BATCH_FAILED_MSG};
use leadgen::models::LeadQuery;

fn query() -> LeadQuery {
    LeadQuery::from_free_text("Ada Lovelace", "Analytical Engines")
}

#[tokio::test]
async fn single_lead_posts_json_and_decodes_output() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate_bio"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "first": "Ada",
            "last": "Lovelace",
            "company": "Analytical Engines"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": { "bio": "B", "email": "e@x.com", "phone": "555-0100" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = BioClient::new(mock_server.uri());
    let lead = client.generate_bio(&query()).await.unwrap();

    assert_eq!(lead.bio, "B");
    assert_eq!(lead.email, "e@x.com");
    assert_eq!(lead.phone.as_deref(), Some("555-0100"));
}

#[tokio::test]
async fn service_error_payload_becomes_service_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate_bio"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "error": "no results for lead" })),
        )
        .mount(&mock_server)
        .await;

    let client = BioClient::new(mock_server.uri());
    let err = client.generate_bio(&query()).await.unwrap_err();

    match err {
        FlowError::Service(message) => assert_eq!(message, "no results for lead"),
        other => panic!("expected service error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_envelope_is_a_service_error_not_a_silent_no_op() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate_bio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let client = BioClient::new(mock_server.uri());
    let err = client.generate_bio(&query()).await.unwrap_err();

    match err {
        FlowError::Service(message) => {
            assert_eq!(message, "Bio service returned an empty response.")
        }
        other => panic!("expected service error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_success_status_fails_before_reading_the_body() {
    let mock_server = MockServer::start().await;

    // Body is deliberately not the envelope shape; the client must not care.
    Mock::given(method("POST"))
        .and(path("/generate_bio"))
        .respond_with(ResponseTemplate::new(503).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let client = BioClient::new(mock_server.uri());
    let err = client.generate_bio(&query()).await.unwrap_err();

    assert!(matches!(err, FlowError::Network(503)));
}

#[tokio::test]
async fn malformed_success_body_is_a_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate_bio"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = BioClient::new(mock_server.uri());
    let err = client.generate_bio(&query()).await.unwrap_err();

    assert!(matches!(err, FlowError::Parse(_)));
}

#[tokio::test]
async fn batch_uploads_the_file_as_multipart_and_decodes_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate_batch_bio"))
        // Multipart bodies carry the field name, file name, and file content
        // in the clear; matching on those is enough to pin the upload shape.
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"leads.csv\""))
        .and(body_string_contains("name,company\nA,C"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "name": "A", "company": "C", "email": "a@b.com", "bio": "bio" }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = BioClient::new(mock_server.uri());
    let rows = client
        .generate_batch_bio("leads.csv", b"name,company\nA,C\n".to_vec())
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].email, "a@b.com");
}

#[tokio::test]
async fn batch_non_success_status_is_a_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate_batch_bio"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = BioClient::new(mock_server.uri());
    let err = client
        .generate_batch_bio("leads.csv", b"name\nA\n".to_vec())
        .await
        .unwrap_err();

    assert!(matches!(err, FlowError::Network(500)));
}

#[tokio::test]
async fn batch_flow_end_to_end_writes_the_download_csv() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate_batch_bio"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                { "name": "A", "company": "C", "email": "a@b.com", "bio": "Has \"quotes\"" }
            ]
        })))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("leads.csv");
    std::fs::write(&input, "name,company\nA,C\n").unwrap();
    let output = dir.path().join("generated_bios.csv");

    let client = BioClient::new(mock_server.uri());
    let mut flow = BatchFlow::new();
    flow.submit(&client, Some(&input), &output).await;

    assert!(matches!(flow.state, FlowState::Success(_)));
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Name,Company,Email,Bio\n\"A\",\"C\",\"a@b.com\",\"Has \"\"quotes\"\"\"\n"
    );
}

#[tokio::test]
async fn batch_flow_surfaces_one_message_for_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate_batch_bio"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("leads.csv");
    std::fs::write(&input, "name\nA\n").unwrap();

    let client = BioClient::new(mock_server.uri());
    let mut flow = BatchFlow::new();
    flow.submit(&client, Some(&input), &dir.path().join("out.csv"))
        .await;

    assert_eq!(flow.state, FlowState::Failed(BATCH_FAILED_MSG.to_string()));
}
