use std::path::PathBuf;
use std::time::Duration;

use pretty_assertions::assert_eq;
use scraper_bridge::{JobOutcome, JobRequest, ReqwestSubmitter, SubmitSettings, Submitter};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> JobRequest {
    JobRequest {
        site: "vk".to_string(),
        keywords: "concert tickets".to_string(),
        max_pages: None,
        output_path: PathBuf::from("/tmp/out.xlsx"),
    }
}

fn settings_for(server: &MockServer) -> SubmitSettings {
    SubmitSettings {
        base_url: server.uri(),
        ..SubmitSettings::default()
    }
}

#[tokio::test]
async fn created_response_maps_to_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages/vk"))
        .and(body_json(json!({
            "filename": "/tmp/out.xlsx",
            "keywords": "concert tickets",
            "one_search_page_only": false,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!("/tmp/out.xlsx")))
        .mount(&server)
        .await;

    let submitter = ReqwestSubmitter::new(settings_for(&server));
    let outcome = submitter.submit(&request()).await;

    assert_eq!(
        outcome,
        JobOutcome::Success {
            status: 201,
            payload: Some(json!("/tmp/out.xlsx")),
        }
    );
}

#[tokio::test]
async fn error_status_is_preserved_with_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages/vk"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "site unreachable"})))
        .mount(&server)
        .await;

    let submitter = ReqwestSubmitter::new(settings_for(&server));
    let outcome = submitter.submit(&request()).await;

    assert_eq!(
        outcome,
        JobOutcome::Failure {
            status: Some(500),
            payload: Some(json!({"error": "site unreachable"})),
            detail: None,
        }
    );
}

#[tokio::test]
async fn bad_request_without_body_keeps_the_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages/vk"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let submitter = ReqwestSubmitter::new(settings_for(&server));
    let outcome = submitter.submit(&request()).await;

    assert!(!outcome.is_success());
    assert_eq!(outcome.status(), Some(400));
}

#[tokio::test]
async fn single_page_limit_sets_the_wire_flag() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages/bhf"))
        .and(body_json(json!({
            "filename": "/tmp/out.xlsx",
            "keywords": "rust jobs",
            "one_search_page_only": true,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!("/tmp/out.xlsx")))
        .mount(&server)
        .await;

    let submitter = ReqwestSubmitter::new(settings_for(&server));
    let outcome = submitter
        .submit(&JobRequest {
            site: "bhf".to_string(),
            keywords: "rust jobs".to_string(),
            max_pages: Some(1),
            output_path: PathBuf::from("/tmp/out.xlsx"),
        })
        .await;

    assert!(outcome.is_success());
}

#[tokio::test]
async fn connection_refused_maps_to_failure_without_status() {
    // Grab a port that answered once, then drop the server so it refuses.
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let submitter = ReqwestSubmitter::new(SubmitSettings {
        base_url: uri,
        connect_timeout: Duration::from_secs(2),
        request_timeout: None,
    });
    let outcome = submitter.submit(&request()).await;

    match outcome {
        JobOutcome::Failure {
            status,
            payload,
            detail,
        } => {
            assert_eq!(status, None);
            assert_eq!(payload, None);
            assert!(detail.is_some());
        }
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_backend_times_out_when_deadline_is_set() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/messages/vk"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!("ok")),
        )
        .mount(&server)
        .await;

    let submitter = ReqwestSubmitter::new(SubmitSettings {
        base_url: server.uri(),
        connect_timeout: Duration::from_secs(2),
        request_timeout: Some(Duration::from_millis(50)),
    });
    let outcome = submitter.submit(&request()).await;

    match outcome {
        JobOutcome::Failure { status, detail, .. } => {
            assert_eq!(status, None);
            assert!(detail.unwrap().contains("timeout"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
}
