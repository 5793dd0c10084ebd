//! End-to-end tests for the streaming generation flow against a mock backend.

use codemyth_client::{
    CodemythBackend, DocBackend, DocumentAccumulator, Error, GenerationMethod, GenerationRequest,
    RefineRequest, RepoId, StreamEvent,
};
use futures_util::StreamExt;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn groq_request() -> GenerationRequest {
    GenerationRequest::new(
        RepoId::new("octocat", "hello-world"),
        "gho_token",
        GenerationMethod::Groq {
            api_key: "gsk_key".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
        },
    )
}

fn sse_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/event-stream")
        .insert_header("cache-control", "no-cache")
}

fn backend_for(mock_server: &MockServer) -> CodemythBackend {
    CodemythBackend::new_with_base_url(mock_server.uri()).expect("failed to create backend")
}

#[tokio::test]
async fn test_rate_limit_then_content_then_completed() {
    let mock_server = MockServer::start().await;
    let body = concat!(
        "data: {\"status\":\"rate_limit\",\"message\":\"slow down\",\"retry_after\":5}\n\n",
        "data: Hello \n\n",
        "data: world\n\n",
        "data: {\"status\":\"completed\",\"documentation_id\":\"doc_42\"}\n\n",
    );

    Mock::given(method("POST"))
        .and(path("/generate-docs/stream"))
        .and(header("accept", "text/event-stream"))
        .respond_with(sse_response(body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let mut stream = backend.generate(&groq_request()).await.unwrap().stream();
    let mut accumulator = DocumentAccumulator::new();

    // One advisory, not terminal.
    let first = stream.next().await.unwrap().unwrap();
    assert_eq!(
        first,
        StreamEvent::RateLimited {
            message: "slow down".to_string(),
            retry_after_secs: 5,
        }
    );
    accumulator.process_event(first).unwrap();
    assert!(!accumulator.is_terminal());

    // Content progresses "Hello " -> "Hello world".
    let second = stream.next().await.unwrap().unwrap();
    accumulator.process_event(second).unwrap();
    assert_eq!(accumulator.content(), "Hello ");

    let third = stream.next().await.unwrap().unwrap();
    accumulator.process_event(third).unwrap();
    assert_eq!(accumulator.content(), "Hello world");

    let fourth = stream.next().await.unwrap().unwrap();
    assert_eq!(
        fourth,
        StreamEvent::Completed {
            documentation_id: Some("doc_42".to_string())
        }
    );
    accumulator.process_event(fourth).unwrap();

    // No further events follow the terminal frame.
    assert!(stream.next().await.is_none());

    let doc = accumulator.finalize().unwrap();
    assert_eq!(doc.content, "Hello world");
    assert_eq!(doc.documentation_id.as_deref(), Some("doc_42"));
}

#[tokio::test]
async fn test_collect_buffers_whole_document() {
    let mock_server = MockServer::start().await;
    let body = concat!(
        "data: {\"status\":\"starting\",\"message\":\"Starting documentation generation\"}\n\n",
        "data: # Developer Documentation\ndata: \n\n",
        "data: ## Introduction\ndata: Overview of the project.\n\n",
        "data: {\"status\":\"completed\",\"documentation_id\":\"doc_7\"}\n\n",
    );

    Mock::given(method("POST"))
        .and(path("/generate-docs/stream"))
        .respond_with(sse_response(body))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let doc = backend
        .generate(&groq_request())
        .await
        .unwrap()
        .collect()
        .await
        .unwrap();

    // Multi-line frames join their data lines with a newline; the
    // informational "starting" frame carries no content.
    assert_eq!(
        doc.content,
        "# Developer Documentation\n## Introduction\nOverview of the project."
    );
    assert_eq!(doc.documentation_id.as_deref(), Some("doc_7"));
}

#[tokio::test]
async fn test_no_events_follow_a_completed_frame() {
    let mock_server = MockServer::start().await;
    // A misbehaving server that keeps sending after completion.
    let body = concat!(
        "data: first\n\n",
        "data: {\"status\":\"completed\",\"documentation_id\":\"doc_9\"}\n\n",
        "data: late content\n\n",
    );

    Mock::given(method("POST"))
        .and(path("/generate-docs/stream"))
        .respond_with(sse_response(body))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let mut stream = backend.generate(&groq_request()).await.unwrap().stream();

    assert_eq!(
        stream.next().await.unwrap().unwrap(),
        StreamEvent::Content {
            text: "first".to_string()
        }
    );
    assert_eq!(
        stream.next().await.unwrap().unwrap(),
        StreamEvent::Completed {
            documentation_id: Some("doc_9".to_string())
        }
    );
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn test_initial_rejection_yields_transport_error_and_no_events() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate-docs/stream"))
        .respond_with(ResponseTemplate::new(503).set_body_string("backend unavailable"))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let err = backend.generate(&groq_request()).await.unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_backend_error_frame_surfaces_verbatim() {
    let mock_server = MockServer::start().await;
    let body = concat!(
        "data: partial content\n\n",
        "data: {\"status\":\"error\",\"message\":\"Daily limit (RPD/TPD) exceeded\"}\n\n",
    );

    Mock::given(method("POST"))
        .and(path("/generate-docs/stream"))
        .respond_with(sse_response(body))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let err = backend
        .generate(&groq_request())
        .await
        .unwrap()
        .collect()
        .await
        .unwrap_err();

    match err {
        Error::Backend(message) => assert_eq!(message, "Daily limit (RPD/TPD) exceeded"),
        other => panic!("expected backend error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_stream_close_without_terminal_frame_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate-docs/stream"))
        .respond_with(sse_response("data: only some content\n\n"))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let err = backend
        .generate(&groq_request())
        .await
        .unwrap()
        .collect()
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
}

#[tokio::test]
async fn test_generate_sends_repo_and_method() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/generate-docs/stream"))
        .and(body_json(json!({
            "repo_name": "octocat/hello-world",
            "access_token": "gho_token",
            "method": "groq",
            "groq_api_key": "gsk_key",
            "model_name": "llama-3.1-8b-instant"
        })))
        .respond_with(sse_response(
            "data: {\"status\":\"completed\",\"documentation_id\":\"doc_1\"}\n\n",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let doc = backend
        .generate(&groq_request())
        .await
        .unwrap()
        .collect()
        .await
        .unwrap();
    assert_eq!(doc.content, "");
}

#[tokio::test]
async fn test_refine_returns_reply_and_updated_docs() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/docs/refine"))
        .and(body_json(json!({
            "documentation_id": "doc_42",
            "feedback": "add an installation section",
            "documentation": "# Docs"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Added an installation section.",
            "updated_docs": "# Docs\n\n## Installation"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let outcome = backend
        .refine(&RefineRequest::new(
            "doc_42",
            "add an installation section",
            "# Docs",
        ))
        .await
        .unwrap();

    assert_eq!(outcome.reply, "Added an installation section.");
    assert_eq!(outcome.updated_docs, "# Docs\n\n## Installation");
}

#[tokio::test]
async fn test_refine_failure_is_backend_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/docs/refine"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Documentation not found"))
        .mount(&mock_server)
        .await;

    let backend = backend_for(&mock_server);
    let err = backend
        .refine(&RefineRequest::new("doc_missing", "feedback", "# Docs"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Backend(_)));
}
