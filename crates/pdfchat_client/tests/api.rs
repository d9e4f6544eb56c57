use std::time::Duration;

use pdfchat_client::{
    ApiError, ChatAnswer, ChatRequest, ClientSettings, PdfChatApi, ReqwestApiClient, UploadFile,
    UploadResult,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{
    body_json, body_string_contains, header, header_regex, method, path,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ReqwestApiClient {
    let settings = ClientSettings::default()
        .with_base_url(&format!("{}/", server.uri()))
        .expect("mock server uri");
    ReqwestApiClient::new(settings).expect("client")
}

fn sample_pdf() -> UploadFile {
    UploadFile::new("f.pdf", b"%PDF-1.4 sample".to_vec())
}

#[tokio::test]
async fn upload_sends_one_multipart_request_and_decodes_result() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"f.pdf\""))
        .and(body_string_contains("%PDF-1.4 sample"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "doc_id": "d1",
            "filename": "f.pdf",
            "chunks_indexed": 4
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .upload_document(&sample_pdf())
        .await
        .expect("upload ok");
    assert_eq!(
        result,
        UploadResult {
            doc_id: "d1".to_string(),
            filename: "f.pdf".to_string(),
            chunks_indexed: 4,
        }
    );
}

#[tokio::test]
async fn upload_error_uses_detail_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"detail": "Only PDF files are supported."})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .upload_document(&sample_pdf())
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Http {
            status: 400,
            message: "Only PDF files are supported.".to_string(),
        }
    );
    assert_eq!(err.to_string(), "Only PDF files are supported.");
}

#[tokio::test]
async fn error_without_json_falls_back_to_status_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let request = ChatRequest::new("d1", "Q").unwrap();
    let err = client_for(&server).ask_question(&request).await.unwrap_err();
    assert_eq!(err.to_string(), "Request failed (502)");
    assert_eq!(err.status(), Some(502));
}

#[tokio::test]
async fn error_without_detail_falls_back_to_status_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [{"loc": ["body", "question"], "msg": "field required"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = ChatRequest::new("d1", "Q").unwrap();
    let chat_err = client.ask_question(&request).await.unwrap_err();
    assert_eq!(chat_err.to_string(), "Request failed (422)");

    let upload_err = client.upload_document(&sample_pdf()).await.unwrap_err();
    assert_eq!(upload_err.to_string(), "Request failed (500)");
}

#[tokio::test]
async fn empty_detail_falls_back_to_status_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": ""})))
        .mount(&server)
        .await;

    let request = ChatRequest::new("d1", "Q").unwrap();
    let err = client_for(&server).ask_question(&request).await.unwrap_err();
    assert_eq!(err.to_string(), "Request failed (404)");
}

#[tokio::test]
async fn chat_posts_json_body_and_decodes_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "doc_id": "d1",
            "question": "What is the scope?",
            "k": 3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "A",
            "sources": ["s1", "s2"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ChatRequest::new(" d1 ", " What is the scope? ").unwrap();
    let answer = client_for(&server).ask_question(&request).await.unwrap();
    assert_eq!(
        answer,
        ChatAnswer {
            answer: "A".to_string(),
            sources: vec!["s1".to_string(), "s2".to_string()],
        }
    );
}

#[tokio::test]
async fn chat_sends_optional_fields_when_set() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({
            "doc_id": "d1",
            "question": "Q",
            "k": 5,
            "chat_model": "gpt-4o-mini"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"answer": "A", "sources": []})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = ChatRequest::new("d1", "Q")
        .unwrap()
        .with_top_k(5)
        .unwrap()
        .with_chat_model(Some("gpt-4o-mini".to_string()));
    let answer = client_for(&server).ask_question(&request).await.unwrap();
    assert!(answer.sources.is_empty());
}

#[tokio::test]
async fn malformed_success_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "A"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "doc_id": "",
            "filename": "f.pdf",
            "chunks_indexed": 1
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = ChatRequest::new("d1", "Q").unwrap();
    let err = client.ask_question(&request).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse(_)), "got {err:?}");

    let err = client.upload_document(&sample_pdf()).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse(_)), "got {err:?}");
}

#[tokio::test]
async fn health_bypasses_cache_and_returns_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .and(header("cache-control", "no-cache"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let status = client_for(&server).health().await.unwrap();
    assert_eq!(status, "ok");
}

#[tokio::test]
async fn health_failure_ignores_body_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"detail": "maintenance"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).health().await.unwrap_err();
    assert_eq!(err.to_string(), "Request failed (503)");
}

#[tokio::test]
async fn configured_timeout_surfaces_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({"status": "ok"})),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Some(Duration::from_millis(50)),
        ..ClientSettings::default()
    }
    .with_base_url(&server.uri())
    .unwrap();
    let client = ReqwestApiClient::new(settings).unwrap();

    let err = client.health().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)), "got {err:?}");
}

#[test]
fn chat_request_requires_doc_id_and_question() {
    assert!(matches!(
        ChatRequest::new("  ", "Q"),
        Err(ApiError::Validation(_))
    ));
    assert!(matches!(
        ChatRequest::new("d1", " \n "),
        Err(ApiError::Validation(_))
    ));

    let request = ChatRequest::new("d1", "Q").unwrap();
    assert_eq!(request.top_k(), Some(3));
    assert_eq!(request.chat_model(), None);
    assert!(request.clone().with_top_k(0).is_err());
    assert!(request.clone().with_top_k(11).is_err());
    assert_eq!(request.with_top_k(10).unwrap().top_k(), Some(10));
}
