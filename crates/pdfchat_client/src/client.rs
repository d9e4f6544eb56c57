use pdfchat_logging::{chat_debug, chat_info, chat_warn, preview};
use reqwest::header::CACHE_CONTROL;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use crate::types::HealthResponse;
use crate::{
    status_message, ApiError, ChatAnswer, ChatRequest, ClientSettings, UploadFile, UploadResult,
};

const PDF_MIME: &str = "application/pdf";

/// The three backend operations. Implementations hold no per-call state.
#[async_trait::async_trait]
pub trait PdfChatApi: Send + Sync {
    async fn upload_document(&self, file: &UploadFile) -> Result<UploadResult, ApiError>;

    async fn ask_question(&self, request: &ChatRequest) -> Result<ChatAnswer, ApiError>;

    async fn health(&self) -> Result<String, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestApiClient {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(map_reqwest_error)?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl PdfChatApi for ReqwestApiClient {
    async fn upload_document(&self, file: &UploadFile) -> Result<UploadResult, ApiError> {
        let url = self.settings.endpoint("/upload");
        chat_info!(
            "POST {} filename={} bytes={}",
            url,
            file.filename,
            file.bytes.len()
        );

        let part = Part::bytes(file.bytes.clone())
            .file_name(file.filename.clone())
            .mime_str(PDF_MIME)
            .map_err(map_reqwest_error)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = ensure_success(response).await?;
        let result: UploadResult = decode_body(response).await?;
        let result = result.validate()?;

        chat_info!(
            "Upload accepted doc_id={} chunks_indexed={}",
            result.doc_id,
            result.chunks_indexed
        );
        Ok(result)
    }

    async fn ask_question(&self, request: &ChatRequest) -> Result<ChatAnswer, ApiError> {
        let url = self.settings.endpoint("/chat");
        chat_info!(
            "POST {} doc_id={} k={:?} question={}",
            url,
            request.doc_id(),
            request.top_k(),
            preview(request.question(), 60)
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let response = ensure_success(response).await?;
        let answer: ChatAnswer = decode_body(response).await?;

        chat_debug!(
            "Chat answered sources={} answer={}",
            answer.sources.len(),
            preview(&answer.answer, 80)
        );
        Ok(answer)
    }

    async fn health(&self) -> Result<String, ApiError> {
        let url = self.settings.endpoint("/health");
        chat_debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            chat_warn!("Health check failed status={}", status.as_u16());
            return Err(ApiError::Http {
                status: status.as_u16(),
                message: status_message(status.as_u16()),
            });
        }
        let body: HealthResponse = decode_body(response).await?;
        Ok(body.status)
    }
}

/// Passes 2xx responses through; anything else becomes [`ApiError::Http`]
/// with the body's `detail` when it carries one.
async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let code = status.as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = detail_message(&body).unwrap_or_else(|| status_message(code));
    chat_warn!("Request failed status={} message={}", code, preview(&message, 120));
    Err(ApiError::Http {
        status: code,
        message,
    })
}

fn detail_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")?
        .as_str()
        .filter(|detail| !detail.is_empty())
        .map(ToOwned::to_owned)
}

async fn decode_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let text = response.text().await.map_err(map_reqwest_error)?;
    serde_json::from_str(&text).map_err(|err| ApiError::InvalidResponse(err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::Network(format!("request timed out: {err}"));
    }
    ApiError::Network(err.to_string())
}
