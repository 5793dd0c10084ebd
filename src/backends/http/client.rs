use super::types::{GenerateBody, RefineBody, RefineResponseBody};
use crate::backend::DocBackend;
use crate::sse::FrameStreamExt;
use crate::types::{classify_frame, GenerationMethod};
use crate::{Error, GenerationRequest, GenerationStream, RefineOutcome, RefineRequest};
use futures_util::StreamExt;
use reqwest::Client;
use std::time::Duration;
use uuid::Uuid;

const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/py";

/// HTTP implementation of [`DocBackend`] against the CodeMyth service.
pub struct CodemythBackend {
    client: Client,
    base_url: String,
}

impl CodemythBackend {
    /// Create a backend against the default service address.
    pub fn new() -> Result<Self, Error> {
        Self::new_with_base_url(DEFAULT_BASE_URL.to_string())
    }

    /// Create a backend against a custom base URL.
    pub fn new_with_base_url(base_url: String) -> Result<Self, Error> {
        // No overall request timeout: generation streams are long-lived and
        // the caller owns any deadline. Only connection setup is bounded.
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self { client, base_url })
    }

    fn generate_body(request: &GenerationRequest) -> GenerateBody {
        let (groq_api_key, model_name) = match &request.method {
            GenerationMethod::Ollama => (None, None),
            GenerationMethod::Groq { api_key, model } => {
                (Some(api_key.clone()), Some(model.clone()))
            }
        };

        GenerateBody {
            repo_name: request.repo.full_name(),
            access_token: request.access_token.clone(),
            method: request.method.as_str().to_string(),
            groq_api_key,
            model_name,
        }
    }
}

#[async_trait::async_trait]
impl DocBackend for CodemythBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationStream, Error> {
        request.validate()?;

        let request_id = Uuid::new_v4();
        tracing::debug!(repo = %request.repo, method = request.method.as_str(), %request_id, "starting generation");

        let response = self
            .client
            .post(format!("{}/generate-docs/stream", self.base_url))
            .header("Accept", "text/event-stream")
            .header("X-Request-Id", request_id.to_string())
            .json(&Self::generate_body(request))
            .send()
            .await
            .map_err(|e| Error::transport(format!("failed to reach backend: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, %request_id, "backend rejected generation request");
            return Err(Error::transport(format!(
                "backend returned {status}: {body}"
            )));
        }

        // Fuse after the first terminal event or error: nothing is delivered
        // past a terminal frame even if the server keeps sending.
        let event_stream = response
            .bytes_stream()
            .sse_frames()
            .filter_map(|frame_result| async move {
                match frame_result {
                    Ok(frame) => classify_frame(&frame.data).map(Ok),
                    Err(e) => Some(Err(e)),
                }
            })
            .scan(false, |terminated, item| {
                if *terminated {
                    return std::future::ready(None);
                }
                *terminated = match &item {
                    Ok(event) => event.is_terminal(),
                    Err(_) => true,
                };
                std::future::ready(Some(item))
            });

        Ok(GenerationStream::from_stream(event_stream))
    }

    async fn refine(&self, request: &RefineRequest) -> Result<RefineOutcome, Error> {
        request.validate()?;

        tracing::debug!(documentation_id = %request.documentation_id, "refining documentation");

        let body = RefineBody {
            documentation_id: request.documentation_id.clone(),
            feedback: request.feedback.clone(),
            documentation: request.current_docs.clone(),
        };

        let response = self
            .client
            .post(format!("{}/docs/refine", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::transport(format!("failed to reach backend: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::backend(format!(
                "refine failed with {status}: {body}"
            )));
        }

        let parsed: RefineResponseBody = response.json().await?;
        Ok(RefineOutcome {
            reply: parsed.response,
            updated_docs: parsed.updated_docs,
        })
    }
}
