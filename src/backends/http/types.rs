//! Wire types for the CodeMyth HTTP backend.

use serde::{Deserialize, Serialize};

/// Body of the streaming generation request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateBody {
    /// `owner/name` form.
    pub repo_name: String,
    pub access_token: String,
    /// `ollama` or `groq`.
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groq_api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
}

/// Body of the refine request.
#[derive(Debug, Clone, Serialize)]
pub struct RefineBody {
    pub documentation_id: String,
    pub feedback: String,
    pub documentation: String,
}

/// Response of the refine endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RefineResponseBody {
    pub response: String,
    pub updated_docs: String,
}
