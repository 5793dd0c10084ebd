use crate::types::repo::RepoId;
use crate::Error;

/// How the backend should generate the documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationMethod {
    /// Server-side model, no caller-supplied key.
    Ollama,
    /// Groq-hosted model using the caller's API key.
    Groq { api_key: String, model: String },
}

impl GenerationMethod {
    /// Wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationMethod::Ollama => "ollama",
            GenerationMethod::Groq { .. } => "groq",
        }
    }
}

/// Parameters for one documentation generation. Created when the user
/// initiates generation and discarded once the request completes.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub repo: RepoId,
    pub access_token: String,
    pub method: GenerationMethod,
}

impl GenerationRequest {
    pub fn new(repo: RepoId, access_token: impl Into<String>, method: GenerationMethod) -> Self {
        Self {
            repo,
            access_token: access_token.into(),
            method,
        }
    }

    /// Check required inputs before any I/O happens. A missing credential is a
    /// precondition failure, not a retryable error.
    pub fn validate(&self) -> Result<(), Error> {
        if self.access_token.is_empty() {
            return Err(Error::precondition("access token must not be empty"));
        }
        if self.repo.owner.is_empty() || self.repo.name.is_empty() {
            return Err(Error::precondition(
                "repository owner and name must not be empty",
            ));
        }
        if let GenerationMethod::Groq { api_key, model } = &self.method {
            if api_key.is_empty() {
                return Err(Error::precondition(
                    "Groq generation requires a provider API key",
                ));
            }
            if model.is_empty() {
                return Err(Error::precondition("Groq generation requires a model name"));
            }
        }
        Ok(())
    }
}

/// A refinement round against an already generated document.
#[derive(Debug, Clone)]
pub struct RefineRequest {
    pub documentation_id: String,
    pub feedback: String,
    pub current_docs: String,
}

impl RefineRequest {
    pub fn new(
        documentation_id: impl Into<String>,
        feedback: impl Into<String>,
        current_docs: impl Into<String>,
    ) -> Self {
        Self {
            documentation_id: documentation_id.into(),
            feedback: feedback.into(),
            current_docs: current_docs.into(),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.documentation_id.is_empty() {
            return Err(Error::precondition("documentation id must not be empty"));
        }
        if self.feedback.trim().is_empty() {
            return Err(Error::precondition("feedback must not be empty"));
        }
        Ok(())
    }
}

/// Result of a refinement round. `updated_docs` replaces the caller's
/// document wholesale.
#[derive(Debug, Clone)]
pub struct RefineOutcome {
    /// The backend's reply describing what changed (or why nothing did).
    pub reply: String,
    /// The full revised documentation.
    pub updated_docs: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(token: &str, method: GenerationMethod) -> GenerationRequest {
        GenerationRequest::new(RepoId::new("octocat", "hello-world"), token, method)
    }

    #[test]
    fn test_validate_requires_token() {
        let err = request("", GenerationMethod::Ollama).validate().unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));

        assert!(request("gho_token", GenerationMethod::Ollama)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_requires_groq_key() {
        let method = GenerationMethod::Groq {
            api_key: String::new(),
            model: "llama-3.1-8b-instant".to_string(),
        };
        let err = request("gho_token", method).validate().unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }

    #[test]
    fn test_refine_request_validation() {
        assert!(RefineRequest::new("doc_1", "add examples", "# Docs")
            .validate()
            .is_ok());
        assert!(RefineRequest::new("", "add examples", "# Docs")
            .validate()
            .is_err());
        assert!(RefineRequest::new("doc_1", "   ", "# Docs")
            .validate()
            .is_err());
    }
}
