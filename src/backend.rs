use crate::{Error, GenerationRequest, GenerationStream, RefineOutcome, RefineRequest};

/// A documentation backend that can generate and refine documents.
/// Generation always streams - use `stream()` on the result for raw events
/// or `collect().await` for the buffered document.
#[async_trait::async_trait]
pub trait DocBackend: Send + Sync + 'static {
    /// Start a documentation generation for a repository.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationStream, Error>;

    /// Apply one round of feedback to an existing document.
    async fn refine(&self, request: &RefineRequest) -> Result<RefineOutcome, Error>;
}
