//! Client library for the CodeMyth documentation generation platform.
//!
//! Covers the full flow: GitHub OAuth login producing an explicit [`Session`],
//! repository selection, streamed documentation generation with a feedback
//! loop, and committing the result back to the repository.

pub mod accumulator;
pub mod backend;
pub mod backends;
pub mod error;
pub mod generation;
pub mod github;
pub mod sse;
pub mod types;

// Re-export core types for easy usage
pub use accumulator::{DocumentAccumulator, StreamState};
pub use backend::DocBackend;
pub use backends::CodemythBackend;
pub use error::Error;
pub use generation::{GeneratedDocument, GenerationStream};
pub use github::{CommitResult, GithubClient, OAuthConfig, OAuthFlow};
pub use sse::SseFrame;
pub use types::*;
