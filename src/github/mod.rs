//! GitHub collaborator: OAuth login, repository access, documentation commit.

pub mod auth;
pub mod client;
pub mod types;

pub use auth::{OAuthConfig, OAuthFlow};
pub use client::GithubClient;
pub use types::CommitResult;
