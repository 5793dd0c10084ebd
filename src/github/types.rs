//! Wire types for the GitHub REST API.

use serde::{Deserialize, Serialize};

/// Response of `GET /repos/{owner}/{repo}/git/trees/{branch}?recursive=1`.
#[derive(Debug, Deserialize)]
pub(crate) struct TreeResponse {
    #[serde(default)]
    pub tree: Vec<TreeEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub entry_type: String,
}

/// The subset of `GET /repos/{owner}/{repo}/contents/{path}` we need to
/// update an existing file.
#[derive(Debug, Deserialize)]
pub(crate) struct ExistingContent {
    pub sha: String,
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Serialize)]
pub(crate) struct PutContentsBody {
    pub message: String,
    /// Base64-encoded file content.
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PutContentsResponse {
    pub commit: CommitInfo,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitInfo {
    pub sha: String,
    pub html_url: String,
}

/// Error body returned by the GitHub API.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}

/// Result of committing documentation back to the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitResult {
    pub commit_url: String,
    pub sha: String,
}
