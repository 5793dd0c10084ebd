use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies a repository by owner and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// The `owner/name` form used by the GitHub API and the backend.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => {
                Ok(RepoId::new(owner, name))
            }
            _ => Err(Error::precondition(format!(
                "invalid repository identifier '{s}', expected 'owner/name'"
            ))),
        }
    }
}

/// A repository as listed for the authenticated user, trimmed to the
/// fields the documentation flow needs.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u32,
    #[serde(default)]
    pub forks_count: u32,
    pub default_branch: String,
    #[serde(rename = "private")]
    pub is_private: bool,
    pub updated_at: Option<String>,
}

impl Repository {
    /// Split `full_name` back into a [`RepoId`].
    pub fn repo_id(&self) -> Result<RepoId, Error> {
        self.full_name.parse()
    }
}

/// A single source file retrieved from a repository, sent to the backend
/// as generation input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepoFile {
    pub path: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_id_parse() {
        let id: RepoId = "octocat/hello-world".parse().unwrap();
        assert_eq!(id.owner, "octocat");
        assert_eq!(id.name, "hello-world");
        assert_eq!(id.full_name(), "octocat/hello-world");
    }

    #[test]
    fn test_repo_id_parse_rejects_malformed() {
        assert!("no-slash".parse::<RepoId>().is_err());
        assert!("/missing-owner".parse::<RepoId>().is_err());
        assert!("missing-name/".parse::<RepoId>().is_err());
    }

    #[test]
    fn test_repository_deserialization() {
        let json = r#"{
            "id": 42,
            "name": "hello-world",
            "full_name": "octocat/hello-world",
            "html_url": "https://github.com/octocat/hello-world",
            "description": null,
            "language": "Rust",
            "stargazers_count": 7,
            "forks_count": 1,
            "default_branch": "main",
            "private": false,
            "updated_at": "2024-01-01T00:00:00Z"
        }"#;

        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "hello-world");
        assert!(!repo.is_private);
        assert_eq!(repo.repo_id().unwrap().owner, "octocat");
    }
}
