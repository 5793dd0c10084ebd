//! Repository access: listing, code-file retrieval, documentation commit.

use super::types::{
    ApiErrorBody, CommitResult, ExistingContent, PutContentsBody, PutContentsResponse,
    TreeResponse,
};
use crate::types::{RepoFile, RepoId, Repository, Session};
use crate::Error;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use reqwest::{Client, Response, StatusCode};

const GITHUB_API_URL: &str = "https://api.github.com";

/// File extensions considered generation input.
const CODE_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".jsx", ".ts", ".tsx", ".java", ".go", ".rb", ".php", ".cpp", ".c", ".cs",
    ".rs", ".swift", ".kt",
];

/// Whether a repository path is a source file worth documenting.
pub fn is_code_file(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    CODE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Client for the GitHub REST API, authenticated per call with a [`Session`].
pub struct GithubClient {
    client: Client,
    api_base: String,
}

impl GithubClient {
    pub fn new() -> Result<Self, Error> {
        Self::new_with_base_url(GITHUB_API_URL.to_string())
    }

    pub fn new_with_base_url(api_base: String) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent(concat!("codemyth-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, api_base })
    }

    /// List the user's own repositories, most recently updated first.
    pub async fn list_repositories(&self, session: &Session) -> Result<Vec<Repository>, Error> {
        let response = self
            .client
            .get(format!("{}/user/repos", self.api_base))
            .query(&[
                ("sort", "updated"),
                ("per_page", "100"),
                ("affiliation", "owner"),
            ])
            .bearer_auth(session.access_token())
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let repos: Vec<Repository> = response.json().await?;
        tracing::info!(count = repos.len(), "listed repositories");
        Ok(repos)
    }

    /// Retrieve the code files of a repository without cloning it: one
    /// recursive tree listing, then the raw content of each code file.
    /// Files that fail to fetch are skipped.
    pub async fn fetch_code_files(
        &self,
        session: &Session,
        repo: &RepoId,
        branch: &str,
    ) -> Result<Vec<RepoFile>, Error> {
        let tree_url = format!(
            "{}/repos/{}/{}/git/trees/{}?recursive=1",
            self.api_base, repo.owner, repo.name, branch
        );
        let response = self
            .client
            .get(tree_url)
            .bearer_auth(session.access_token())
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let tree: TreeResponse = response.json().await?;

        let paths: Vec<String> = tree
            .tree
            .into_iter()
            .filter(|entry| entry.entry_type == "blob" && is_code_file(&entry.path))
            .map(|entry| entry.path)
            .collect();

        let fetches = paths
            .iter()
            .map(|path| self.fetch_file_content(session, repo, path));
        let results = futures::future::join_all(fetches).await;

        let files: Vec<RepoFile> = results.into_iter().flatten().collect();
        tracing::info!(repo = %repo, count = files.len(), "fetched code files");
        Ok(files)
    }

    async fn fetch_file_content(
        &self,
        session: &Session,
        repo: &RepoId,
        path: &str,
    ) -> Option<RepoFile> {
        let url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, repo.owner, repo.name, path
        );
        let result = self
            .client
            .get(url)
            .bearer_auth(session.access_token())
            .header("Accept", "application/vnd.github.v3.raw")
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => match response.text().await {
                Ok(content) => Some(RepoFile {
                    path: path.to_string(),
                    content,
                }),
                Err(e) => {
                    tracing::warn!(path, error = %e, "failed to read file body, skipping");
                    None
                }
            },
            Ok(response) => {
                tracing::warn!(path, status = %response.status(), "failed to fetch file, skipping");
                None
            }
            Err(e) => {
                tracing::warn!(path, error = %e, "failed to fetch file, skipping");
                None
            }
        }
    }

    /// Commit the generated documentation to the repository, creating the
    /// file or updating it in place.
    pub async fn commit_documentation(
        &self,
        session: &Session,
        repo: &RepoId,
        path: &str,
        content: &str,
        message: &str,
    ) -> Result<CommitResult, Error> {
        if content.is_empty() {
            return Err(Error::precondition("documentation content must not be empty"));
        }

        let contents_url = format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, repo.owner, repo.name, path
        );

        // Updating an existing file requires its current blob SHA.
        let existing_sha = self.lookup_existing_sha(session, &contents_url).await?;

        let body = PutContentsBody {
            message: message.to_string(),
            content: BASE64.encode(content),
            sha: existing_sha,
        };

        let response = self
            .client
            .put(&contents_url)
            .bearer_auth(session.access_token())
            .header("Accept", "application/vnd.github.v3+json")
            .json(&body)
            .send()
            .await?;

        let response = Self::check_status(response).await?;
        let parsed: PutContentsResponse = response.json().await?;
        tracing::info!(repo = %repo, path, sha = %parsed.commit.sha, "committed documentation");

        Ok(CommitResult {
            commit_url: parsed.commit.html_url,
            sha: parsed.commit.sha,
        })
    }

    async fn lookup_existing_sha(
        &self,
        session: &Session,
        contents_url: &str,
    ) -> Result<Option<String>, Error> {
        let response = self
            .client
            .get(contents_url)
            .bearer_auth(session.access_token())
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let existing: ExistingContent = response.json().await?;
                Ok(Some(existing.sha))
            }
            _ => Err(Self::api_error(response).await),
        }
    }

    async fn check_status(response: Response) -> Result<Response, Error> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::api_error(response).await)
        }
    }

    async fn api_error(response: Response) -> Error {
        let status = response.status().as_u16();
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body),
            Err(e) => e.to_string(),
        };
        Error::github(status, message)
    }
}
