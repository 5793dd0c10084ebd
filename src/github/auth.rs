//! GitHub OAuth login producing an explicit [`Session`].

use crate::types::{GithubUser, Session};
use crate::Error;
use reqwest::Client;
use serde::Deserialize;
use std::env;
use url::Url;

const GITHUB_AUTHORIZE_URL: &str = "https://github.com/login/oauth/authorize";
const GITHUB_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_REDIRECT_URI: &str = "http://localhost:3000/auth/callback";

/// OAuth application credentials.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

impl OAuthConfig {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
        }
    }

    /// Load the OAuth app configuration from environment variables.
    pub fn from_env() -> Result<Self, Error> {
        let client_id = env::var("GITHUB_CLIENT_ID")
            .map_err(|_| Error::config("GITHUB_CLIENT_ID environment variable is required"))?;
        let client_secret = env::var("GITHUB_CLIENT_SECRET")
            .map_err(|_| Error::config("GITHUB_CLIENT_SECRET environment variable is required"))?;
        let redirect_uri = env::var("GITHUB_REDIRECT_URI")
            .unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_string());

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    error_description: Option<String>,
}

/// Drives the authorization-code flow against GitHub.
pub struct OAuthFlow {
    client: Client,
    config: OAuthConfig,
    token_url: String,
    api_base: String,
}

impl OAuthFlow {
    pub fn new(config: OAuthConfig) -> Result<Self, Error> {
        Self::new_with_endpoints(
            config,
            GITHUB_TOKEN_URL.to_string(),
            GITHUB_API_URL.to_string(),
        )
    }

    /// Create a flow against custom endpoints.
    pub fn new_with_endpoints(
        config: OAuthConfig,
        token_url: String,
        api_base: String,
    ) -> Result<Self, Error> {
        if config.client_id.is_empty() || config.client_secret.is_empty() {
            return Err(Error::config("OAuth client id and secret are required"));
        }
        let client = Client::builder()
            .user_agent(concat!("codemyth-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            config,
            token_url,
            api_base,
        })
    }

    /// The URL the user is sent to for authorization.
    pub fn authorize_url(&self) -> Result<Url, Error> {
        let mut url = Url::parse(GITHUB_AUTHORIZE_URL)
            .map_err(|e| Error::config(format!("invalid authorize URL: {e}")))?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("scope", "repo read:user");
        Ok(url)
    }

    /// Exchange the callback code for a token and build a [`Session`].
    ///
    /// The returned session owns the credential for its whole lifecycle;
    /// logging out is dropping it.
    pub async fn exchange_code(&self, code: &str) -> Result<Session, Error> {
        if code.is_empty() {
            return Err(Error::precondition("authorization code must not be empty"));
        }

        tracing::debug!("exchanging authorization code for access token");

        let response = self
            .client
            .post(&self.token_url)
            .header("Accept", "application/json")
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        let token: TokenResponse = response.json().await?;
        let access_token = token.access_token.ok_or_else(|| {
            Error::auth(format!(
                "failed to fetch access token: {}",
                token
                    .error_description
                    .unwrap_or_else(|| "unknown error".to_string())
            ))
        })?;

        let user = self.fetch_user(&access_token).await?;
        tracing::info!(login = %user.login, "authenticated with GitHub");

        Ok(Session::new(access_token, user))
    }

    async fn fetch_user(&self, access_token: &str) -> Result<GithubUser, Error> {
        let response = self
            .client
            .get(format!("{}/user", self.api_base))
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::auth(format!(
                "failed to fetch user profile: {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OAuthConfig {
        OAuthConfig::new("client-id", "client-secret", DEFAULT_REDIRECT_URI)
    }

    #[test]
    fn test_authorize_url_carries_client_and_redirect() {
        let flow = OAuthFlow::new(config()).unwrap();
        let url = flow.authorize_url().unwrap();

        assert_eq!(url.host_str(), Some("github.com"));
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("client_id".to_string(), "client-id".to_string())));
        assert!(pairs
            .iter()
            .any(|(k, v)| k == "redirect_uri" && v == DEFAULT_REDIRECT_URI));
    }

    #[test]
    fn test_flow_rejects_missing_credentials() {
        let incomplete = OAuthConfig::new("", "secret", DEFAULT_REDIRECT_URI);
        assert!(matches!(
            OAuthFlow::new(incomplete).err(),
            Some(Error::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_exchange_rejects_empty_code() {
        let flow = OAuthFlow::new(config()).unwrap();
        let err = flow.exchange_code("").await.unwrap_err();
        assert!(matches!(err, Error::Precondition(_)));
    }
}
