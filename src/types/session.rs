use serde::Deserialize;

/// The authenticated GitHub user's profile.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubUser {
    pub login: String,
    pub id: u64,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

/// An authenticated session, created at login and dropped at logout.
///
/// The session is passed explicitly to every call that needs a credential;
/// there is no ambient storage of the token.
#[derive(Debug, Clone)]
pub struct Session {
    access_token: String,
    user: GithubUser,
}

impl Session {
    pub fn new(access_token: impl Into<String>, user: GithubUser) -> Self {
        Self {
            access_token: access_token.into(),
            user,
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn user(&self) -> &GithubUser {
        &self.user
    }

    /// Display name for the user, falling back to the login.
    pub fn display_name(&self) -> &str {
        self.user.name.as_deref().unwrap_or(&self.user.login)
    }
}
