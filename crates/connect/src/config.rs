//! Endpoint and credential configuration for the connect client.

use std::env;

/// Connection settings for the hosted data service.
#[derive(Debug, Clone)]
pub struct ConnectConfig {
    /// Base URL of the service, e.g. `https://abc.supabase.co`.
    pub base_url: String,
    /// Project API key sent on every request.
    pub api_key: String,
    /// Per-user access token; falls back to the API key when absent
    /// (anonymous access).
    pub access_token: Option<String>,
}

impl ConnectConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            access_token: None,
        }
    }

    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Read configuration from the environment. Returns `None` unless both
    /// `GRINDLOG_API_URL` and `GRINDLOG_API_KEY` are set and non-blank.
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("GRINDLOG_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())?;
        let api_key = env::var("GRINDLOG_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())?;
        let access_token = env::var("GRINDLOG_ACCESS_TOKEN")
            .ok()
            .filter(|v| !v.trim().is_empty());

        Some(Self {
            base_url,
            api_key,
            access_token,
        })
    }

    /// Token used for the `Authorization` header.
    pub fn bearer_token(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.api_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_prefers_access_token() {
        let anon = ConnectConfig::new("https://api.example.com", "anon-key");
        assert_eq!(anon.bearer_token(), "anon-key");

        let user = anon.clone().with_access_token("user-jwt");
        assert_eq!(user.bearer_token(), "user-jwt");
    }
}
