use axum::http::{header, HeaderMap};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const AUTH_COOKIE_NAME: &str = "session_token";

/// The authenticated principal, as reported by the external identity
/// collaborator. Always carried as `Option<User>`; there is no partially
/// known user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("identity provider not configured")]
    NotConfigured,
    #[error("missing token")]
    MissingToken,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityProviderType {
    Remote,
    Mock,
    None,
}

/// The two-operation identity boundary. Lookup failure is never an error to
/// callers of `current_user`; it collapses to "no user". `sign_out` failures
/// are returned and left to the caller.
#[derive(Clone)]
pub struct IdentityProvider {
    provider: IdentityProviderType,
    base_url: Option<String>,
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct RemoteUser {
    id: String,
    email: String,
    #[serde(default)]
    user_metadata: RemoteUserMetadata,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
struct RemoteUserMetadata {
    full_name: Option<String>,
    avatar_url: Option<String>,
}

impl IdentityProvider {
    pub fn from_env() -> Self {
        let provider = match env_string("IDENTITY_PROVIDER").as_deref() {
            Some("remote") => IdentityProviderType::Remote,
            Some("mock") => IdentityProviderType::Mock,
            _ => IdentityProviderType::None,
        };

        Self {
            provider,
            base_url: env_string("IDENTITY_URL"),
            api_key: env_string("IDENTITY_API_KEY"),
            client: reqwest::Client::new(),
        }
    }

    /// Fixed demo principal, for local runs and tests.
    pub fn mock() -> Self {
        Self {
            provider: IdentityProviderType::Mock,
            base_url: None,
            api_key: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn unconfigured() -> Self {
        Self {
            provider: IdentityProviderType::None,
            base_url: None,
            api_key: None,
            client: reqwest::Client::new(),
        }
    }

    pub fn provider_type(&self) -> IdentityProviderType {
        self.provider
    }

    /// Resolves the caller to a user, or `None`. Any lookup failure is
    /// logged and treated as unauthenticated.
    pub async fn current_user(&self, token: Option<&str>) -> Option<User> {
        match self.provider {
            IdentityProviderType::Mock => Some(demo_user()),
            IdentityProviderType::None => {
                tracing::debug!("identity provider disabled, treating caller as unauthenticated");
                None
            }
            IdentityProviderType::Remote => {
                let token = token?;
                match self.fetch_remote_user(token).await {
                    Ok(user) => Some(user),
                    Err(err) => {
                        tracing::warn!(error = %err, "identity lookup failed, treating as no user");
                        None
                    }
                }
            }
        }
    }

    pub async fn sign_out(&self, token: Option<&str>) -> Result<(), IdentityError> {
        match self.provider {
            IdentityProviderType::Mock => Ok(()),
            IdentityProviderType::None => Err(IdentityError::NotConfigured),
            IdentityProviderType::Remote => {
                let base_url = self
                    .base_url
                    .as_deref()
                    .ok_or(IdentityError::NotConfigured)?;
                let token = token.ok_or(IdentityError::MissingToken)?;

                let mut request = self
                    .client
                    .post(format!("{base_url}/auth/v1/logout"))
                    .bearer_auth(token);
                if let Some(api_key) = self.api_key.as_deref() {
                    request = request.header("apikey", api_key);
                }

                let resp = request.send().await?;
                if !resp.status().is_success() {
                    let status = resp.status();
                    let body = resp.text().await.unwrap_or_default();
                    return Err(IdentityError::HttpStatus { status, body });
                }
                Ok(())
            }
        }
    }

    async fn fetch_remote_user(&self, token: &str) -> Result<User, IdentityError> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or(IdentityError::NotConfigured)?;

        let mut request = self
            .client
            .get(format!("{base_url}/auth/v1/user"))
            .bearer_auth(token);
        if let Some(api_key) = self.api_key.as_deref() {
            request = request.header("apikey", api_key);
        }

        let resp = request.send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(IdentityError::HttpStatus { status, body });
        }

        let remote: RemoteUser = resp.json().await?;
        Ok(User {
            full_name: remote
                .user_metadata
                .full_name
                .unwrap_or_else(|| "Explorer".to_string()),
            avatar_url: remote.user_metadata.avatar_url,
            id: remote.id,
            email: remote.email,
            created_at: remote.created_at,
        })
    }
}

fn demo_user() -> User {
    User {
        id: "demo-user".to_string(),
        email: "demo@bodylab.app".to_string(),
        full_name: "Demo Explorer".to_string(),
        avatar_url: None,
        created_at: Utc::now(),
    }
}

pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = get_cookie(headers, AUTH_COOKIE_NAME) {
        return Some(token);
    }

    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())?;

    auth_header
        .strip_prefix("Bearer ")
        .map(|value| value.to_string())
}

fn get_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_provider_always_resolves_a_user() {
        let provider = IdentityProvider::mock();
        let user = provider.current_user(None).await;
        assert!(user.is_some());
        assert_eq!(user.unwrap().id, "demo-user");
    }

    #[tokio::test]
    async fn unconfigured_provider_is_unauthenticated_not_an_error() {
        let provider = IdentityProvider::unconfigured();
        assert!(provider.current_user(Some("token")).await.is_none());
    }

    #[test]
    fn token_from_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer abc123".parse().unwrap());
        assert_eq!(extract_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn cookie_wins_over_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "session_token=cookie-token".parse().unwrap());
        headers.insert(header::AUTHORIZATION, "Bearer header-token".parse().unwrap());
        assert_eq!(extract_token(&headers).as_deref(), Some("cookie-token"));
    }
}
