pub mod auth;
pub mod resource;

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::{
    api_client::{auth::AuthApiClient, resource::ResourceApiClient},
    resources::{
        Resource, permission::Permission, permission_group::PermissionGroup, role::Role,
        user::User,
    },
    session::Session,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid api url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {status}{}", .detail.as_ref().map(|d| format!(": {d}")).unwrap_or_default())]
    Status { status: u16, detail: Option<String> },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Human readable reason supplied by the backend, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    pub base_url: String,
    pub request_timeout: Option<Duration>,
}

/// HTTP client for the RBAC backend. The current session token, when there
/// is one, is attached to every request as a bearer credential.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: Session,
}

impl ApiClient {
    pub fn new(config: ApiClientConfig, session: Session) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(&config.base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn auth(&self) -> AuthApiClient {
        AuthApiClient::new(self.clone())
    }

    pub fn resource<R: Resource>(&self) -> ResourceApiClient<R> {
        ResourceApiClient::new(self.clone())
    }

    pub fn users(&self) -> ResourceApiClient<User> {
        self.resource()
    }

    pub fn roles(&self) -> ResourceApiClient<Role> {
        self.resource()
    }

    pub fn permissions(&self) -> ResourceApiClient<Permission> {
        self.resource()
    }

    pub fn permission_groups(&self) -> ResourceApiClient<PermissionGroup> {
        self.resource()
    }

    pub(crate) fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    pub(crate) async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.url(path)?;
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);
        if let Some(token) = self.session.token().await {
            request = request.bearer_auth(token);
        }

        Ok(request)
    }

    pub(crate) async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = check_status(request.send().await?).await?;
        let bytes = response.bytes().await?;

        Ok(serde_json::from_slice(&bytes)?)
    }

    pub(crate) async fn send_discarding(&self, request: RequestBuilder) -> Result<(), ApiError> {
        check_status(request.send().await?).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    let detail = serde_json::from_slice::<ErrorBody>(&body)
        .ok()
        .and_then(|body| body.detail)
        .map(|detail| match detail {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        });

    debug!("request failed with status {}: {:?}", status, detail);

    Err(ApiError::Status {
        status: status.as_u16(),
        detail,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::session::store::MemoryTokenStore;

    fn client(base_url: &str) -> ApiClient {
        let session = Session::new(Arc::new(MemoryTokenStore::new()));
        ApiClient::new(
            ApiClientConfig {
                base_url: base_url.to_string(),
                request_timeout: None,
            },
            session,
        )
        .expect("client")
    }

    #[test]
    fn test_url_join_keeps_base_path() {
        let api = client("http://localhost:8000/api");
        assert_eq!(
            api.url("/users/").expect("url").as_str(),
            "http://localhost:8000/api/users/"
        );
        assert_eq!(
            api.url("/users/7").expect("url").as_str(),
            "http://localhost:8000/api/users/7"
        );

        let api = client("http://localhost:8000");
        assert_eq!(
            api.url("/auth/me").expect("url").as_str(),
            "http://localhost:8000/auth/me"
        );
    }

    #[test]
    fn test_invalid_url() {
        let session = Session::new(Arc::new(MemoryTokenStore::new()));
        let result = ApiClient::new(
            ApiClientConfig {
                base_url: "not a url".to_string(),
                request_timeout: None,
            },
            session,
        );

        assert!(matches!(result, Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn test_status_error_display() {
        let error = ApiError::Status {
            status: 401,
            detail: Some("Incorrect username or password".to_string()),
        };
        assert_eq!(
            error.to_string(),
            "server responded with 401: Incorrect username or password"
        );
        assert_eq!(error.detail(), Some("Incorrect username or password"));

        let error = ApiError::Status {
            status: 500,
            detail: None,
        };
        assert_eq!(error.to_string(), "server responded with 500");
        assert_eq!(error.detail(), None);
    }
}
