use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::{
    api_client::{ApiClient, ApiError},
    constants::{IDENTITY_PATH, LOGIN_PATH},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    pub access_token: String,
}

/// The caller as the backend sees it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Identity {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[derive(Serialize)]
struct LoginForm<'a> {
    username: &'a str,
    password: &'a str,
}

pub struct AuthApiClient {
    client: ApiClient,
}

impl AuthApiClient {
    pub(crate) fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchanges credentials for a bearer token. Does not store it.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = self
            .client
            .request(Method::POST, LOGIN_PATH)
            .await?
            .form(&LoginForm { username, password });

        self.client.send(request).await
    }

    pub async fn me(&self) -> Result<Identity, ApiError> {
        let request = self.client.request(Method::GET, IDENTITY_PATH).await?;
        self.client.send(request).await
    }
}
