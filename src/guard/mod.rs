//! Client-side access gates.
//!
//! These checks only decide what the console shows. The backend enforces
//! authorization on every resource endpoint, and a modified client can skip
//! everything in this module, so none of it is a security boundary.

pub mod post_login;
pub mod role;

use async_trait::async_trait;

use crate::api_client::{ApiClient, ApiError, auth::Identity};

/// Source of the caller's identity. The console asks fresh on every check.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn identity(&self) -> Result<Identity, ApiError>;
}

#[async_trait]
impl IdentityProvider for ApiClient {
    async fn identity(&self) -> Result<Identity, ApiError> {
        self.auth().me().await
    }
}
