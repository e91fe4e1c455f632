use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use rbac_console::{
    api_client::{ApiClient, ApiClientConfig},
    console::{Console, ConsoleConfig},
    router::Route,
    session::{
        Session,
        store::{StoreError, TokenStore},
    },
};
use tokio::sync::Mutex;

use crate::config::Config;

/// Keeps the session token in the profile's entry of the config file.
pub struct ProfileTokenStore {
    config: Arc<Mutex<Config>>,
    profile: String,
}

impl ProfileTokenStore {
    pub fn new(config: Arc<Mutex<Config>>, profile: impl Into<String>) -> Self {
        Self {
            config,
            profile: profile.into(),
        }
    }

    async fn set(&self, token: Option<String>) -> Result<(), StoreError> {
        let mut config = self.config.lock().await;
        let profile = config
            .profile_mut(&self.profile)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        profile.token = token;

        config
            .save()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl TokenStore for ProfileTokenStore {
    async fn read(&self) -> Result<Option<String>, StoreError> {
        let config = self.config.lock().await;
        let profile = config
            .get_profile(&self.profile)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(profile.token)
    }

    async fn write(&self, token: &str) -> Result<(), StoreError> {
        self.set(Some(token.to_string())).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.set(None).await
    }
}

/// Shared state for one CLI invocation.
pub struct CliContext {
    pub config: Arc<Mutex<Config>>,
    pub profile: String,
}

impl CliContext {
    pub fn new(config: Config, profile: impl Into<String>) -> Self {
        Self {
            config: Arc::new(Mutex::new(config)),
            profile: profile.into(),
        }
    }

    pub async fn console(&self) -> Result<Console> {
        let (api_url, identity_deadline) = {
            let config = self.config.lock().await;
            (
                config.get_profile(&self.profile)?.api_url,
                config.identity_timeout()?,
            )
        };

        let store = Arc::new(ProfileTokenStore::new(self.config.clone(), &self.profile));
        let api = ApiClient::new(
            ApiClientConfig {
                base_url: api_url,
                request_timeout: None,
            },
            Session::new(store),
        )?;

        Ok(Console::new(
            api,
            ConsoleConfig {
                identity_deadline,
                ..Default::default()
            },
        ))
    }

    pub async fn remember_return_to(&self, route: Route) -> Result<()> {
        let mut config = self.config.lock().await;
        config.profile_mut(&self.profile)?.return_to = Some(route.path().to_string());
        config.save().await
    }

    pub async fn take_return_to(&self) -> Result<Option<Route>> {
        let mut config = self.config.lock().await;
        let Some(return_to) = config.profile_mut(&self.profile)?.return_to.take() else {
            return Ok(None);
        };
        config.save().await?;

        Ok(Route::from_path(&return_to))
    }
}
