pub mod dashboard;
pub mod notice;
pub mod panel;

use std::{sync::Arc, time::Duration};

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    api_client::{ApiClient, ApiError},
    console::{
        dashboard::{Dashboard, load_dashboard},
        notice::Notice,
        panel::ResourcePanel,
    },
    constants::{ADMIN_ROLE, DEFAULT_IDENTITY_TIMEOUT_SECS},
    guard::{
        IdentityProvider,
        post_login::PostLoginRouter,
        role::{Evaluation, RoleGuard, gate},
    },
    resources::{
        Resource, permission::Permission, permission_group::PermissionGroup, role::Role,
        user::User,
    },
    router::{Access, Navigation, NavigationMode, Route},
    session::{Session, guard::require_token, store::StoreError},
};

#[derive(Debug, Error)]
pub enum LoginError {
    /// The backend refused the credentials or could not be reached.
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ApiError> for LoginError {
    fn from(e: ApiError) -> Self {
        warn!("login failed: {}", e);
        LoginError::Rejected(e.detail().unwrap_or("Login failed").to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub admin_role: String,
    pub identity_deadline: Duration,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            admin_role: ADMIN_ROLE.to_string(),
            identity_deadline: Duration::from_secs(DEFAULT_IDENTITY_TIMEOUT_SECS),
        }
    }
}

/// Owns the session and decides what every navigation shows.
pub struct Console {
    session: Session,
    api: ApiClient,
    admin_guard: RoleGuard,
    post_login: PostLoginRouter,
}

impl Console {
    pub fn new(api: ApiClient, config: ConsoleConfig) -> Self {
        let identity: Arc<dyn IdentityProvider> = Arc::new(api.clone());
        Self::with_identity(api, identity, config)
    }

    pub fn with_identity(
        api: ApiClient,
        identity: Arc<dyn IdentityProvider>,
        config: ConsoleConfig,
    ) -> Self {
        Self {
            session: api.session().clone(),
            admin_guard: RoleGuard::new(
                identity.clone(),
                config.admin_role.clone(),
                config.identity_deadline,
            ),
            post_login: PostLoginRouter::new(identity, config.admin_role, config.identity_deadline),
            api,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn admin_guard(&self) -> &RoleGuard {
        &self.admin_guard
    }

    /// Application start. A stale token is dropped and the console reloads
    /// onto the login view.
    pub async fn mount(&self) -> Result<Option<Navigation>, StoreError> {
        if self.session.expire_if_stale().await? {
            return Ok(Some(Navigation::redirect(
                Route::Login,
                NavigationMode::FullPage,
            )));
        }

        Ok(None)
    }

    pub async fn navigate(&self, path: &str) -> Navigation {
        match Route::from_path(path) {
            Some(route) => self.navigate_to(route).await,
            None => Navigation::redirect(Route::Home, NavigationMode::ClientSide),
        }
    }

    pub async fn navigate_to(&self, route: Route) -> Navigation {
        match route {
            Route::Logout => {
                self.logout().await;
                Navigation::redirect(Route::Login, NavigationMode::ClientSide)
            }
            Route::Login => {
                let has_token = self.session.token().await.is_some();
                if PostLoginRouter::applies(route, has_token) {
                    self.post_login.resolve().await
                } else {
                    Navigation::Render(Route::Login)
                }
            }
            _ => {
                let token = self.session.token().await;
                let navigation = require_token(route, token.as_deref());

                if navigation != Navigation::Render(route) || route.access() != Access::Admin {
                    return navigation;
                }

                match self.admin_guard.evaluate().await {
                    Evaluation::Current(state) => gate(route, state),
                    Evaluation::Superseded => gate(route, self.admin_guard.state()),
                }
            }
        }
    }

    /// Authenticates, stores the token, then lands via the post-login redirect.
    pub async fn login(&self, username: &str, password: &str) -> Result<Navigation, LoginError> {
        let response = self.api.auth().login(username, password).await?;
        self.session.sign_in(&response.access_token).await?;
        info!("logged in as {}", username);

        Ok(self.navigate_to(Route::Login).await)
    }

    pub async fn logout(&self) {
        if let Err(e) = self.session.sign_out().await {
            warn!("failed to clear session token: {}", e);
        }
    }

    pub fn panel<R: Resource>(&self) -> ResourcePanel<R> {
        ResourcePanel::new(self.api.resource())
    }

    pub fn users(&self) -> ResourcePanel<User> {
        self.panel()
    }

    pub fn roles(&self) -> ResourcePanel<Role> {
        self.panel()
    }

    pub fn permissions(&self) -> ResourcePanel<Permission> {
        self.panel()
    }

    pub fn permission_groups(&self) -> ResourcePanel<PermissionGroup> {
        self.panel()
    }

    pub async fn dashboard(&self) -> Result<Dashboard, Notice> {
        load_dashboard(&self.api).await
    }
}
