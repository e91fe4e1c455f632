use std::{sync::Arc, time::Duration};

use tracing::{info, warn};

use crate::{
    guard::IdentityProvider,
    router::{Navigation, NavigationMode, Route},
};

/// Picks the landing page once a token is in place.
pub struct PostLoginRouter {
    identity: Arc<dyn IdentityProvider>,
    admin_role: String,
    deadline: Duration,
}

impl PostLoginRouter {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        admin_role: impl Into<String>,
        deadline: Duration,
    ) -> Self {
        Self {
            identity,
            admin_role: admin_role.into(),
            deadline,
        }
    }

    /// Runs whenever the login view is current while a token is stored.
    pub fn applies(current: Route, has_token: bool) -> bool {
        current == Route::Login && has_token
    }

    /// Full-page navigation to the admin view for admins and home for
    /// everyone else. A failed or slow identity check lands on home, which
    /// shows nothing privileged.
    pub async fn resolve(&self) -> Navigation {
        let destination = match tokio::time::timeout(self.deadline, self.identity.identity()).await {
            Ok(Ok(identity)) if identity.has_role(&self.admin_role) => Route::Admin,
            Ok(Ok(_)) => Route::Home,
            Ok(Err(e)) => {
                warn!("identity check after login failed: {}", e);
                Route::Home
            }
            Err(_) => {
                warn!("identity check after login timed out after {:?}", self.deadline);
                Route::Home
            }
        };

        info!("post-login redirect to {}", destination);
        Navigation::redirect(destination, NavigationMode::FullPage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::tests::{ScriptedIdentity, identity};

    fn router(identity: ScriptedIdentity) -> PostLoginRouter {
        PostLoginRouter::new(Arc::new(identity), "admin", Duration::from_secs(10))
    }

    #[test]
    fn test_applies_only_on_login_with_token() {
        assert!(PostLoginRouter::applies(Route::Login, true));
        assert!(!PostLoginRouter::applies(Route::Login, false));
        assert!(!PostLoginRouter::applies(Route::Home, true));
    }

    #[tokio::test]
    async fn test_admin_lands_on_admin() {
        let navigation = router(ScriptedIdentity::roles(&["admin"])).resolve().await;
        assert_eq!(
            navigation,
            Navigation::redirect(Route::Admin, NavigationMode::FullPage)
        );
    }

    #[tokio::test]
    async fn test_user_lands_on_home() {
        let navigation = router(ScriptedIdentity::roles(&["user"])).resolve().await;
        assert_eq!(
            navigation,
            Navigation::redirect(Route::Home, NavigationMode::FullPage)
        );
    }

    #[tokio::test]
    async fn test_failure_lands_on_home() {
        let navigation = router(ScriptedIdentity::failing(503)).resolve().await;
        assert_eq!(navigation.destination(), Route::Home);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_lands_on_home() {
        let navigation = router(ScriptedIdentity::new(vec![(
            Duration::from_secs(30),
            Ok(identity(&["admin"])),
        )]))
        .resolve()
        .await;

        assert_eq!(navigation.destination(), Route::Home);
    }
}
