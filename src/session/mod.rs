pub mod claims;
pub mod guard;
pub mod store;

use std::{fmt, sync::Arc};

use tracing::{debug, warn};

use crate::{
    session::{
        claims::{Claims, decode_claims},
        guard::{MountDecision, mount_decision},
        store::{StoreError, TokenStore},
    },
    utils::time::now_millis,
};

pub type Clock = Arc<dyn Fn() -> u64 + Send + Sync>;

/// Sole owner of the token slot. Everything that needs the token goes
/// through here instead of touching the store directly.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
    clock: Clock,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            store,
            clock: Arc::new(now_millis),
        }
    }

    pub fn with_clock(mut self, clock: impl Fn() -> u64 + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn now_millis(&self) -> u64 {
        (self.clock)()
    }

    /// Reads the stored token. A store that cannot be read is treated as empty.
    pub async fn token(&self) -> Option<String> {
        match self.store.read().await {
            Ok(token) => token,
            Err(e) => {
                warn!("failed to read token store, treating session as absent: {}", e);
                None
            }
        }
    }

    pub async fn claims(&self) -> Option<Claims> {
        decode_claims(self.token().await.as_deref())
    }

    pub async fn is_valid(&self) -> bool {
        let token = self.token().await;
        token.is_some() && !guard::is_expired_at(token.as_deref(), self.now_millis())
    }

    pub async fn sign_in(&self, token: &str) -> Result<(), StoreError> {
        debug!("storing new session token");
        self.store.write(token).await
    }

    pub async fn sign_out(&self) -> Result<(), StoreError> {
        debug!("clearing session token");
        self.store.clear().await
    }

    /// Mount-time expiry check. Returns true when a stale token was found and
    /// removed.
    pub async fn expire_if_stale(&self) -> Result<bool, StoreError> {
        let token = self.token().await;

        match mount_decision(token.as_deref(), self.now_millis()) {
            MountDecision::Proceed => Ok(false),
            MountDecision::ClearAndReload => {
                warn!("stored session token has expired");
                self.store.clear().await?;
                Ok(true)
            }
        }
    }
}
