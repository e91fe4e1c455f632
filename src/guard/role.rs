use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::{
    guard::IdentityProvider,
    router::{Navigation, NavigationMode, Route},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Unknown,
    Checking,
    Granted,
    Denied,
    /// The identity request outlived its deadline.
    Undetermined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    Current(GuardState),
    /// A later evaluation was started before this one finished; its result
    /// was dropped.
    Superseded,
}

/// Gate in front of a view that needs a specific role.
///
/// Anything short of an identity response listing the role is a denial.
pub struct RoleGuard {
    identity: Arc<dyn IdentityProvider>,
    required_role: String,
    deadline: Duration,
    sequence: AtomicU64,
    state: watch::Sender<GuardState>,
}

impl RoleGuard {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        required_role: impl Into<String>,
        deadline: Duration,
    ) -> Self {
        let (state, _) = watch::channel(GuardState::Unknown);

        Self {
            identity,
            required_role: required_role.into(),
            deadline,
            sequence: AtomicU64::new(0),
            state,
        }
    }

    pub fn state(&self) -> GuardState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<GuardState> {
        self.state.subscribe()
    }

    pub async fn evaluate(&self) -> Evaluation {
        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(GuardState::Checking);

        let outcome = match tokio::time::timeout(self.deadline, self.identity.identity()).await {
            Ok(Ok(identity)) if identity.has_role(&self.required_role) => GuardState::Granted,
            Ok(Ok(_)) => {
                debug!("identity lacks role '{}'", self.required_role);
                GuardState::Denied
            }
            Ok(Err(e)) => {
                warn!("identity check failed: {}", e);
                GuardState::Denied
            }
            Err(_) => {
                warn!("identity check timed out after {:?}", self.deadline);
                GuardState::Undetermined
            }
        };

        let applied = self.state.send_if_modified(|state| {
            if self.sequence.load(Ordering::SeqCst) != ticket {
                return false;
            }
            *state = outcome;
            true
        });

        if applied {
            Evaluation::Current(outcome)
        } else {
            debug!("discarding superseded identity check #{}", ticket);
            Evaluation::Superseded
        }
    }
}

/// What a guarded route shows for a given guard state.
pub fn gate(route: Route, state: GuardState) -> Navigation {
    match state {
        GuardState::Unknown | GuardState::Checking => Navigation::Loading(route),
        GuardState::Granted => Navigation::Render(route),
        GuardState::Denied => Navigation::Redirect {
            to: Route::Login,
            from: Some(route),
            mode: NavigationMode::ClientSide,
        },
        GuardState::Undetermined => Navigation::Unavailable(route),
    }
}
