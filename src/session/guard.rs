use crate::{
    router::{Navigation, NavigationMode, Route},
    session::claims::decode_claims,
    utils::time::now_millis,
};

pub fn is_expired(token: Option<&str>) -> bool {
    is_expired_at(token, now_millis())
}

/// Fail-closed expiry check: a token without readable claims or without an
/// `exp` claim is expired, and so is one whose expiry equals `now_millis`.
pub fn is_expired_at(token: Option<&str>, now_millis: u64) -> bool {
    let Some(exp) = decode_claims(token).and_then(|claims| claims.exp()) else {
        return true;
    };

    let exp_millis = (exp as i128) * 1000;
    exp_millis <= now_millis as i128
}

/// Presence check run on every navigation to a protected view. Expiry is
/// left to the mount check.
pub fn require_token(route: Route, token: Option<&str>) -> Navigation {
    match token {
        Some(_) => Navigation::Render(route),
        None => Navigation::Redirect {
            to: Route::Login,
            from: Some(route),
            mode: NavigationMode::ClientSide,
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountDecision {
    Proceed,
    ClearAndReload,
}

pub fn mount_decision(token: Option<&str>, now_millis: u64) -> MountDecision {
    match token {
        Some(token) if is_expired_at(Some(token), now_millis) => MountDecision::ClearAndReload,
        _ => MountDecision::Proceed,
    }
}
