pub const ADMIN_ROLE: &str = "admin";
pub const DEFAULT_PROFILE: &str = "default";
pub const DEFAULT_IDENTITY_TIMEOUT_SECS: u64 = 10;
pub const RECENT_USERS_LIMIT: usize = 5;

pub const LOGIN_PATH: &str = "/auth/login";
pub const IDENTITY_PATH: &str = "/auth/me";
