//! Administrative console for an RBAC backend.
//!
//! The console manages users, roles, permissions and permission groups over
//! the backend's REST API. Its own logic is the session gate: storing the
//! bearer token, dropping it once expired, keeping signed-out users on the
//! login view and holding the admin dashboard behind a role check.
//!
//! Every check here is for the user's convenience. The backend authorizes
//! each request on its own.

pub mod api_client;
pub mod console;
pub mod constants;
pub mod guard;
pub mod resources;
pub mod router;
pub mod session;
pub mod utils;
