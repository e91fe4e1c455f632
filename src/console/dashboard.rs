use tracing::warn;

use crate::{
    api_client::ApiClient, console::notice::Notice, constants::RECENT_USERS_LIMIT,
    resources::user::User,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub users: usize,
    pub roles: usize,
    pub permissions: usize,
    pub permission_groups: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub recent_users: Vec<User>,
}

/// Loads the four collections concurrently. One failure fails the whole load.
pub async fn load_dashboard(api: &ApiClient) -> Result<Dashboard, Notice> {
    let (users_client, roles_client, permissions_client, groups_client) = (
        api.users(),
        api.roles(),
        api.permissions(),
        api.permission_groups(),
    );

    let result = tokio::try_join!(
        users_client.list(),
        roles_client.list(),
        permissions_client.list(),
        groups_client.list(),
    );

    let (users, roles, permissions, groups) = result.map_err(|e| {
        warn!("failed to load dashboard data: {}", e);
        Notice::error("Failed to load dashboard data")
    })?;

    Ok(Dashboard {
        stats: DashboardStats {
            users: users.len(),
            roles: roles.len(),
            permissions: permissions.len(),
            permission_groups: groups.len(),
        },
        recent_users: users.into_iter().take(RECENT_USERS_LIMIT).collect(),
    })
}
