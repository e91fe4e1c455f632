use anyhow::{Result, anyhow};
use rbac_console::{resources::user::User, router::Route};

use crate::{
    client::CliContext,
    cmd::{open_view, resource::ResourceView},
    ui::{message::message_info, summary::Summary, table::Table},
};

pub async fn run_dashboard(ctx: &CliContext) -> Result<()> {
    let console = ctx.console().await?;
    open_view(ctx, &console, Route::Admin).await?;

    let dashboard = console
        .dashboard()
        .await
        .map_err(|notice| anyhow!(notice.text))?;

    Summary::new()
        .important("users", dashboard.stats.users.to_string())
        .important("roles", dashboard.stats.roles.to_string())
        .important("permissions", dashboard.stats.permissions.to_string())
        .important(
            "permission groups",
            dashboard.stats.permission_groups.to_string(),
        )
        .print();

    if dashboard.recent_users.is_empty() {
        message_info("No users yet");
        return Ok(());
    }

    message_info("Recent users:");
    Table::from_rows(dashboard.recent_users.iter().map(User::row)).print();

    Ok(())
}
