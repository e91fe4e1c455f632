use std::time::Duration;

use anyhow::{Result, anyhow, bail};
use clap::Args;
use rbac_console::{
    router::{Navigation, Route},
    session::claims::Claims,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::{
    client::CliContext,
    cmd::{command_for, open_view},
    config::Config,
    ui::{
        message::{message_detail, message_info, message_success, message_warn},
        summary::Summary,
    },
};

#[derive(Args)]
pub struct LoginArgs {
    /// Base url of the API server (required the first time a profile is used)
    #[arg(long)]
    api: Option<String>,

    /// Account email
    #[arg(long, short = 'u')]
    username: String,

    /// Account password; read from stdin when omitted
    #[arg(long, short = 'p')]
    password: Option<String>,
}

async fn read_password() -> Result<String> {
    message_info("Password:");

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;

    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("No password given");
    }

    Ok(password)
}

pub async fn run_login(config: Config, profile: Option<String>, args: LoginArgs) -> Result<()> {
    let mut config = config;
    let name = profile.unwrap_or_else(|| config.current_profile.clone());

    match args.api {
        Some(api) => config.upsert_profile(&name, &api),
        None => {
            config.get_profile(&name).map_err(|_| {
                anyhow!(
                    "Profile {} does not exist yet. Pass --api <url> to create it",
                    name
                )
            })?;
        }
    }
    config.current_profile = name.clone();
    config.save().await?;

    let password = match args.password {
        Some(password) => password,
        None => read_password().await?,
    };

    let ctx = CliContext::new(config, name);
    let console = ctx.console().await?;
    let landing = console.login(&args.username, &password).await?;

    message_success("Login successful!");
    match landing {
        Navigation::Redirect {
            to: Route::Admin, ..
        } => message_info("Signed in with admin access. See `rbac dashboard` for an overview"),
        _ => message_info(format!("Signed in as {}", args.username)),
    }

    if let Some(route) = ctx.take_return_to().await? {
        message_detail(format!(
            "You were on your way to {}. Continue with `{}`",
            route,
            command_for(route)
        ));
    }

    Ok(())
}

pub async fn run_logout(ctx: &CliContext) -> Result<()> {
    let console = ctx.console().await?;
    if console.session().token().await.is_none() {
        message_info("Not logged in");
        return Ok(());
    }

    console.navigate_to(Route::Logout).await;
    message_info(format!("Logged out of profile {}", ctx.profile));

    Ok(())
}

/// Time left until `exp` (seconds since the epoch); zero once it has passed.
fn time_left(exp: i64, now_millis: u64) -> Duration {
    let now = i64::try_from(now_millis).unwrap_or(i64::MAX);
    let remaining_ms = exp.saturating_mul(1000).saturating_sub(now).max(0);

    Duration::from_secs(remaining_ms as u64 / 1000)
}

fn whoami_summary(
    profile: &str,
    claims: Option<&Claims>,
    now_millis: u64,
    roles: Vec<String>,
) -> Summary {
    let subject = claims.and_then(|c| c.sub()).map(String::from);
    let expires_in = claims
        .and_then(|c| c.exp())
        .map(|exp| humantime::format_duration(time_left(exp, now_millis)).to_string());

    Summary::new()
        .field("profile", profile)
        .optional("subject", subject)
        .optional("expires in", expires_in)
        .list("roles", roles)
}

pub async fn run_whoami(ctx: &CliContext) -> Result<()> {
    let console = ctx.console().await?;
    open_view(ctx, &console, Route::Home).await?;

    let session = console.session();
    let claims = session.claims().await;

    let roles = match console.api().auth().me().await {
        Ok(identity) => identity.roles,
        Err(e) => {
            warn!("identity lookup failed: {}", e);
            message_warn("Could not fetch roles from the server");
            vec![]
        }
    };

    whoami_summary(&ctx.profile, claims.as_ref(), session.now_millis(), roles).print();

    Ok(())
}
