use anyhow::Result;
use clap::Args;
use rbac_console::constants::DEFAULT_PROFILE;

use crate::{
    config::Config,
    ui::message::{message_detail, message_info, message_warn},
};

#[derive(Args)]
pub struct ProfileSetArgs {
    /// Name of the profile
    name: String,
}

#[derive(Args)]
pub struct ProfileDeleteArgs {
    /// Name of the profile
    name: String,

    #[arg(long = "yes", short = 'y')]
    confirm: bool,
}

pub async fn run_profile_current(config: &Config) -> Result<()> {
    let profile = config.get_current_profile()?;
    message_info(format!(
        "Current profile: {} ({})",
        profile.name, profile.api_url
    ));
    if profile.token.is_none() {
        message_detail("Not logged in");
    }

    Ok(())
}

pub async fn run_profile_list(config: &Config) -> Result<()> {
    if config.profiles.is_empty() {
        message_info("No profiles yet. Create one with `rbac login --api <url>`");
        return Ok(());
    }

    message_info("Available profiles:");
    for profile in &config.profiles {
        if profile.name == config.current_profile {
            message_detail(format!("* {} ({})", profile.name, profile.api_url));
        } else {
            message_info(format!("  {} ({})", profile.name, profile.api_url));
        }
    }

    Ok(())
}

pub async fn run_profile_set(config: &Config, args: ProfileSetArgs) -> Result<()> {
    let mut config = config.clone();
    let profile = config.get_profile(&args.name)?;

    config.current_profile = profile.name.clone();
    config.save().await?;

    message_info(format!("Current profile set to: {}", profile.name));

    Ok(())
}

pub async fn run_profile_delete(config: &Config, args: ProfileDeleteArgs) -> Result<()> {
    let mut config = config.clone();
    let profile = config.get_profile(&args.name)?;

    if !args.confirm {
        message_warn(format!(
            "You are about to delete the profile '{}' and its stored token. This action cannot be undone. To confirm, run the command with --yes (or -y).",
            profile.name
        ));
        return Ok(());
    }

    config.profiles.retain(|p| p.name != profile.name);

    if config.current_profile == profile.name {
        config.current_profile = config
            .profiles
            .first()
            .map(|p| p.name.clone())
            .unwrap_or(DEFAULT_PROFILE.to_string());
    }
    config.save().await?;

    message_info(format!("Profile '{}' deleted", profile.name));
    message_info(format!(
        "Current profile set to: {}",
        config.current_profile
    ));

    Ok(())
}
