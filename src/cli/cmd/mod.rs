pub mod completion;
pub mod dashboard;
pub mod group;
pub mod login;
pub mod permission;
pub mod profile;
pub mod resource;
pub mod role;
pub mod user;

use anyhow::{Result, bail};
use clap::{Args, CommandFactory, Parser, Subcommand};
use rbac_console::{
    console::Console,
    resources::{
        permission::Permission, permission_group::PermissionGroup, role::Role, user::User,
    },
    router::{Navigation, Route},
};

use crate::{client::CliContext, config::Config};

#[derive(Parser)]
#[command(name = "rbac")]
#[command(about = "Admin console for an RBAC API server", long_about = None)]
pub struct Cli {
    /// Use this profile instead of the current one
    #[arg(long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Log in to an RBAC API server
    Login(login::LoginArgs),

    /// Log out and forget the stored token
    Logout,

    /// Show the account behind the stored token
    Whoami,

    /// Totals and the most recent users (admin only)
    Dashboard,

    /// User management
    #[command(subcommand)]
    User(UserCommand),

    /// Role management
    #[command(subcommand)]
    Role(RoleCommand),

    /// Permission management
    #[command(subcommand)]
    Permission(PermissionCommand),

    /// Permission group management
    #[command(subcommand, alias = "permission-group")]
    Group(GroupCommand),

    /// Profile management
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Print shell completions
    Completion(completion::CompletionArgs),
}

#[derive(Subcommand)]
pub enum UserCommand {
    /// List users (short: ls)
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get a user
    Get(GetArgs),

    /// Create a user
    Create(user::UserCreateArgs),

    /// Update a user
    Update(user::UserUpdateArgs),

    /// Delete a user
    Delete(DeleteArgs),
}

#[derive(Subcommand)]
pub enum RoleCommand {
    /// List roles (short: ls)
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get a role
    Get(GetArgs),

    /// Create a role
    Create(role::RoleArgs),

    /// Rename a role
    Update(role::RoleUpdateArgs),

    /// Delete a role
    Delete(DeleteArgs),
}

#[derive(Subcommand)]
pub enum PermissionCommand {
    /// List permissions (short: ls)
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get a permission
    Get(GetArgs),

    /// Create a permission
    Create(permission::PermissionCreateArgs),

    /// Update a permission
    Update(permission::PermissionUpdateArgs),

    /// Delete a permission
    Delete(DeleteArgs),
}

#[derive(Subcommand)]
pub enum GroupCommand {
    /// List permission groups (short: ls)
    #[command(alias = "ls")]
    List(ListArgs),

    /// Get a permission group
    Get(GetArgs),

    /// Create a permission group
    Create(group::GroupArgs),

    /// Rename a permission group
    Update(group::GroupUpdateArgs),

    /// Delete a permission group
    Delete(DeleteArgs),
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    /// Show the current profile
    Current,

    /// List all profiles (short: ls)
    #[command(alias = "ls")]
    List,

    /// Switch the current profile
    Set(profile::ProfileSetArgs),

    /// Delete a profile
    Delete(profile::ProfileDeleteArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ListArgs {
    /// Only show rows matching this text
    #[arg(long = "search", short = 's')]
    pub search: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct GetArgs {
    /// Id of the record
    pub id: i64,
}

#[derive(Clone, Debug, Args)]
pub struct DeleteArgs {
    /// Id of the record
    pub id: i64,

    /// Skip the confirmation prompt
    #[arg(long = "yes", short = 'y')]
    pub confirm: bool,
}

pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load().await?;
    let profile_name = cli.profile;

    match cli.command {
        Command::Login(args) => login::run_login(config, profile_name, args).await,
        Command::Logout => login::run_logout(&context(config, profile_name)?).await,
        Command::Whoami => login::run_whoami(&context(config, profile_name)?).await,
        Command::Dashboard => dashboard::run_dashboard(&context(config, profile_name)?).await,
        Command::User(cmd) => {
            let ctx = context(config, profile_name)?;
            match cmd {
                UserCommand::List(args) => resource::run_list::<User>(&ctx, args).await,
                UserCommand::Get(args) => resource::run_get::<User>(&ctx, args).await,
                UserCommand::Create(args) => user::run_user_create(&ctx, args).await,
                UserCommand::Update(args) => user::run_user_update(&ctx, args).await,
                UserCommand::Delete(args) => resource::run_delete::<User>(&ctx, args).await,
            }
        }
        Command::Role(cmd) => {
            let ctx = context(config, profile_name)?;
            match cmd {
                RoleCommand::List(args) => resource::run_list::<Role>(&ctx, args).await,
                RoleCommand::Get(args) => resource::run_get::<Role>(&ctx, args).await,
                RoleCommand::Create(args) => role::run_role_create(&ctx, args).await,
                RoleCommand::Update(args) => role::run_role_update(&ctx, args).await,
                RoleCommand::Delete(args) => resource::run_delete::<Role>(&ctx, args).await,
            }
        }
        Command::Permission(cmd) => {
            let ctx = context(config, profile_name)?;
            match cmd {
                PermissionCommand::List(args) => resource::run_list::<Permission>(&ctx, args).await,
                PermissionCommand::Get(args) => resource::run_get::<Permission>(&ctx, args).await,
                PermissionCommand::Create(args) => {
                    permission::run_permission_create(&ctx, args).await
                }
                PermissionCommand::Update(args) => {
                    permission::run_permission_update(&ctx, args).await
                }
                PermissionCommand::Delete(args) => {
                    resource::run_delete::<Permission>(&ctx, args).await
                }
            }
        }
        Command::Group(cmd) => {
            let ctx = context(config, profile_name)?;
            match cmd {
                GroupCommand::List(args) => resource::run_list::<PermissionGroup>(&ctx, args).await,
                GroupCommand::Get(args) => resource::run_get::<PermissionGroup>(&ctx, args).await,
                GroupCommand::Create(args) => group::run_group_create(&ctx, args).await,
                GroupCommand::Update(args) => group::run_group_update(&ctx, args).await,
                GroupCommand::Delete(args) => {
                    resource::run_delete::<PermissionGroup>(&ctx, args).await
                }
            }
        }
        Command::Profile(cmd) => match cmd {
            ProfileCommand::Current => profile::run_profile_current(&config).await,
            ProfileCommand::List => profile::run_profile_list(&config).await,
            ProfileCommand::Set(args) => profile::run_profile_set(&config, args).await,
            ProfileCommand::Delete(args) => profile::run_profile_delete(&config, args).await,
        },
        Command::Completion(args) => completion::print_completion(args.shell, &mut Cli::command()),
    }
}

fn context(config: Config, profile: Option<String>) -> Result<CliContext> {
    let profile = config.resolve_profile_name(profile.as_deref())?;
    Ok(CliContext::new(config, profile))
}

/// The command that shows a route, for hints after login.
pub fn command_for(route: Route) -> &'static str {
    match route {
        Route::Home | Route::Login | Route::Logout => "rbac whoami",
        Route::Users => "rbac user list",
        Route::Roles => "rbac role list",
        Route::Permissions => "rbac permission list",
        Route::PermissionGroups => "rbac group list",
        Route::Admin => "rbac dashboard",
    }
}

/// Mounts the console and navigates to `route`, turning every outcome other
/// than rendering into an error the user can act on.
pub async fn open_view(ctx: &CliContext, console: &Console, route: Route) -> Result<()> {
    if console.mount().await?.is_some() {
        ctx.remember_return_to(route).await?;
        bail!("Your session has expired. Please log in again with `rbac login`");
    }

    match console.navigate_to(route).await {
        Navigation::Render(_) => Ok(()),
        Navigation::Redirect {
            to: Route::Login,
            from,
            ..
        } => {
            if console.session().token().await.is_some() {
                bail!(
                    "{} requires the admin role. Log in with an admin account using `rbac login`",
                    route
                );
            }

            if let Some(from) = from {
                ctx.remember_return_to(from).await?;
            }
            bail!("You are not logged in. Please log in with `rbac login`")
        }
        Navigation::Unavailable(_) => {
            bail!("Could not verify access to {}: the identity check timed out", route)
        }
        other => bail!("Cannot open {}: navigation ended in {:?}", route, other),
    }
}
