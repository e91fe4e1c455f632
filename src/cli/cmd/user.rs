use anyhow::Result;
use clap::Args;
use rbac_console::{
    resources::user::{User, UserDraft},
    router::Route,
};

use crate::{
    client::CliContext,
    cmd::resource::{ResourceView, load_for_update, open_panel, save},
    ui::{
        summary::Summary,
        table::{TableHeader, TableRow},
    },
};

#[derive(Clone, Debug, Args)]
pub struct UserCreateArgs {
    #[arg(long)]
    first_name: String,

    #[arg(long)]
    last_name: String,

    /// Email address, also the login name
    #[arg(long)]
    mail: String,

    /// Phone number or any other contact
    #[arg(long)]
    contact: Option<String>,

    #[arg(long)]
    password: String,

    /// Create the account disabled
    #[arg(long)]
    inactive: bool,
}

#[derive(Clone, Debug, Args)]
pub struct UserUpdateArgs {
    /// Id of the user
    id: i64,

    #[arg(long)]
    first_name: Option<String>,

    #[arg(long)]
    last_name: Option<String>,

    #[arg(long)]
    mail: Option<String>,

    #[arg(long)]
    contact: Option<String>,

    /// New password; the current one is kept when omitted
    #[arg(long)]
    password: Option<String>,

    /// Enable or disable the account (true/false)
    #[arg(long)]
    active: Option<bool>,
}

pub struct UserTableRow {
    id: i64,
    name: String,
    mail: String,
    contact: Option<String>,
    status: String,
}

impl TableRow for UserTableRow {
    fn headers() -> Vec<TableHeader> {
        vec![
            TableHeader::new("id"),
            TableHeader::new("name"),
            TableHeader::new("email").max_width(40),
            TableHeader::new("contact"),
            TableHeader::new("status").important(),
        ]
    }

    fn cells(self) -> Vec<Option<String>> {
        vec![
            Some(self.id.to_string()),
            Some(self.name),
            Some(self.mail),
            self.contact,
            Some(self.status),
        ]
    }
}

fn status(user: &User) -> String {
    if user.active() { "active" } else { "inactive" }.to_string()
}

impl ResourceView for User {
    type Row = UserTableRow;

    const ROUTE: Route = Route::Users;

    fn row(&self) -> UserTableRow {
        UserTableRow {
            id: self.user_id,
            name: self.display_name(),
            mail: self.mail.clone(),
            contact: self.contact.clone(),
            status: status(self),
        }
    }

    fn summary(&self) -> Summary {
        Summary::new()
            .field("id", self.user_id.to_string())
            .field("name", self.display_name())
            .field("email", self.mail.clone())
            .optional("contact", self.contact.clone())
            .important("status", status(self))
    }
}

pub async fn run_user_create(ctx: &CliContext, args: UserCreateArgs) -> Result<()> {
    let mut panel = open_panel::<User>(ctx).await?;
    let draft = UserDraft {
        first_name: Some(args.first_name),
        last_name: Some(args.last_name),
        mail: args.mail,
        contact: args.contact,
        is_active: Some(!args.inactive),
        password: Some(args.password),
    };

    save(&mut panel, &draft, None).await
}

pub async fn run_user_update(ctx: &CliContext, args: UserUpdateArgs) -> Result<()> {
    let (mut panel, user) = load_for_update::<User>(ctx, args.id).await?;

    let mut draft = UserDraft::from(&user);
    if let Some(first_name) = args.first_name {
        draft.first_name = Some(first_name);
    }
    if let Some(last_name) = args.last_name {
        draft.last_name = Some(last_name);
    }
    if let Some(mail) = args.mail {
        draft.mail = mail;
    }
    if let Some(contact) = args.contact {
        draft.contact = Some(contact);
    }
    if let Some(active) = args.active {
        draft.is_active = Some(active);
    }
    draft.password = args.password;

    save(&mut panel, &draft, Some(user.user_id)).await
}
