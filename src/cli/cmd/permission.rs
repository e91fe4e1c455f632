use anyhow::Result;
use clap::Args;
use rbac_console::{
    resources::permission::{Permission, PermissionDraft},
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
pub struct PermissionCreateArgs {
    /// Permission code, uppercase letters and underscores (eg. USER_READ)
    code: String,

    #[arg(long)]
    description: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct PermissionUpdateArgs {
    /// Id of the permission
    id: i64,

    #[arg(long)]
    code: Option<String>,

    #[arg(long)]
    description: Option<String>,
}

pub struct PermissionTableRow {
    id: i64,
    code: String,
    description: Option<String>,
}

impl TableRow for PermissionTableRow {
    fn headers() -> Vec<TableHeader> {
        vec![
            TableHeader::new("id"),
            TableHeader::new("code").important(),
            TableHeader::new("description").max_width(60),
        ]
    }

    fn cells(self) -> Vec<Option<String>> {
        vec![Some(self.id.to_string()), Some(self.code), self.description]
    }
}

impl ResourceView for Permission {
    type Row = PermissionTableRow;

    const ROUTE: Route = Route::Permissions;

    fn row(&self) -> PermissionTableRow {
        PermissionTableRow {
            id: self.permission_id,
            code: self.permission_code.clone(),
            description: self.description.clone(),
        }
    }

    fn summary(&self) -> Summary {
        Summary::new()
            .field("id", self.permission_id.to_string())
            .important("code", self.permission_code.clone())
            .optional("description", self.description.clone())
    }
}

pub async fn run_permission_create(ctx: &CliContext, args: PermissionCreateArgs) -> Result<()> {
    let mut panel = open_panel::<Permission>(ctx).await?;
    let draft = PermissionDraft {
        permission_code: args.code,
        description: args.description,
    };

    save(&mut panel, &draft, None).await
}

pub async fn run_permission_update(ctx: &CliContext, args: PermissionUpdateArgs) -> Result<()> {
    let (mut panel, permission) = load_for_update::<Permission>(ctx, args.id).await?;

    let mut draft = PermissionDraft::from(&permission);
    if let Some(code) = args.code {
        draft.permission_code = code;
    }
    if let Some(description) = args.description {
        draft.description = Some(description);
    }

    save(&mut panel, &draft, Some(permission.permission_id)).await
}
