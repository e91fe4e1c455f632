use anyhow::Result;
use clap::Args;
use rbac_console::{
    resources::role::{Role, RoleDraft},
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
pub struct RoleArgs {
    /// Name of the role
    name: String,
}

#[derive(Clone, Debug, Args)]
pub struct RoleUpdateArgs {
    /// Id of the role
    id: i64,

    /// New name of the role
    name: String,
}

pub struct RoleTableRow {
    id: i64,
    name: String,
}

impl TableRow for RoleTableRow {
    fn headers() -> Vec<TableHeader> {
        vec![TableHeader::new("id"), TableHeader::new("name").important()]
    }

    fn cells(self) -> Vec<Option<String>> {
        vec![Some(self.id.to_string()), Some(self.name)]
    }
}

impl ResourceView for Role {
    type Row = RoleTableRow;

    const ROUTE: Route = Route::Roles;

    fn row(&self) -> RoleTableRow {
        RoleTableRow {
            id: self.role_id,
            name: self.role_name.clone(),
        }
    }

    fn summary(&self) -> Summary {
        Summary::new()
            .field("id", self.role_id.to_string())
            .important("name", self.role_name.clone())
    }
}

pub async fn run_role_create(ctx: &CliContext, args: RoleArgs) -> Result<()> {
    let mut panel = open_panel::<Role>(ctx).await?;
    let draft = RoleDraft {
        role_name: args.name,
    };

    save(&mut panel, &draft, None).await
}

pub async fn run_role_update(ctx: &CliContext, args: RoleUpdateArgs) -> Result<()> {
    let (mut panel, role) = load_for_update::<Role>(ctx, args.id).await?;
    let mut draft = RoleDraft::from(&role);
    draft.role_name = args.name;

    save(&mut panel, &draft, Some(role.role_id)).await
}
