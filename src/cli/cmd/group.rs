use anyhow::Result;
use clap::Args;
use rbac_console::{
    resources::permission_group::{PermissionGroup, PermissionGroupDraft},
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
pub struct GroupArgs {
    /// Name of the permission group
    name: String,
}

#[derive(Clone, Debug, Args)]
pub struct GroupUpdateArgs {
    /// Id of the permission group
    id: i64,

    /// New name of the permission group
    name: String,
}

pub struct GroupTableRow {
    id: i64,
    name: String,
}

impl TableRow for GroupTableRow {
    fn headers() -> Vec<TableHeader> {
        vec![TableHeader::new("id"), TableHeader::new("name").important()]
    }

    fn cells(self) -> Vec<Option<String>> {
        vec![Some(self.id.to_string()), Some(self.name)]
    }
}

impl ResourceView for PermissionGroup {
    type Row = GroupTableRow;

    const ROUTE: Route = Route::PermissionGroups;

    fn row(&self) -> GroupTableRow {
        GroupTableRow {
            id: self.group_id,
            name: self.group_name.clone(),
        }
    }

    fn summary(&self) -> Summary {
        Summary::new()
            .field("id", self.group_id.to_string())
            .important("name", self.group_name.clone())
    }
}

pub async fn run_group_create(ctx: &CliContext, args: GroupArgs) -> Result<()> {
    let mut panel = open_panel::<PermissionGroup>(ctx).await?;
    let draft = PermissionGroupDraft {
        group_name: args.name,
    };

    save(&mut panel, &draft, None).await
}

pub async fn run_group_update(ctx: &CliContext, args: GroupUpdateArgs) -> Result<()> {
    let (mut panel, group) = load_for_update::<PermissionGroup>(ctx, args.id).await?;
    let mut draft = PermissionGroupDraft::from(&group);
    draft.group_name = args.name;

    save(&mut panel, &draft, Some(group.group_id)).await
}
