use anyhow::{Result, anyhow, bail};
use rbac_console::{
    console::panel::ResourcePanel,
    resources::{DraftMode, Resource, Validate},
    router::Route,
};

use crate::{
    client::CliContext,
    cmd::{DeleteArgs, GetArgs, ListArgs, open_view},
    ui::{
        message::{message_info, message_notice, message_warn},
        summary::Summary,
        table::{Table, TableRow},
    },
};

/// How a resource shows up in the terminal.
pub trait ResourceView: Resource {
    type Row: TableRow;

    const ROUTE: Route;

    fn row(&self) -> Self::Row;

    fn summary(&self) -> Summary;
}

/// Opens the resource's view and hands back its panel.
pub async fn open_panel<R: ResourceView>(ctx: &CliContext) -> Result<ResourcePanel<R>> {
    let console = ctx.console().await?;
    open_view(ctx, &console, R::ROUTE).await?;

    Ok(console.panel::<R>())
}

pub async fn run_list<R: ResourceView>(ctx: &CliContext, args: ListArgs) -> Result<()> {
    let mut panel = open_panel::<R>(ctx).await?;
    panel.refresh().await.map_err(|notice| anyhow!(notice.text))?;

    if let Some(search) = args.search {
        panel.search(search);
    }

    let rows = panel.rows();
    if rows.is_empty() {
        message_info(format!("No {} found", R::KIND.plural()));
        return Ok(());
    }

    Table::from_rows(rows.into_iter().map(R::row)).print();

    Ok(())
}

pub async fn run_get<R: ResourceView>(ctx: &CliContext, args: GetArgs) -> Result<()> {
    let panel = open_panel::<R>(ctx).await?;
    let record = panel.get(args.id).await.map_err(|notice| anyhow!(notice.text))?;

    record.summary().print();

    Ok(())
}

/// Fetches the record an update starts from.
pub async fn load_for_update<R: ResourceView>(
    ctx: &CliContext,
    id: i64,
) -> Result<(ResourcePanel<R>, R)> {
    let panel = open_panel::<R>(ctx).await?;
    let record = panel.get(id).await.map_err(|notice| anyhow!(notice.text))?;

    Ok((panel, record))
}

/// Creates when `editing` is `None`, otherwise updates that id.
///
/// Validation hints fail the command before anything is sent. After that a
/// warning can only come from the refetch, so the change went through.
pub async fn save<R: ResourceView>(
    panel: &mut ResourcePanel<R>,
    draft: &R::Draft,
    editing: Option<i64>,
) -> Result<()> {
    let mode = match editing {
        Some(_) => DraftMode::Update,
        None => DraftMode::Create,
    };

    let hints = draft.validate(mode);
    if !hints.is_empty() {
        bail!("Not saved: {}", hints.join("; "));
    }

    let notice = panel.save(draft, editing).await;
    if notice.is_error() {
        bail!(notice.text);
    }
    message_notice(&notice);

    Ok(())
}

pub async fn run_delete<R: ResourceView>(ctx: &CliContext, args: DeleteArgs) -> Result<()> {
    let mut panel = open_panel::<R>(ctx).await?;
    let notice = panel.delete(args.id, args.confirm).await;

    if !args.confirm {
        message_warn(format!(
            "{} This action cannot be undone. To confirm, run the command with --yes (or -y).",
            notice.text
        ));
        return Ok(());
    }

    if notice.is_error() {
        bail!(notice.text);
    }
    message_notice(&notice);

    Ok(())
}
