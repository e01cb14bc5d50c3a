use crate::cli::GlobalFlags;
use crate::commands::shared::{history_error, rows};
use crate::context::AppContext;
use crate::output::output_rows;

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_session()?;
    let snapshot = ctx.history.refresh().await.map_err(history_error)?;
    output_rows(&rows(&snapshot), flags.format)
}
