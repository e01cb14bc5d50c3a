use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::history_error;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct ClearResponse {
    cleared: bool,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_session()?;
    ctx.history.clear().await.map_err(history_error)?;
    output(&ClearResponse { cleared: true }, flags.format)
}
