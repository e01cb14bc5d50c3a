use pc_core::geometry::Vec2;
use pc_core::plot::PlotTransform;
use pc_core::{CheckRequest, Point};
use pc_storage::{load_form, save_form};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CheckArgs;
use crate::commands::shared::{HistoryRow, history_error};
use crate::context::AppContext;
use crate::output::output_rows;

pub async fn handle(args: &CheckArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let target = target(args)?;
    let point = check_point(ctx, target, args.r).await?;
    output_rows(&[HistoryRow::from(&point)], flags.format)
}

/// The point to check: typed coordinates, or a plot position mapped back to
/// plot units.
fn target(args: &CheckArgs) -> anyhow::Result<Vec2> {
    match (args.at_svg.as_deref(), args.x, args.y) {
        (Some(&[sx, sy]), _, _) => Ok(PlotTransform::default().to_plot(sx, sy)),
        (None, Some(x), Some(y)) => Ok(Vec2::new(x, y)),
        _ => anyhow::bail!("pass X and Y, or --at-svg SX SY"),
    }
}

/// Validate, remember the input, then submit it. `r` falls back to the
/// saved form value.
async fn check_point(ctx: &AppContext, target: Vec2, r: Option<f64>) -> anyhow::Result<Point> {
    let r = r.unwrap_or_else(|| load_form(ctx.storage.as_ref()).r);
    let request = CheckRequest::new(target.x, target.y, r)?;
    ctx.require_session()?;

    // Remember the input even if the backend call fails.
    if let Err(error) = save_form(ctx.storage.as_ref(), request) {
        tracing::warn!(%error, "failed to save form input");
    }

    let point = ctx.history.submit(request).await.map_err(history_error)?;
    tracing::debug!(result = point.result, "point checked");
    Ok(point)
}
