use std::path::Path;

use anyhow::Context;
use pc_core::plot::{PlotTransform, render_svg};
use pc_storage::load_form;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::PlotArgs;
use crate::commands::shared::history_error;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct PlotResponse {
    path: String,
    r: f64,
    points: usize,
}

pub async fn handle(args: &PlotArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let r = args.r.unwrap_or_else(|| load_form(ctx.storage.as_ref()).r);

    let points = if args.no_points {
        Vec::new()
    } else if ctx.session.is_authenticated() {
        ctx.history.refresh().await.map_err(history_error)?.to_vec()
    } else {
        tracing::warn!("not signed in; plotting the region without history points");
        Vec::new()
    };

    let svg = render_svg(Some(r), &points, &PlotTransform::default());

    match &args.output {
        Some(path) => {
            write_document(path, &svg)?;
            output(
                &PlotResponse {
                    path: path.display().to_string(),
                    r,
                    points: points.len(),
                },
                flags.format,
            )
        }
        None => {
            print!("{svg}");
            Ok(())
        }
    }
}

fn write_document(path: &Path, svg: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, svg).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::write_document;

    #[test]
    fn document_lands_in_nested_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("out/plot.svg");

        write_document(&path, "<svg/>").expect("write");

        assert_eq!(std::fs::read_to_string(&path).expect("read"), "<svg/>");
    }
}
