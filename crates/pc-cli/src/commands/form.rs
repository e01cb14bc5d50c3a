use pc_core::{CheckRequest, FormSnapshot};
use pc_storage::{clear_form, load_form, save_form};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FormCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `pcheck form <subcommand>`. No session is needed.
pub fn handle(action: &FormCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let storage = ctx.storage.as_ref();
    let snapshot = match action {
        FormCommands::Show => load_form(storage),
        FormCommands::Set(args) => {
            let request = CheckRequest::new(args.x, args.y, args.r)?;
            save_form(storage, request)?;
            FormSnapshot::from(request)
        }
        FormCommands::Clear => {
            clear_form(storage)?;
            FormSnapshot::default()
        }
    };
    output(&snapshot, flags.format)
}
