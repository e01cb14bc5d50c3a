use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => commands::auth::handle(&action, ctx, flags).await,
        Commands::Check(args) => commands::check::handle(&args, ctx, flags).await,
        Commands::History => commands::history::handle(ctx, flags).await,
        Commands::Clear => commands::clear::handle(ctx, flags).await,
        Commands::Watch(args) => commands::watch::handle(&args, ctx, flags).await,
        Commands::Plot(args) => commands::plot::handle(&args, ctx, flags).await,
        Commands::Form { action } => commands::form::handle(&action, ctx, flags),
        Commands::Contains(args) => commands::contains::handle(&args, flags),
    }
}
