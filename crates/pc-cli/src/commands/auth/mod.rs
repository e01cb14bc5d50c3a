mod login;
mod logout;
mod status;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;
use crate::context::AppContext;

/// Handle `pcheck auth <subcommand>`.
pub async fn handle(
    action: &AuthCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login::handle(args, login::Mode::Login, ctx, flags).await,
        AuthCommands::Register(args) => {
            login::handle(args, login::Mode::Register, ctx, flags).await
        }
        AuthCommands::Logout(args) => logout::handle(args, ctx, flags),
        AuthCommands::Status => status::handle(ctx, flags),
    }
}
