use pc_storage::clear_form;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLogoutArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
    notice: String,
}

pub fn handle(args: &AuthLogoutArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&sign_out(ctx, args.message.clone()), flags.format)
}

/// End the session and forget the saved form input with it.
fn sign_out(ctx: &AppContext, message: Option<String>) -> AuthLogoutResponse {
    let was_logged_in = ctx.session.is_authenticated();
    ctx.session.logout(message);
    if let Err(error) = clear_form(ctx.storage.as_ref()) {
        tracing::warn!(%error, "failed to clear saved form input");
    }
    let notice = ctx
        .navigator
        .last_reason()
        .map_or_else(|| "You have been logged out.".to_string(), |reason| reason.notice());

    AuthLogoutResponse {
        cleared: was_logged_in,
        notice,
    }
}
