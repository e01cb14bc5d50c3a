use anyhow::Context;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthCredentialsArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Clone, Copy, Debug)]
pub enum Mode {
    Login,
    Register,
}

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    username: String,
    expires_at: String,
}

pub async fn handle(
    args: &AuthCredentialsArgs,
    mode: Mode,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let session = match mode {
        Mode::Login => ctx
            .session
            .login(&args.username, &args.password)
            .await
            .context("login failed")?,
        Mode::Register => ctx
            .session
            .register(&args.username, &args.password)
            .await
            .context("registration failed")?,
    };

    output(
        &AuthLoginResponse {
            authenticated: true,
            username: session.username,
            expires_at: session.expires_at.to_rfc3339(),
        },
        flags.format,
    )
}
