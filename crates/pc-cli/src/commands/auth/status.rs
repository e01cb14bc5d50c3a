use pc_auth::SessionState;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    username: Option<String>,
    expires_at: Option<String>,
    base_url: String,
    storage: String,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (username, expires_at) = match ctx.session.state() {
        SessionState::LoggedIn(session) => {
            (Some(session.username), Some(session.expires_at.to_rfc3339()))
        }
        SessionState::LoggedOut { .. } => (None, None),
    };

    output(
        &AuthStatusResponse {
            authenticated: ctx.session.is_authenticated(),
            username,
            expires_at,
            base_url: ctx.config.api.base_url.clone(),
            storage: ctx.storage_dir.display().to_string(),
        },
        flags.format,
    )
}
