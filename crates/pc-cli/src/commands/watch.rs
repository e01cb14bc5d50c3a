use std::time::Duration;

use pc_auth::SessionState;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::WatchArgs;
use crate::commands::shared::rows;
use crate::context::AppContext;
use crate::output::output_rows;

/// Follow the history until the session ends or the user interrupts.
///
/// The watchdog enforces expiry and storage changes made by other processes;
/// the poller keeps the history fresh. Every published snapshot is printed.
pub async fn handle(args: &WatchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_session()?;

    let poll_interval = args
        .interval_ms
        .filter(|ms| *ms > 0)
        .map_or_else(|| ctx.config.history.poll_interval(), Duration::from_millis);

    let mut session_rx = ctx.session.subscribe();
    let mut history_rx = ctx.history.subscribe();
    let _watchdog = ctx.session.start_watchdog(ctx.config.session.check_interval());
    let _poller = ctx.history.start_polling(poll_interval);
    tracing::info!(interval = ?poll_interval, "watching history");

    loop {
        tokio::select! {
            changed = history_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = history_rx.borrow_and_update().clone();
                output_rows(&rows(&snapshot), flags.format)?;
            }
            changed = session_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = session_rx.borrow_and_update().clone();
                if let SessionState::LoggedOut { reason } = state {
                    if let Some(reason) = reason {
                        eprintln!("{}", reason.notice());
                    }
                    break;
                }
            }
            result = tokio::signal::ctrl_c() => {
                result?;
                tracing::debug!("interrupted");
                break;
            }
        }
    }

    Ok(())
}
