use crate::events::{LoadState, Progress};
use anyhow::Result;
use tokio::select;
use tokio::sync::watch::Receiver;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Follows acquisition status updates and logs each one.
///
/// Returns the last status seen once a terminal state arrives, the sender goes
/// away, or `cancel` fires. A pending update is always drained before
/// cancellation is honoured, so a terminal status sent just ahead of `cancel`
/// is still reported.
pub async fn run(mut status_rx: Receiver<Progress>, cancel: CancellationToken) -> Result<Progress> {
    let mut last = status_rx.borrow_and_update().clone();
    if last.is_terminal() {
        report(&last);
        return Ok(last);
    }

    loop {
        select! {
            biased;
            changed = status_rx.changed() => {
                if changed.is_err() {
                    // Producer finished without a terminal update.
                    break;
                }
                last = status_rx.borrow_and_update().clone();
                report(&last);
                if last.is_terminal() {
                    break;
                }
            }
            _ = cancel.cancelled() => break,
        }
    }
    Ok(last)
}

fn report(status: &Progress) {
    match status.state {
        LoadState::Loading => info!(
            year = status.current_year,
            total_years = status.total_years,
            "{}",
            status.message
        ),
        LoadState::Done => info!(total_years = status.total_years, "{}", status.message),
        LoadState::Failed => error!("{}", status.message),
    }
}
