// ── Paced sequential dispatcher ──
//
// Commands go out one at a time, in work-list order, with a fixed pacing
// delay between consecutive dispatches -- the service has implicit rate
// limits, so concurrency here would defeat the point. A failed dispatch
// is recorded and the loop moves on; the delay happens either way.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use essmaint_api::{AccessToken, CommandSpec, MaintClient};

use crate::error::CoreError;
use crate::model::Serial;

/// Outcome of one command attempt. Reported, never persisted.
#[derive(Debug)]
pub struct CommandOutcome {
    pub serial: Serial,
    pub result: Result<(), CoreError>,
}

impl CommandOutcome {
    pub fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Dispatch the maintenance command to every work-list entry in order.
///
/// N entries produce N attempts and N-1 pacing delays when run to
/// completion. On cancellation the remaining queue is abandoned; the
/// returned sequence accounts for exactly the entries attempted.
pub async fn dispatch(
    client: &MaintClient,
    token: &AccessToken,
    work_list: &[Serial],
    cmd: &CommandSpec,
    pacing: Duration,
    cancel: &CancellationToken,
) -> Vec<CommandOutcome> {
    let mut outcomes = Vec::with_capacity(work_list.len());

    for (index, serial) in work_list.iter().enumerate() {
        if index > 0 {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                () = tokio::time::sleep(pacing) => {}
            }
        }
        if cancel.is_cancelled() {
            break;
        }

        let result = client
            .send_command(token, serial.as_str(), cmd)
            .await
            .map_err(CoreError::from);

        match &result {
            Ok(()) => info!(%serial, "command sent"),
            Err(e) => warn!(%serial, error = %e, "command failed; continuing"),
        }

        outcomes.push(CommandOutcome {
            serial: serial.clone(),
            result,
        });
    }

    if outcomes.len() < work_list.len() {
        warn!(
            attempted = outcomes.len(),
            total = work_list.len(),
            "dispatch cancelled; remaining queue abandoned"
        );
    }

    outcomes
}
