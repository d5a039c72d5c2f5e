// ── Concurrent state poller ──
//
// Fans out one `GetSystems` query per state bucket, joins them all, and
// unions the successes. A failed state degrades to an empty contribution
// rather than aborting the others -- partial visibility is still useful
// for reconciliation, and the next cycle is the retry mechanism.

use futures_util::future::join_all;
use tracing::{info, warn};

use essmaint_api::{AccessToken, MaintClient, SystemState};

use crate::model::{OnlineSet, Serial};

/// Poll every state bucket concurrently and union the results.
///
/// Fan-out is fixed at the number of states; the join waits for all
/// queries regardless of individual outcome. Duplicate serials across
/// buckets collapse by set semantics.
pub async fn poll_online(
    client: &MaintClient,
    token: &AccessToken,
    page_size: u32,
) -> OnlineSet {
    let queries = SystemState::ALL.into_iter().map(|state| async move {
        match client.list_systems(token, state, page_size).await {
            Ok(serials) => {
                info!(%state, count = serials.len(), "retrieved systems");
                serials
            }
            Err(e) => {
                warn!(%state, error = %e, "state poll failed; contributing empty set");
                Vec::new()
            }
        }
    });

    join_all(queries)
        .await
        .into_iter()
        .flatten()
        .map(Serial::from)
        .collect()
}
