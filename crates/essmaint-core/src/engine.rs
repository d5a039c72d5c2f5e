// ── Cycle engine ──
//
// Full lifecycle of the reconciliation loop: authenticate, poll, load
// inventory, intersect, dispatch. `run` drives cycles on a fixed period;
// a failed cycle is logged and the scheduler waits for the next tick.
//
// Cycles are serialized by construction: each cycle is awaited inline
// inside the interval loop, so a cycle that overruns the period delays
// subsequent ticks (`MissedTickBehavior::Delay`) instead of overlapping.

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use essmaint_api::transport::TransportConfig;
use essmaint_api::MaintClient;

use crate::config::EngineConfig;
use crate::dispatch;
use crate::error::CoreError;
use crate::inventory;
use crate::poller;
use crate::reconcile::reconcile;

/// Counts surfaced after each cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Distinct systems the service reported online.
    pub online: usize,
    /// Inventory lines read (including blanks).
    pub inventory_entries: usize,
    /// Work-list length after reconciliation.
    pub matched: usize,
    /// Commands acknowledged by the service.
    pub succeeded: usize,
    /// Commands the service rejected or that failed in transit.
    pub failed: usize,
}

/// The reconciliation engine. Cheap to clone; all state is per-cycle.
#[derive(Clone)]
pub struct Engine {
    config: EngineConfig,
    client: MaintClient,
}

impl Engine {
    /// Build an engine and its HTTP client from configuration.
    pub fn new(config: EngineConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.request_timeout,
        };
        let client = MaintClient::new(config.base_url.clone(), &transport)?;
        Ok(Self { config, client })
    }

    /// Access the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run one full reconciliation cycle.
    ///
    /// Obtains a fresh token (tokens are never reused across cycles),
    /// polls all state buckets, intersects with the inventory, and
    /// dispatches commands. Login and inventory failures abort the
    /// cycle; poll and command failures are isolated inside their
    /// stages.
    pub async fn run_cycle(&self, cancel: &CancellationToken) -> Result<CycleReport, CoreError> {
        info!("starting reconciliation cycle");

        let token = self
            .client
            .login(&self.config.username, &self.config.password)
            .await?;

        let online = poller::poll_online(&self.client, &token, self.config.page_size).await;
        let entries = inventory::load(&self.config.inventory_path)?;
        let work_list = reconcile(&entries, &online);

        info!(
            online = online.len(),
            inventory = entries.len(),
            matched = work_list.len(),
            "reconciliation complete"
        );

        let outcomes = dispatch::dispatch(
            &self.client,
            &token,
            &work_list,
            &self.config.command,
            self.config.pacing_delay,
            cancel,
        )
        .await;

        let succeeded = outcomes.iter().filter(|o| o.succeeded()).count();
        let failed = outcomes.len() - succeeded;

        info!(succeeded, failed, "cycle complete");

        Ok(CycleReport {
            online: online.len(),
            inventory_entries: entries.len(),
            matched: work_list.len(),
            succeeded,
            failed,
        })
    }

    /// Drive cycles on the configured period until cancelled.
    ///
    /// The first cycle starts immediately. Cycle failures are caught and
    /// logged here; nothing stops the next scheduled cycle.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut interval = tokio::time::interval(self.config.cycle_period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    info!("shutdown requested; stopping scheduler");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.run_cycle(&cancel).await {
                        error!(error = %e, "cycle failed; waiting for next tick");
                    }
                }
            }
        }
    }
}
