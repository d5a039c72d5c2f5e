// essmaint-core: the reconciliation cycle engine.
//
// One cycle = authenticate, poll each state bucket concurrently, load the
// local inventory, intersect, dispatch the maintenance command serially
// with pacing. The engine runs cycles on a fixed period and isolates
// every failure below the scheduler.

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod inventory;
pub mod model;
pub mod poller;
pub mod reconcile;

// ── Primary re-exports ──────────────────────────────────────────────
pub use essmaint_api::CommandSpec;

pub use config::EngineConfig;
pub use dispatch::CommandOutcome;
pub use engine::{CycleReport, Engine};
pub use error::CoreError;
pub use model::{OnlineSet, Serial};
pub use reconcile::reconcile;
