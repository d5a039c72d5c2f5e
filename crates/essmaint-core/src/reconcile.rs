// ── Reconciler ──
//
// Pure intersection of the local inventory with the online set. Order
// and duplicates come from the inventory: if the source list names a
// system twice it is commanded twice, each attempt its own failure
// domain.

use crate::model::{OnlineSet, Serial};

/// Filter the inventory down to the systems the service reports online.
///
/// Inventory order is preserved; empty entries are skipped so a blank
/// inventory line can never produce a spurious match.
pub fn reconcile(inventory: &[String], online: &OnlineSet) -> Vec<Serial> {
    inventory
        .iter()
        .map(String::as_str)
        .filter(|entry| !entry.is_empty())
        .filter(|entry| online.contains(*entry))
        .map(Serial::from)
        .collect()
}
