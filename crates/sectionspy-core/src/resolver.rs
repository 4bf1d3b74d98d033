//! Active-region resolution.
//!
//! Given one batch of visibility events and the currently active region,
//! pick the region that should be active next:
//!
//! - no event in the batch is visible: keep `current` (sticky);
//! - otherwise the visible event delivered last in the batch wins.
//!
//! Batch order comes from the observer's watch list and carries no
//! document-order meaning; "last visible wins" is the whole tie-break.

use crate::observer::VisibilityEvent;
use crate::registry::RegionId;

/// Decide the active region after one batch.
///
/// Returns the region of the last visible event in `events`. When no event
/// is visible the current region is kept, so losing visibility alone never
/// clears it. Before anything has qualified this is `None`.
pub fn resolve(events: &[VisibilityEvent], current: Option<&RegionId>) -> Option<RegionId> {
    match events.iter().rev().find(|e| e.is_visible) {
        Some(winner) => Some(winner.region.clone()),
        None => current.cloned(),
    }
}
