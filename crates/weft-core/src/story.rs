//! The PO story: read-side projection of one purchase order's history.
//!
//! A story is the PO record, its events sorted ascending by occurrence
//! timestamp, and its alerts. Pure read; no side effects; safe to
//! re-run. Sorting compares the timestamp strings byte-wise, which is
//! chronological for well-formed RFC 3339 UTC instants — malformed
//! timestamps still sort deterministically, just not meaningfully.

use crate::alert::Alert;
use crate::error::StoryError;
use crate::event::EventEnvelope;
use crate::model::PurchaseOrder;
use crate::store::{AlertStore, EventStore, PoStore};
use serde::{Deserialize, Serialize};

/// Everything known about one PO, ready for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoStory {
    pub po: PurchaseOrder,
    /// Events ascending by `timestamp`.
    pub timeline: Vec<EventEnvelope>,
    /// Alerts in store order (no ordering contract).
    pub alerts: Vec<Alert>,
}

/// Assemble the story for `(tenant_id, po_id)`.
///
/// # Errors
///
/// - [`StoryError::PoNotFound`] — no such PO for the tenant.
/// - [`StoryError::Store`] — a backing store failed.
pub fn assemble(
    pos: &dyn PoStore,
    events: &dyn EventStore,
    alerts: &dyn AlertStore,
    tenant_id: &str,
    po_id: &str,
) -> Result<PoStory, StoryError> {
    let po = pos
        .get_po(tenant_id, po_id)?
        .ok_or_else(|| StoryError::PoNotFound {
            tenant_id: tenant_id.to_owned(),
            po_id: po_id.to_owned(),
        })?;

    let mut timeline = events.list_events_by_po(po_id)?;
    timeline.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    let alerts = alerts.list_alerts_by_po(po_id)?;

    Ok(PoStory {
        po,
        timeline,
        alerts,
    })
}
