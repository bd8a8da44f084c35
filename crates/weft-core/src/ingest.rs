//! The scan ingestion pipeline.
//!
//! One submission flows through, in order: validate → look up PO →
//! normalize → persist event → evaluate rules → persist alerts. Each
//! request only appends new records and reads PO reference data, so no
//! synchronization is needed beyond what the stores provide.
//!
//! Partial-write policy: if an alert append fails after the event was
//! recorded, the event stays recorded and the store failure propagates.
//! Alert derivation is re-runnable from stored events, so the
//! accepted inconsistency is recoverable out of band.

use crate::alert::RuleSet;
use crate::error::IngestError;
use crate::event::ScanSubmission;
use crate::store::{AlertStore, EventStore, PoStore};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// The write-side pipeline: holds the stores and the rule registry.
pub struct IngestPipeline {
    pos: Arc<dyn PoStore>,
    events: Arc<dyn EventStore>,
    alerts: Arc<dyn AlertStore>,
    rules: RuleSet,
}

impl IngestPipeline {
    /// Assemble a pipeline over the given stores and rules.
    pub fn new(
        pos: Arc<dyn PoStore>,
        events: Arc<dyn EventStore>,
        alerts: Arc<dyn AlertStore>,
        rules: RuleSet,
    ) -> Self {
        Self {
            pos,
            events,
            alerts,
            rules,
        }
    }

    /// Ingest one worker scan. Returns the new event's id.
    ///
    /// # Errors
    ///
    /// - [`IngestError::MissingField`] — a required field is absent or
    ///   empty; nothing was written.
    /// - [`IngestError::PoNotFound`] — the `(tenant, po)` pair is
    ///   unknown; nothing was written.
    /// - [`IngestError::Store`] — a store append failed. The event may
    ///   already be recorded if the failure was on the alert side.
    pub fn ingest_scan(&self, submission: ScanSubmission) -> Result<Uuid, IngestError> {
        submission.validate()?;

        let po = self
            .pos
            .get_po(&submission.tenant_id, &submission.po_id)?
            .ok_or_else(|| IngestError::PoNotFound {
                tenant_id: submission.tenant_id.clone(),
                po_id: submission.po_id.clone(),
            })?;

        debug!(
            tenant_id = %submission.tenant_id,
            po_id = %submission.po_id,
            operation_code = %submission.operation_code,
            "normalizing scan submission"
        );

        let event = submission.into_envelope(Utc::now());
        self.events.append_event(&event)?;

        let derived = self.rules.evaluate(&event, &po);
        for alert in &derived {
            self.alerts.append_alert(alert)?;
        }

        info!(
            event_id = %event.event_id,
            event_type = %event.event_type,
            alerts = derived.len(),
            "scan ingested"
        );

        Ok(event.event_id)
    }
}
