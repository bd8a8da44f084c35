//! Scan submission validation and envelope construction.
//!
//! A [`ScanSubmission`] is the raw shape a scanning client sends.
//! Normalization turns it into an [`EventEnvelope`]: identity is
//! assigned, the operation code is canonicalized, and the payload is
//! shaped. Validation and PO lookup happen before this module's
//! constructor runs (see [`crate::ingest`]); by the time an envelope is
//! built the submission is known-good.

use super::ops::map_operation;
use super::{
    DeviceInfo, EntityType, EventEnvelope, EventPayload, EventSource, LocationInfo, RelatedIds,
    ScanPayload,
};
use crate::error::IngestError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A raw worker-scan submission, exactly as the client sends it.
///
/// Required string fields default to empty on deserialization so that
/// an absent field and an empty field fail validation identically,
/// with a field-level error rather than a serde error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanSubmission {
    pub tenant_id: String,
    pub po_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_unit_id: Option<String>,
    pub operation_code: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationInfo>,
    /// Client-supplied occurrence instant. Recorded verbatim; never
    /// validated against the system clock.
    pub scanned_at: String,
}

impl ScanSubmission {
    /// Check that every required field is present and non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::MissingField`] naming the first missing
    /// field, using the wire (camelCase) field name.
    pub fn validate(&self) -> Result<(), IngestError> {
        for (value, name) in [
            (&self.tenant_id, "tenantId"),
            (&self.po_id, "poId"),
            (&self.operation_code, "operationCode"),
            (&self.user_id, "userId"),
            (&self.scanned_at, "scannedAt"),
        ] {
            if value.is_empty() {
                return Err(IngestError::MissingField(name));
            }
        }
        Ok(())
    }

    /// Build the canonical envelope for this submission.
    ///
    /// The caller supplies `ingested_at` (system receipt time) so the
    /// construction itself stays clock-free and deterministic under
    /// test. A fresh v4 UUID becomes the event identity.
    #[must_use]
    pub fn into_envelope(self, ingested_at: DateTime<Utc>) -> EventEnvelope {
        let entity_id = self
            .physical_unit_id
            .clone()
            .unwrap_or_else(|| self.po_id.clone());

        EventEnvelope {
            event_id: Uuid::new_v4(),
            tenant_id: self.tenant_id,
            entity_type: EntityType::PhysicalUnit,
            entity_id,
            related_ids: RelatedIds {
                po_id: Some(self.po_id),
                line_item_id: self.line_item_id,
                physical_unit_id: self.physical_unit_id,
                shipment_id: None,
            },
            event_type: map_operation(&self.operation_code).to_owned(),
            source: EventSource::WorkerApp,
            timestamp: self.scanned_at,
            location: self.location,
            payload: EventPayload::WorkerScan(ScanPayload {
                user_id: self.user_id,
                metadata: self.metadata,
                device: self.device,
            }),
            ingested_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_submission() -> ScanSubmission {
        ScanSubmission {
            tenant_id: "cobalt".into(),
            po_id: "KT1823".into(),
            line_item_id: None,
            physical_unit_id: Some("unit-0042".into()),
            operation_code: "PACKING_COMPLETED".into(),
            user_id: "worker-77".into(),
            metadata: None,
            device: None,
            location: None,
            scanned_at: "2026-02-11T08:30:00Z".into(),
        }
    }

    #[test]
    fn valid_submission_passes() {
        assert!(valid_submission().validate().is_ok());
    }

    #[test]
    fn each_required_field_is_checked() {
        let cases: [(&str, fn(&mut ScanSubmission)); 5] = [
            ("tenantId", |s| s.tenant_id.clear()),
            ("poId", |s| s.po_id.clear()),
            ("operationCode", |s| s.operation_code.clear()),
            ("userId", |s| s.user_id.clear()),
            ("scannedAt", |s| s.scanned_at.clear()),
        ];

        for (field, clear) in cases {
            let mut submission = valid_submission();
            clear(&mut submission);
            let err = submission.validate().unwrap_err();
            assert!(
                matches!(err, IngestError::MissingField(name) if name == field),
                "expected MissingField({field}), got {err:?}"
            );
        }
    }

    #[test]
    fn absent_json_field_validates_like_empty() {
        let submission: ScanSubmission =
            serde_json::from_str(r#"{"tenantId":"cobalt","poId":"KT1823"}"#).expect("deserialize");
        let err = submission.validate().unwrap_err();
        assert!(matches!(err, IngestError::MissingField("operationCode")));
    }

    #[test]
    fn envelope_uses_physical_unit_as_entity() {
        let envelope = valid_submission().into_envelope(Utc::now());
        assert_eq!(envelope.entity_type, EntityType::PhysicalUnit);
        assert_eq!(envelope.entity_id, "unit-0042");
        assert_eq!(envelope.po_id(), Some("KT1823"));
    }

    #[test]
    fn envelope_falls_back_to_po_as_entity() {
        let mut submission = valid_submission();
        submission.physical_unit_id = None;
        let envelope = submission.into_envelope(Utc::now());
        assert_eq!(envelope.entity_id, "KT1823");
    }

    #[test]
    fn envelope_canonicalizes_operation_code() {
        let mut submission = valid_submission();
        submission.operation_code = "LOAD_FOR_SHIPPING".into();
        let envelope = submission.into_envelope(Utc::now());
        assert_eq!(envelope.event_type, "UNIT_LOADED_ON_TRUCK");
    }

    #[test]
    fn envelope_keeps_scanned_at_verbatim() {
        // Even a non-instant string is recorded as-is; rules that need
        // to parse it will abstain instead.
        let mut submission = valid_submission();
        submission.scanned_at = "not-a-timestamp".into();
        let envelope = submission.into_envelope(Utc::now());
        assert_eq!(envelope.timestamp, "not-a-timestamp");
    }

    #[test]
    fn envelope_ids_are_unique() {
        let a = valid_submission().into_envelope(Utc::now());
        let b = valid_submission().into_envelope(Utc::now());
        assert_ne!(a.event_id, b.event_id);
    }

    #[test]
    fn envelope_source_is_worker_app() {
        let envelope = valid_submission().into_envelope(Utc::now());
        assert_eq!(envelope.source, EventSource::WorkerApp);
        assert!(matches!(envelope.payload, EventPayload::WorkerScan(_)));
    }
}
