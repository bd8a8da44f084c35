//! The canonical event envelope and its payload shapes.
//!
//! Every lifecycle occurrence — a QR scan at a factory station, an ERP
//! milestone, an IoT reading — is recorded as one immutable
//! [`EventEnvelope`]. Envelopes are created once at ingestion and never
//! mutated or deleted by this pipeline.
//!
//! Two instants live on the envelope and they mean different things:
//!
//! - `timestamp` — when the real-world action occurred, supplied by the
//!   origin and recorded verbatim (no clock validation).
//! - `ingested_at` — when this system accepted the event, assigned by
//!   the normalizer.

pub mod normalize;
pub mod ops;
pub mod types;

pub use normalize::ScanSubmission;
pub use ops::map_operation;
pub use types::{EntityType, EventSource, UnknownEventSource};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Optional references tying an envelope to related records.
///
/// On the worker-scan path `po_id` is always populated; the rest depend
/// on what the client scanned. None of these are foreign keys — callers
/// must resolve them through the stores before trusting them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedIds {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub po_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_unit_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_id: Option<String>,
}

/// Where an event physically happened, when the origin knows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

/// Device details reported by a scanning client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
}

/// Payload recorded by a worker scan: who scanned, on what device,
/// plus free-form metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanPayload {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceInfo>,
}

/// Typed payload variants, one per known producer, with an opaque
/// fallback for sources whose shape this crate does not constrain.
///
/// Serialized untagged: the wire form is a plain JSON object either
/// way. `WorkerScan` must stay first so a scan payload (which always
/// carries `userId`) is not swallowed by the opaque variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventPayload {
    WorkerScan(ScanPayload),
    Opaque(serde_json::Map<String, serde_json::Value>),
}

/// One immutable lifecycle occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEnvelope {
    /// Globally unique, generated at normalization time.
    pub event_id: Uuid,
    pub tenant_id: String,
    pub entity_type: EntityType,
    /// The concrete entity this event is about (a physical unit on the
    /// scan path, falling back to the PO itself).
    pub entity_id: String,
    pub related_ids: RelatedIds,
    /// Canonical event type string; open set, see [`ops`].
    pub event_type: String,
    pub source: EventSource,
    /// Origin-supplied occurrence instant, recorded verbatim.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationInfo>,
    pub payload: EventPayload,
    /// System receipt instant, assigned by the normalizer.
    pub ingested_at: DateTime<Utc>,
}

impl EventEnvelope {
    /// The PO this envelope belongs to, if any.
    #[must_use]
    pub fn po_id(&self) -> Option<&str> {
        self.related_ids.po_id.as_deref()
    }
}
