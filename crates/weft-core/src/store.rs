//! Storage abstraction and the in-memory reference implementation.
//!
//! The pipeline and the story read depend only on the three traits
//! here; a persistent backend implements them without touching core
//! logic. Events and alerts are append-only — nothing in this crate
//! mutates a stored record — so implementations only need to provide
//! concurrent-safe append and read, not update semantics.

use crate::alert::Alert;
use crate::error::StoreError;
use crate::event::EventEnvelope;
use crate::model::{PurchaseOrder, RiskLevel};
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Read access to purchase order reference data.
pub trait PoStore: Send + Sync {
    /// Look up a PO by its `(tenant_id, po_id)` identity.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend is unavailable. An
    /// unknown PO is `Ok(None)`, not an error.
    fn get_po(&self, tenant_id: &str, po_id: &str) -> Result<Option<PurchaseOrder>, StoreError>;

    /// All POs for a tenant, in provisioning order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend is unavailable.
    fn list_pos(&self, tenant_id: &str) -> Result<Vec<PurchaseOrder>, StoreError>;
}

/// Append-only event log.
pub trait EventStore: Send + Sync {
    /// Durably record one envelope.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend is unavailable.
    fn append_event(&self, event: &EventEnvelope) -> Result<(), StoreError>;

    /// All envelopes whose `related_ids.po_id` matches, in no
    /// particular order; callers sort.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend is unavailable.
    fn list_events_by_po(&self, po_id: &str) -> Result<Vec<EventEnvelope>, StoreError>;
}

/// Append-only alert record.
pub trait AlertStore: Send + Sync {
    /// Durably record one alert.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend is unavailable.
    fn append_alert(&self, alert: &Alert) -> Result<(), StoreError>;

    /// All alerts for one PO, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend is unavailable.
    fn list_alerts_by_po(&self, po_id: &str) -> Result<Vec<Alert>, StoreError>;

    /// All alerts for a tenant, in append order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend is unavailable.
    fn list_alerts(&self, tenant_id: &str) -> Result<Vec<Alert>, StoreError>;
}

/// RwLock-guarded in-memory store implementing all three traits.
///
/// Supports concurrent readers and writers; suitable for tests, the
/// CLI, and prototype deployments. A poisoned lock surfaces as
/// [`StoreError::Unavailable`] rather than a panic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pos: RwLock<Vec<PurchaseOrder>>,
    events: RwLock<Vec<EventEnvelope>>,
    alerts: RwLock<Vec<Alert>>,
}

fn poisoned(which: &str) -> StoreError {
    StoreError::Unavailable(format!("{which} lock poisoned"))
}

impl MemoryStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with the two bundled demo purchase orders
    /// (tenant `cobalt`).
    #[must_use]
    pub fn with_demo_data() -> Self {
        let store = Self::new();
        for po in demo_purchase_orders() {
            store.insert_po(po);
        }
        store
    }

    /// Provision a PO. Provisioning is external to the pipeline; this
    /// exists for seeding and tests.
    ///
    /// # Panics
    ///
    /// Panics if the PO lock is poisoned (seeding happens before any
    /// concurrent use).
    pub fn insert_po(&self, po: PurchaseOrder) {
        #[allow(clippy::unwrap_used)]
        self.pos.write().unwrap().push(po);
    }
}

impl PoStore for MemoryStore {
    fn get_po(&self, tenant_id: &str, po_id: &str) -> Result<Option<PurchaseOrder>, StoreError> {
        let pos = self.pos.read().map_err(|_| poisoned("po"))?;
        Ok(pos
            .iter()
            .find(|po| po.tenant_id == tenant_id && po.po_id == po_id)
            .cloned())
    }

    fn list_pos(&self, tenant_id: &str) -> Result<Vec<PurchaseOrder>, StoreError> {
        let pos = self.pos.read().map_err(|_| poisoned("po"))?;
        Ok(pos
            .iter()
            .filter(|po| po.tenant_id == tenant_id)
            .cloned()
            .collect())
    }
}

impl EventStore for MemoryStore {
    fn append_event(&self, event: &EventEnvelope) -> Result<(), StoreError> {
        let mut events = self.events.write().map_err(|_| poisoned("event"))?;
        events.push(event.clone());
        Ok(())
    }

    fn list_events_by_po(&self, po_id: &str) -> Result<Vec<EventEnvelope>, StoreError> {
        let events = self.events.read().map_err(|_| poisoned("event"))?;
        Ok(events
            .iter()
            .filter(|event| event.po_id() == Some(po_id))
            .cloned()
            .collect())
    }
}

impl AlertStore for MemoryStore {
    fn append_alert(&self, alert: &Alert) -> Result<(), StoreError> {
        let mut alerts = self.alerts.write().map_err(|_| poisoned("alert"))?;
        alerts.push(alert.clone());
        Ok(())
    }

    fn list_alerts_by_po(&self, po_id: &str) -> Result<Vec<Alert>, StoreError> {
        let alerts = self.alerts.read().map_err(|_| poisoned("alert"))?;
        Ok(alerts
            .iter()
            .filter(|alert| alert.po_id == po_id)
            .cloned()
            .collect())
    }

    fn list_alerts(&self, tenant_id: &str) -> Result<Vec<Alert>, StoreError> {
        let alerts = self.alerts.read().map_err(|_| poisoned("alert"))?;
        Ok(alerts
            .iter()
            .filter(|alert| alert.tenant_id == tenant_id)
            .cloned()
            .collect())
    }
}

/// A full copy of a store's contents, for export/import.
///
/// Lets a host process (the CLI, a debug endpoint) move the in-memory
/// state across process boundaries without the core depending on any
/// persistence technology.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub pos: Vec<PurchaseOrder>,
    pub events: Vec<EventEnvelope>,
    pub alerts: Vec<Alert>,
}

impl MemoryStore {
    /// Export the entire store contents.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a lock is poisoned.
    pub fn snapshot(&self) -> Result<StoreSnapshot, StoreError> {
        Ok(StoreSnapshot {
            pos: self.pos.read().map_err(|_| poisoned("po"))?.clone(),
            events: self.events.read().map_err(|_| poisoned("event"))?.clone(),
            alerts: self.alerts.read().map_err(|_| poisoned("alert"))?.clone(),
        })
    }

    /// Rebuild a store from an exported snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: StoreSnapshot) -> Self {
        Self {
            pos: RwLock::new(snapshot.pos),
            events: RwLock::new(snapshot.events),
            alerts: RwLock::new(snapshot.alerts),
        }
    }
}

/// The bundled demo POs: one apparel tenant, two in-flight orders.
#[must_use]
pub fn demo_purchase_orders() -> Vec<PurchaseOrder> {
    vec![
        PurchaseOrder {
            tenant_id: "cobalt".into(),
            po_id: "KT1823".into(),
            customer: "Cobalt Apparel".into(),
            supplier: "Vietnam Textile Co.".into(),
            factory: "Dongguan Knitting Factory".into(),
            product: "Kids Cardigan Set - Multi".into(),
            quantity: 5000,
            unit: "pcs".into(),
            ship_window_start: "2026-02-01T00:00:00Z".into(),
            ship_window_end: "2026-02-10T00:00:00Z".into(),
            requested_delivery_date: "2026-03-01T00:00:00Z".into(),
            current_stage: "DYEING".into(),
            risk_level: RiskLevel::Medium,
            on_time_probability: 0.76,
        },
        PurchaseOrder {
            tenant_id: "cobalt".into(),
            po_id: "KT1824".into(),
            customer: "Cobalt Apparel".into(),
            supplier: "Vietnam Textile Co.".into(),
            factory: "Bangladesh Textile Ltd".into(),
            product: "Women's Knit Sweater - Cream".into(),
            quantity: 6000,
            unit: "pcs".into(),
            ship_window_start: "2026-02-05T00:00:00Z".into(),
            ship_window_end: "2026-02-15T00:00:00Z".into(),
            requested_delivery_date: "2026-03-05T00:00:00Z".into(),
            current_stage: "SHIPPING".into(),
            risk_level: RiskLevel::Low,
            on_time_probability: 0.9,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ScanSubmission;
    use chrono::Utc;

    fn scan_event(po_id: &str, scanned_at: &str) -> EventEnvelope {
        ScanSubmission {
            tenant_id: "cobalt".into(),
            po_id: po_id.into(),
            operation_code: "QA_PASSED".into(),
            user_id: "worker-1".into(),
            scanned_at: scanned_at.into(),
            ..ScanSubmission::default()
        }
        .into_envelope(Utc::now())
    }

    #[test]
    fn demo_store_finds_seeded_pos() {
        let store = MemoryStore::with_demo_data();
        let po = store
            .get_po("cobalt", "KT1823")
            .expect("store up")
            .expect("seeded");
        assert_eq!(po.factory, "Dongguan Knitting Factory");
        assert_eq!(store.list_pos("cobalt").expect("store up").len(), 2);
    }

    #[test]
    fn lookup_is_tenant_scoped() {
        let store = MemoryStore::with_demo_data();
        assert!(
            store
                .get_po("indigo", "KT1823")
                .expect("store up")
                .is_none()
        );
        assert!(store.list_pos("indigo").expect("store up").is_empty());
    }

    #[test]
    fn events_filter_by_po() {
        let store = MemoryStore::new();
        store
            .append_event(&scan_event("KT1823", "2026-02-03T08:00:00Z"))
            .expect("append");
        store
            .append_event(&scan_event("KT1824", "2026-02-03T09:00:00Z"))
            .expect("append");
        store
            .append_event(&scan_event("KT1823", "2026-02-04T08:00:00Z"))
            .expect("append");

        assert_eq!(
            store.list_events_by_po("KT1823").expect("store up").len(),
            2
        );
        assert_eq!(
            store.list_events_by_po("KT1824").expect("store up").len(),
            1
        );
        assert!(store.list_events_by_po("KT9999").expect("store up").is_empty());
    }

    #[test]
    fn snapshot_roundtrip_preserves_contents() {
        let store = MemoryStore::with_demo_data();
        store
            .append_event(&scan_event("KT1823", "2026-02-03T08:00:00Z"))
            .expect("append");

        let snapshot = store.snapshot().expect("snapshot");
        let restored = MemoryStore::from_snapshot(snapshot.clone());
        assert_eq!(restored.snapshot().expect("snapshot"), snapshot);
        assert_eq!(
            restored.list_events_by_po("KT1823").expect("store up").len(),
            1
        );
    }

    #[test]
    fn alerts_filter_by_po_and_tenant() {
        use crate::alert::{AlertCategory, AlertSeverity, AlertStatus};
        use uuid::Uuid;

        let store = MemoryStore::new();
        let alert = Alert {
            alert_id: Uuid::new_v4(),
            tenant_id: "cobalt".into(),
            po_id: "KT1823".into(),
            category: AlertCategory::Delay,
            severity: AlertSeverity::Warning,
            reason_code: "PACKING_COMPLETED_AFTER_SHIP_WINDOW".into(),
            title: "t".into(),
            description: "d".into(),
            data_sources: vec![],
            recommended_actions: vec![],
            created_at: Utc::now(),
            status: AlertStatus::New,
        };
        store.append_alert(&alert).expect("append");

        assert_eq!(store.list_alerts_by_po("KT1823").expect("store up").len(), 1);
        assert!(store.list_alerts_by_po("KT1824").expect("store up").is_empty());
        assert_eq!(store.list_alerts("cobalt").expect("store up").len(), 1);
        assert!(store.list_alerts("indigo").expect("store up").is_empty());
    }
}
