//! Alert derivation rules and the rule registry.
//!
//! Each rule is a pure function from `(event, po)` to an optional
//! [`Alert`], with no dependency on any other rule's outcome. The
//! [`RuleSet`] runs every registered rule against every event and
//! collects all matches in registration order; adding a rule means
//! writing one function and registering it, never touching dispatch.
//!
//! Rules that need to parse timestamps abstain on parse failure: a
//! malformed instant means "rule does not apply", never an error.

use super::{Alert, AlertCategory, AlertSeverity, AlertStatus};
use crate::event::{EventEnvelope, ops};
use crate::model::PurchaseOrder;
use chrono::DateTime;
use uuid::Uuid;

/// A single derivation rule. Pure: same inputs, same decision
/// (identity fields on the produced alert are freshly generated).
pub type AlertRule = fn(&EventEnvelope, &PurchaseOrder) -> Option<Alert>;

/// Ordered collection of independent rule evaluators.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<AlertRule>,
}

impl RuleSet {
    /// The production rule set.
    #[must_use]
    pub fn standard() -> Self {
        let mut set = Self::default();
        set.register(packing_after_ship_window);
        set
    }

    /// Append a rule. Evaluation order is registration order.
    pub fn register(&mut self, rule: AlertRule) {
        self.rules.push(rule);
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule against the event and collect all matches.
    #[must_use]
    pub fn evaluate(&self, event: &EventEnvelope, po: &PurchaseOrder) -> Vec<Alert> {
        self.rules
            .iter()
            .filter_map(|rule| rule(event, po))
            .collect()
    }
}

/// Milliseconds per day, for day-granularity diffs.
const MS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// Reason code emitted by [`packing_after_ship_window`].
pub const REASON_PACKING_AFTER_SHIP_WINDOW: &str = "PACKING_COMPLETED_AFTER_SHIP_WINDOW";

/// Delay rule: packing finished after the PO's ship window closed.
///
/// Keys on the event's own `timestamp` (when packing actually
/// happened), not `ingested_at`. On or before the window end is fine;
/// more than two days late escalates to critical.
#[must_use]
pub fn packing_after_ship_window(event: &EventEnvelope, po: &PurchaseOrder) -> Option<Alert> {
    if event.event_type != ops::PACKING_COMPLETED {
        return None;
    }

    // Abstain if either instant fails to parse.
    let event_time = DateTime::parse_from_rfc3339(&event.timestamp).ok()?;
    let window_end = DateTime::parse_from_rfc3339(&po.ship_window_end).ok()?;

    #[allow(clippy::cast_precision_loss)]
    let days_diff =
        (event_time.timestamp_millis() - window_end.timestamp_millis()) as f64 / MS_PER_DAY;

    if days_diff <= 0.0 {
        return None;
    }

    let severity = if days_diff > 2.0 {
        AlertSeverity::Critical
    } else {
        AlertSeverity::Warning
    };

    tracing::debug!(
        po_id = %po.po_id,
        days_diff,
        severity = %severity,
        "packing completed after ship window end"
    );

    Some(Alert {
        alert_id: Uuid::new_v4(),
        tenant_id: event.tenant_id.clone(),
        po_id: event
            .po_id()
            .unwrap_or(event.entity_id.as_str())
            .to_owned(),
        category: AlertCategory::Delay,
        severity,
        reason_code: REASON_PACKING_AFTER_SHIP_WINDOW.to_owned(),
        title: "Packing completed after ship window end".to_owned(),
        description: format!(
            "Packing was completed {days_diff:.1} days after the ship window end date. \
             This PO is at risk of late shipment."
        ),
        data_sources: vec!["WorkerScans".to_owned()],
        recommended_actions: vec![
            "Review shipping options (expedite if necessary).".to_owned(),
            "Notify customer about potential delay.".to_owned(),
        ],
        created_at: event.ingested_at,
        status: AlertStatus::New,
    })
}
