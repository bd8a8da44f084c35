//! Derived risk alerts.
//!
//! Alerts are produced exclusively by the rule engine (see [`rules`])
//! as a side effect of ingesting one event. Status transitions after
//! creation (review, resolution) belong to external actors; this crate
//! only ever writes `New`.

pub mod rules;

pub use rules::RuleSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Broad alert classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertCategory {
    Delay,
    Quality,
    Disruption,
}

impl AlertCategory {
    /// Canonical wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delay => "DELAY",
            Self::Quality => "QUALITY",
            Self::Disruption => "DISRUPTION",
        }
    }
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum AlertSeverity {
    Info = 0,
    Warning = 1,
    Critical = 2,
}

impl AlertSeverity {
    /// Numeric rank for ordering comparisons.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Canonical wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert triage lifecycle. Only `New` is written by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertStatus {
    New,
    InReview,
    Resolved,
}

impl AlertStatus {
    /// Canonical wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::InReview => "IN_REVIEW",
            Self::Resolved => "RESOLVED",
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A derived, actionable notice that a PO's timeline deviates from
/// expectation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Globally unique, generated when the rule fires.
    pub alert_id: Uuid,
    pub tenant_id: String,
    pub po_id: String,
    pub category: AlertCategory,
    pub severity: AlertSeverity,
    /// Stable machine-readable cause, e.g.
    /// `PACKING_COMPLETED_AFTER_SHIP_WINDOW`.
    pub reason_code: String,
    pub title: String,
    pub description: String,
    /// Names of the data feeds that contributed to this alert.
    pub data_sources: Vec<String>,
    /// Suggested operator follow-ups, in priority order.
    pub recommended_actions: Vec<String>,
    /// Equals the triggering event's `ingested_at`.
    pub created_at: DateTime<Utc>,
    pub status: AlertStatus,
}
