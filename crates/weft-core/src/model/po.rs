//! Purchase order reference data.
//!
//! POs are provisioned by an external system and are read-only inside
//! this crate: the ingestion path looks one up to anchor a scan, the
//! shipping rule reads its ship-window end, and the story read returns
//! it whole. Stage and risk fields are maintained by collaborators
//! outside this pipeline.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Ordered risk classification for a purchase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum RiskLevel {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl RiskLevel {
    /// All risk levels in ascending order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Numeric rank for ordering comparisons.
    #[must_use]
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Canonical wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown risk level string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRiskLevel {
    /// The unrecognised input string.
    pub raw: String,
}

impl fmt::Display for UnknownRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown risk level '{}': expected one of LOW, MEDIUM, HIGH",
            self.raw
        )
    }
}

impl std::error::Error for UnknownRiskLevel {}

impl FromStr for RiskLevel {
    type Err = UnknownRiskLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            _ => Err(UnknownRiskLevel { raw: s.to_string() }),
        }
    }
}

/// A production/shipping work order tracked through pipeline stages.
///
/// Identity is the `(tenant_id, po_id)` pair; `po_id` alone is not
/// globally unique. Ship-window bounds and the requested delivery date
/// are RFC 3339 instants kept as strings: they arrive from external
/// provisioning verbatim, and the rule engine parses them on demand so
/// that a malformed value degrades to a rule abstention rather than a
/// rejected record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub tenant_id: String,
    pub po_id: String,
    pub customer: String,
    pub supplier: String,
    pub factory: String,
    /// Free-form product description.
    pub product: String,
    pub quantity: u32,
    /// Unit for `quantity`, e.g. "pcs".
    pub unit: String,
    /// Scheduled departure window start (RFC 3339).
    pub ship_window_start: String,
    /// Scheduled departure window end (RFC 3339).
    pub ship_window_end: String,
    /// Customer-requested delivery date (RFC 3339).
    pub requested_delivery_date: String,
    /// Free-form label for the PO's current pipeline stage.
    pub current_stage: String,
    pub risk_level: RiskLevel,
    /// Precomputed likelihood in `[0, 1]` of meeting the requested
    /// delivery date. Maintained externally.
    pub on_time_probability: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_po() -> PurchaseOrder {
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
        }
    }

    #[test]
    fn risk_level_rank_is_ascending() {
        assert!(RiskLevel::Low.rank() < RiskLevel::Medium.rank());
        assert!(RiskLevel::Medium.rank() < RiskLevel::High.rank());
    }

    #[test]
    fn risk_level_display_fromstr_roundtrip() {
        for level in RiskLevel::ALL {
            let reparsed: RiskLevel = level.to_string().parse().expect("should roundtrip");
            assert_eq!(level, reparsed);
        }
    }

    #[test]
    fn risk_level_rejects_unknown() {
        let err = "SEVERE".parse::<RiskLevel>().unwrap_err();
        assert_eq!(err.raw, "SEVERE");
        assert!(err.to_string().contains("expected one of"));
    }

    #[test]
    fn po_serializes_camel_case() {
        let json = serde_json::to_value(sample_po()).expect("serialize");
        assert_eq!(json["tenantId"], "cobalt");
        assert_eq!(json["poId"], "KT1823");
        assert_eq!(json["shipWindowEnd"], "2026-02-10T00:00:00Z");
        assert_eq!(json["riskLevel"], "MEDIUM");
        assert_eq!(json["onTimeProbability"], 0.76);
    }

    #[test]
    fn po_serde_roundtrip() {
        let po = sample_po();
        let json = serde_json::to_string(&po).expect("serialize");
        let deser: PurchaseOrder = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(po, deser);
    }
}
