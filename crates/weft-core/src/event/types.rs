//! Entity and source enums for the event envelope.
//!
//! Wire names are SCREAMING_SNAKE_CASE to match the envelope's JSON
//! contract. Event *types* are deliberately open strings (see
//! [`crate::event::ops`]); only the entity and source dimensions are
//! closed enums.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The kind of entity an envelope is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    Po,
    LineItem,
    PhysicalUnit,
    Shipment,
    Location,
}

impl EntityType {
    /// All entity types in catalog order.
    pub const ALL: [Self; 5] = [
        Self::Po,
        Self::LineItem,
        Self::PhysicalUnit,
        Self::Shipment,
        Self::Location,
    ];

    /// Canonical wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Po => "PO",
            Self::LineItem => "LINE_ITEM",
            Self::PhysicalUnit => "PHYSICAL_UNIT",
            Self::Shipment => "SHIPMENT",
            Self::Location => "LOCATION",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The origin channel that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventSource {
    /// Factory-floor worker scanning app. The only source on the scan
    /// ingestion path.
    WorkerApp,
    Erp,
    Iot,
    LogisticsApi,
    PublicData,
}

impl EventSource {
    /// All sources in catalog order.
    pub const ALL: [Self; 5] = [
        Self::WorkerApp,
        Self::Erp,
        Self::Iot,
        Self::LogisticsApi,
        Self::PublicData,
    ];

    /// Canonical wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WorkerApp => "WORKER_APP",
            Self::Erp => "ERP",
            Self::Iot => "IOT",
            Self::LogisticsApi => "LOGISTICS_API",
            Self::PublicData => "PUBLIC_DATA",
        }
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown source string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEventSource {
    /// The unrecognised input string.
    pub raw: String,
}

impl fmt::Display for UnknownEventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown event source '{}': expected one of WORKER_APP, ERP, IOT, \
             LOGISTICS_API, PUBLIC_DATA",
            self.raw
        )
    }
}

impl std::error::Error for UnknownEventSource {}

impl FromStr for EventSource {
    type Err = UnknownEventSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WORKER_APP" => Ok(Self::WorkerApp),
            "ERP" => Ok(Self::Erp),
            "IOT" => Ok(Self::Iot),
            "LOGISTICS_API" => Ok(Self::LogisticsApi),
            "PUBLIC_DATA" => Ok(Self::PublicData),
            _ => Err(UnknownEventSource { raw: s.to_string() }),
        }
    }
}
