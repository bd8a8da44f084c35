//! PO seed file parsing.
//!
//! Provisioning purchase orders is outside the pipeline's scope; the
//! CLI fills the gap with a TOML seed file so operators can load
//! reference data without a provisioning system:
//!
//! ```toml
//! [[po]]
//! tenantId = "cobalt"
//! poId = "KT1823"
//! customer = "Cobalt Apparel"
//! supplier = "Vietnam Textile Co."
//! factory = "Dongguan Knitting Factory"
//! product = "Kids Cardigan Set - Multi"
//! quantity = 5000
//! unit = "pcs"
//! shipWindowStart = "2026-02-01T00:00:00Z"
//! shipWindowEnd = "2026-02-10T00:00:00Z"
//! requestedDeliveryDate = "2026-03-01T00:00:00Z"
//! currentStage = "DYEING"
//! riskLevel = "MEDIUM"
//! onTimeProbability = 0.76
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use weft_core::PurchaseOrder;

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    po: Vec<PurchaseOrder>,
}

/// Parse the seed file at `path` into a list of POs.
///
/// # Errors
///
/// Fails if the file cannot be read or is not valid seed TOML.
pub fn load(path: &Path) -> Result<Vec<PurchaseOrder>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    let file: SeedFile = toml::from_str(&raw)
        .with_context(|| format!("failed to parse seed file {}", path.display()))?;
    Ok(file.po)
}
