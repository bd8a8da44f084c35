//! Reference data model: purchase orders and their risk classification.

pub mod po;

pub use po::{PurchaseOrder, RiskLevel};
