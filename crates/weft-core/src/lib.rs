//! weft-core: purchase-order event ingestion and alert derivation.
//!
//! The write path normalizes heterogeneous scan input into a canonical
//! [`event::EventEnvelope`], anchors it to its owning
//! [`model::PurchaseOrder`], and runs the [`alert::RuleSet`] to derive
//! risk [`alert::Alert`]s. The read path ([`story`]) projects one PO's
//! full history. Both depend only on the storage traits in [`store`];
//! transport, UI, and persistence technology live elsewhere.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums per concern ([`error`]); the
//!   core returns outcomes, it never logs-and-swallows.
//! - **Logging**: `tracing` macros, diagnostic only.

pub mod alert;
pub mod error;
pub mod event;
pub mod ingest;
pub mod model;
pub mod store;
pub mod story;

pub use alert::{Alert, RuleSet};
pub use error::{IngestError, StoreError, StoryError};
pub use event::{EventEnvelope, ScanSubmission};
pub use ingest::IngestPipeline;
pub use model::PurchaseOrder;
pub use store::{MemoryStore, StoreSnapshot};
pub use story::PoStory;
