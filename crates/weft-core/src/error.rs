//! Error taxonomy for the ingestion and read paths.
//!
//! Three failure classes cross the crate boundary:
//!
//! - [`IngestError`] — a scan submission was rejected (bad input or
//!   unknown PO) or could not be persisted.
//! - [`StoryError`] — a story read referenced an unknown PO or the
//!   store was unavailable.
//! - [`StoreError`] — a storage collaborator failed. Callers may retry;
//!   the core itself never does.
//!
//! Rule timestamp parse failures are deliberately absent here: a rule
//! that cannot parse its inputs abstains, it does not fail.

/// A storage collaborator could not serve the request.
///
/// Surfaced to transport layers as a retryable server-side failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store is unavailable (e.g. poisoned lock, lost
    /// connection in a persistent implementation).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Failure modes of the scan ingestion pipeline.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// A required submission field is missing or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// No purchase order exists for `(tenant_id, po_id)`.
    #[error("purchase order '{po_id}' not found for tenant '{tenant_id}'")]
    PoNotFound { tenant_id: String, po_id: String },

    /// Event or alert persistence failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IngestError {
    /// Stable machine-readable code for transport layers and agents.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "E1001",
            Self::PoNotFound { .. } => "E1002",
            Self::Store(_) => "E5001",
        }
    }

    /// Whether the caller may retry the same submission unchanged.
    ///
    /// Client-input failures are final; store failures are transient.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

/// Failure modes of the story (timeline) read path.
#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    /// No purchase order exists for `(tenant_id, po_id)`.
    #[error("purchase order '{po_id}' not found for tenant '{tenant_id}'")]
    PoNotFound { tenant_id: String, po_id: String },

    /// A backing store failed while assembling the story.
    #[error(transparent)]
    Store(#[from] StoreError),
}
