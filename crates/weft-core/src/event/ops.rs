//! Operation-code mapping for worker scan submissions.
//!
//! Scanning clients send short operation codes tied to factory
//! stations; the envelope records the canonical event type instead.
//! The table is fixed; codes outside it pass through verbatim so that
//! newly deployed station codes flow end to end without a code change
//! here (they simply aren't canonicalized).

/// Canonical event type emitted when packing finishes. The shipping
/// delay rule keys on this value.
pub const PACKING_COMPLETED: &str = "PACKING_COMPLETED";

/// The fixed `(operation code, canonical event type)` table.
pub const OPERATION_TABLE: [(&str, &str); 10] = [
    ("RECEIVE_YARN", "YARN_RECEIVED"),
    ("START_KNITTING", "PRODUCTION_START"),
    ("COMPLETE_KNITTING", "PRODUCTION_COMPLETE"),
    ("START_DYEING", "DYEING_START"),
    ("COMPLETE_DYEING", "DYEING_COMPLETE"),
    ("QA_PASSED", "QA_INSPECTION_PASSED"),
    ("QA_FAILED", "QA_INSPECTION_FAILED"),
    ("PACKING_STARTED", "PACKING_STARTED"),
    ("PACKING_COMPLETED", PACKING_COMPLETED),
    ("LOAD_FOR_SHIPPING", "UNIT_LOADED_ON_TRUCK"),
];

/// Map a raw operation code to its canonical event type.
///
/// Unknown codes are returned unchanged.
#[must_use]
pub fn map_operation(code: &str) -> &str {
    match code {
        "RECEIVE_YARN" => "YARN_RECEIVED",
        "START_KNITTING" => "PRODUCTION_START",
        "COMPLETE_KNITTING" => "PRODUCTION_COMPLETE",
        "START_DYEING" => "DYEING_START",
        "COMPLETE_DYEING" => "DYEING_COMPLETE",
        "QA_PASSED" => "QA_INSPECTION_PASSED",
        "QA_FAILED" => "QA_INSPECTION_FAILED",
        "PACKING_STARTED" => "PACKING_STARTED",
        "PACKING_COMPLETED" => PACKING_COMPLETED,
        "LOAD_FOR_SHIPPING" => "UNIT_LOADED_ON_TRUCK",
        other => other,
    }
}
