//! End-to-end pipeline tests: scan in, story out.
//!
//! Exercises the full write path (validate → lookup → normalize →
//! persist → derive → persist) against the in-memory store, then reads
//! everything back through the story projection.

use std::collections::HashSet;
use std::sync::Arc;

use weft_core::alert::AlertSeverity;
use weft_core::store::{AlertStore, EventStore, PoStore};
use weft_core::{IngestError, IngestPipeline, MemoryStore, RuleSet, ScanSubmission, story};

fn demo_pipeline() -> (Arc<MemoryStore>, IngestPipeline) {
    let store = Arc::new(MemoryStore::with_demo_data());
    let pipeline = IngestPipeline::new(
        Arc::clone(&store) as Arc<dyn PoStore>,
        Arc::clone(&store) as Arc<dyn EventStore>,
        Arc::clone(&store) as Arc<dyn AlertStore>,
        RuleSet::standard(),
    );
    (store, pipeline)
}

fn scan(po_id: &str, operation_code: &str, scanned_at: &str) -> ScanSubmission {
    ScanSubmission {
        tenant_id: "cobalt".into(),
        po_id: po_id.into(),
        operation_code: operation_code.into(),
        user_id: "worker-77".into(),
        scanned_at: scanned_at.into(),
        ..ScanSubmission::default()
    }
}

#[test]
fn full_production_run_builds_an_ordered_story() {
    let (store, pipeline) = demo_pipeline();

    // A realistic production run for KT1823, submitted out of order.
    let scans = [
        ("COMPLETE_KNITTING", "2026-02-04T17:00:00Z"),
        ("RECEIVE_YARN", "2026-02-01T06:30:00Z"),
        ("COMPLETE_DYEING", "2026-02-06T15:00:00Z"),
        ("START_KNITTING", "2026-02-02T07:00:00Z"),
        ("QA_PASSED", "2026-02-07T10:00:00Z"),
        ("START_DYEING", "2026-02-05T08:00:00Z"),
    ];
    for (code, at) in scans {
        pipeline.ingest_scan(scan("KT1823", code, at)).expect("ingest");
    }

    let story =
        story::assemble(&*store, &*store, &*store, "cobalt", "KT1823").expect("story");

    let types: Vec<&str> = story
        .timeline
        .iter()
        .map(|e| e.event_type.as_str())
        .collect();
    assert_eq!(
        types,
        [
            "YARN_RECEIVED",
            "PRODUCTION_START",
            "PRODUCTION_COMPLETE",
            "DYEING_START",
            "DYEING_COMPLETE",
            "QA_INSPECTION_PASSED",
        ]
    );
    assert!(story.alerts.is_empty(), "on-time run derives no alerts");
}

#[test]
fn event_ids_are_unique_across_ingests() {
    let (_, pipeline) = demo_pipeline();

    let mut seen = HashSet::new();
    for i in 0..50 {
        let at = format!("2026-02-03T08:{i:02}:00Z");
        let id = pipeline
            .ingest_scan(scan("KT1823", "QA_PASSED", &at))
            .expect("ingest");
        assert!(seen.insert(id), "duplicate event id {id}");
    }
}

#[test]
fn late_packing_severity_tracks_days_late() {
    // KT1823's ship window ends 2026-02-10T00:00:00Z.
    let cases = [
        ("2026-02-10T00:00:00Z", None),                           // boundary: 0 days
        ("2026-02-11T00:00:00Z", Some(AlertSeverity::Warning)),   // 1 day
        ("2026-02-13T00:00:01Z", Some(AlertSeverity::Critical)),  // > 2 days
    ];

    for (at, expected) in cases {
        let (store, pipeline) = demo_pipeline();
        pipeline
            .ingest_scan(scan("KT1823", "PACKING_COMPLETED", at))
            .expect("ingest");

        let alerts = store.list_alerts_by_po("KT1823").expect("store up");
        match expected {
            None => assert!(alerts.is_empty(), "no alert expected at {at}"),
            Some(severity) => {
                assert_eq!(alerts.len(), 1, "one alert expected at {at}");
                assert_eq!(alerts[0].severity, severity, "severity at {at}");
            }
        }
    }
}

#[test]
fn alerts_stay_scoped_to_their_po() {
    let (store, pipeline) = demo_pipeline();

    // KT1823 packs late; KT1824 (window ends 02-15) packs on time.
    pipeline
        .ingest_scan(scan("KT1823", "PACKING_COMPLETED", "2026-02-12T00:00:00Z"))
        .expect("ingest");
    pipeline
        .ingest_scan(scan("KT1824", "PACKING_COMPLETED", "2026-02-14T00:00:00Z"))
        .expect("ingest");

    assert_eq!(store.list_alerts_by_po("KT1823").expect("store up").len(), 1);
    assert!(store.list_alerts_by_po("KT1824").expect("store up").is_empty());
    assert_eq!(store.list_alerts("cobalt").expect("store up").len(), 1);
}

#[test]
fn rejected_submissions_leave_no_trace() {
    let (store, pipeline) = demo_pipeline();

    let mut missing = scan("KT1823", "PACKING_COMPLETED", "2026-02-13T00:00:00Z");
    missing.scanned_at.clear();
    assert!(matches!(
        pipeline.ingest_scan(missing).unwrap_err(),
        IngestError::MissingField("scannedAt")
    ));

    assert!(matches!(
        pipeline
            .ingest_scan(scan("KT0000", "QA_PASSED", "2026-02-05T00:00:00Z"))
            .unwrap_err(),
        IngestError::PoNotFound { .. }
    ));

    assert!(store.list_events_by_po("KT1823").expect("store up").is_empty());
    assert!(store.list_events_by_po("KT0000").expect("store up").is_empty());
    assert!(store.list_alerts("cobalt").expect("store up").is_empty());
}

#[test]
fn unknown_operation_codes_flow_end_to_end() {
    let (store, pipeline) = demo_pipeline();

    pipeline
        .ingest_scan(scan("KT1823", "STEAM_PRESS", "2026-02-08T11:00:00Z"))
        .expect("ingest");

    let events = store.list_events_by_po("KT1823").expect("store up");
    assert_eq!(events[0].event_type, "STEAM_PRESS");
    // A verbatim code is never PACKING_COMPLETED, so no alert.
    assert!(store.list_alerts("cobalt").expect("store up").is_empty());
}

#[test]
fn story_rerun_after_writes_settle_is_identical() {
    let (store, pipeline) = demo_pipeline();
    pipeline
        .ingest_scan(scan("KT1823", "PACKING_COMPLETED", "2026-02-11T06:00:00Z"))
        .expect("ingest");

    let a = story::assemble(&*store, &*store, &*store, "cobalt", "KT1823").expect("story");
    let b = story::assemble(&*store, &*store, &*store, "cobalt", "KT1823").expect("story");
    assert_eq!(a, b);
    assert_eq!(a.alerts.len(), 1);
    assert_eq!(a.timeline.len(), 1);
}
