use chrono::NaiveDate;
use honai_core::{
    Level, ReportEngine, ReportError, ReportRequest, ReportRow, TerritoryFilter, TerritoryPath,
};
use std::collections::HashSet;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn path(branch: &str, subbranch: &str, cluster: &str, kabupaten: &str) -> TerritoryPath {
    TerritoryPath {
        regional: "PUMA".into(),
        branch: branch.into(),
        subbranch: subbranch.into(),
        cluster: cluster.into(),
        kabupaten: kabupaten.into(),
    }
}

/// Two branches; JAYAPURA has two subbranches so a subbranch filter is
/// a strict narrowing of its branch filter.
fn engine_with_reference() -> ReportEngine {
    let engine = ReportEngine::build_test().unwrap();
    for p in [
        path("AMBON", "AMBON RAYA", "AMBON SERAM", "KOTA AMBON"),
        path("JAYAPURA", "JAYAPURA KOTA", "JAYAPURA SENTANI", "KOTA JAYAPURA"),
        path("JAYAPURA", "JAYAPURA KOTA", "JAYAPURA SENTANI", "JAYAPURA"),
        path("JAYAPURA", "JAYAPURA LUAR", "KEEROM ARSO", "KEEROM"),
        path("JAYAPURA", "JAYAPURA LUAR", "KEEROM ARSO", "SARMI"),
    ] {
        engine.store().insert_territory(&p).unwrap();
    }
    engine
}

fn filtered(filter: TerritoryFilter) -> ReportRequest {
    ReportRequest {
        metric: "trx".into(),
        date: Some(d(2025, 6, 15)),
        filter,
    }
}

fn kabupaten_names(rows: &[ReportRow]) -> HashSet<String> {
    rows.iter()
        .filter_map(ReportRow::as_data)
        .filter(|r| r.level == Level::Kabupaten)
        .map(|r| r.territory.clone())
        .collect()
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// A branch filter scopes every lower level to that branch's
/// descendants.
#[test]
fn branch_filter_scopes_descendants() {
    let engine = engine_with_reference();

    let rows = engine
        .compute_report(&filtered(TerritoryFilter {
            branch: Some("JAYAPURA".into()),
            ..Default::default()
        }))
        .unwrap();

    assert_eq!(
        kabupaten_names(&rows),
        HashSet::from([
            "KOTA JAYAPURA".to_string(),
            "JAYAPURA".to_string(),
            "KEEROM".to_string(),
            "SARMI".to_string(),
        ]),
    );
    for row in rows.iter().filter_map(ReportRow::as_data) {
        if row.level == Level::Subbranch {
            assert!(row.territory.starts_with("JAYAPURA"), "{}", row.territory);
        }
    }
}

/// Adding a valid subbranch narrows the row set to a subset of the
/// branch-only result.
#[test]
fn subbranch_filter_narrows_branch_filter() {
    let engine = engine_with_reference();

    let branch_only = engine
        .compute_report(&filtered(TerritoryFilter {
            branch: Some("JAYAPURA".into()),
            ..Default::default()
        }))
        .unwrap();
    let narrowed = engine
        .compute_report(&filtered(TerritoryFilter {
            branch: Some("JAYAPURA".into()),
            subbranch: Some("JAYAPURA LUAR".into()),
            ..Default::default()
        }))
        .unwrap();

    let wide = kabupaten_names(&branch_only);
    let narrow = kabupaten_names(&narrowed);
    assert!(narrow.is_subset(&wide), "{narrow:?} ⊄ {wide:?}");
    assert_eq!(narrow, HashSet::from(["KEEROM".to_string(), "SARMI".to_string()]));
}

/// Hierarchy containment is strict: a cluster without its subbranch is
/// rejected before any data is touched.
#[test]
fn cluster_without_subbranch_is_invalid() {
    let engine = engine_with_reference();

    let err = engine
        .compute_report(&filtered(TerritoryFilter {
            branch: Some("JAYAPURA".into()),
            cluster: Some("KEEROM ARSO".into()),
            ..Default::default()
        }))
        .unwrap_err();

    assert!(matches!(err, ReportError::InvalidFilter { .. }), "{err}");
}

/// A branch name missing from the reference is rejected, not silently
/// widened to an empty report.
#[test]
fn unknown_branch_is_invalid() {
    let engine = engine_with_reference();

    let err = engine
        .compute_report(&filtered(TerritoryFilter {
            branch: Some("TERNATE".into()),
            ..Default::default()
        }))
        .unwrap_err();

    assert!(matches!(err, ReportError::InvalidFilter { .. }), "{err}");
}

/// A subbranch that exists under a different branch fails containment.
#[test]
fn subbranch_under_wrong_branch_is_invalid() {
    let engine = engine_with_reference();

    let err = engine
        .compute_report(&filtered(TerritoryFilter {
            branch: Some("AMBON".into()),
            subbranch: Some("JAYAPURA KOTA".into()),
            ..Default::default()
        }))
        .unwrap_err();

    assert!(matches!(err, ReportError::InvalidFilter { .. }), "{err}");
}

#[test]
fn unknown_metric_is_rejected() {
    let engine = engine_with_reference();

    let err = engine
        .compute_report(&ReportRequest {
            metric: "cheese_exports".into(),
            date: Some(d(2025, 6, 15)),
            filter: TerritoryFilter::default(),
        })
        .unwrap_err();

    assert!(matches!(err, ReportError::UnknownMetric { .. }), "{err}");
}
