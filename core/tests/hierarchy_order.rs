use chrono::NaiveDate;
use honai_core::{
    Level, ReportEngine, ReportRequest, ReportRow, TerritoryFilter, TerritoryPath,
};

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

fn engine_with_reference() -> ReportEngine {
    let engine = ReportEngine::build_test().unwrap();
    for p in [
        path("AMBON", "AMBON RAYA", "AMBON SERAM", "KOTA AMBON"),
        path("AMBON", "AMBON RAYA", "AMBON SERAM", "MALUKU TENGAH"),
        path("JAYAPURA", "JAYAPURA KOTA", "JAYAPURA SENTANI", "KOTA JAYAPURA"),
        path("JAYAPURA", "JAYAPURA KOTA", "JAYAPURA SENTANI", "KEEROM"),
    ] {
        engine.store().insert_territory(&p).unwrap();
    }
    engine
}

fn request(metric: &str, date: NaiveDate) -> ReportRequest {
    ReportRequest {
        metric: metric.into(),
        date: Some(date),
        filter: TerritoryFilter::default(),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// An unfiltered report starts with exactly one Regional row, then the
/// four section headers in level order, each exactly once.
#[test]
fn headers_appear_once_in_level_order() {
    let engine = engine_with_reference();

    let rows = engine.compute_report(&request("trx", d(2025, 6, 15))).unwrap();

    match &rows[0] {
        ReportRow::Data(data) => {
            assert_eq!(data.level, Level::Regional);
            assert_eq!(data.territory, "PUMA");
        }
        other => panic!("first row must be the Regional data row, got {other:?}"),
    }

    let headers: Vec<Level> = rows
        .iter()
        .filter_map(|row| match row {
            ReportRow::SectionHeader { level } => Some(*level),
            ReportRow::Data(_) => None,
        })
        .collect();
    assert_eq!(
        headers,
        vec![Level::Branch, Level::Subbranch, Level::Cluster, Level::Kabupaten],
    );
}

/// Every data row between two headers belongs to the level announced by
/// the preceding header — the pairing consumers rely on is positional.
#[test]
fn data_rows_follow_their_section_header() {
    let engine = engine_with_reference();

    let rows = engine.compute_report(&request("trx", d(2025, 6, 15))).unwrap();

    let mut section = Level::Regional;
    for row in &rows {
        match row {
            ReportRow::SectionHeader { level } => section = *level,
            ReportRow::Data(data) => assert_eq!(
                data.level, section,
                "{} filed under the wrong section",
                data.territory,
            ),
        }
    }
}

/// Within a level, rows keep the territory reference order; no implicit
/// re-sort.
#[test]
fn within_level_order_matches_reference_order() {
    let engine = engine_with_reference();

    let rows = engine.compute_report(&request("trx", d(2025, 6, 15))).unwrap();

    let kabupaten: Vec<&str> = rows
        .iter()
        .filter_map(ReportRow::as_data)
        .filter(|r| r.level == Level::Kabupaten)
        .map(|r| r.territory.as_str())
        .collect();
    assert_eq!(
        kabupaten,
        vec!["KOTA AMBON", "MALUKU TENGAH", "KOTA JAYAPURA", "KEEROM"],
    );
}

/// An omitted date defaults to today minus the metric's pipeline
/// latency (2 days for the test catalog's transaction metric).
#[test]
fn omitted_date_defaults_to_latency_shifted_today() {
    let engine = engine_with_reference();

    let explicit = engine.compute_report(&request("trx", d(2025, 6, 15))).unwrap();
    let defaulted = engine
        .compute_report_as_of(
            &ReportRequest {
                metric: "trx".into(),
                date: None,
                filter: TerritoryFilter::default(),
            },
            d(2025, 6, 17),
        )
        .unwrap();

    assert_eq!(explicit.len(), defaulted.len());
    let names = |rows: &[ReportRow]| -> Vec<String> {
        rows.iter()
            .filter_map(ReportRow::as_data)
            .map(|r| r.territory.clone())
            .collect()
    };
    assert_eq!(names(&explicit), names(&defaulted));
}
