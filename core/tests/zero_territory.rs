use chrono::NaiveDate;
use honai_core::{
    store::{SalesFacts, TargetFacts},
    Percent, ReportEngine, ReportRequest, ReportRow, TerritoryFilter, TerritoryPath,
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

/// Every registered territory node appears exactly once per level, even
/// with no fact rows at all: a silent territory is a zero row, not a
/// missing row.
#[test]
fn empty_warehouse_still_lists_every_node() {
    let engine = engine_with_reference();

    let rows = engine.compute_report(&request("trx", d(2025, 6, 15))).unwrap();

    // 1 regional + 4 headers + 2 branches + 2 subbranches + 2 clusters
    // + 4 kabupaten.
    assert_eq!(rows.len(), 15, "row count diverged: {rows:#?}");
    for row in &rows {
        if let ReportRow::Data(data) = row {
            assert_eq!(data.figures.actual, 0.0, "{} must be zero", data.territory);
        }
    }
}

/// A kabupaten with fact rows and one without both appear; the silent
/// one carries zeros and a non-computable achievement (its target is
/// also absent).
#[test]
fn zero_and_nonzero_nodes_coexist() {
    let engine = engine_with_reference();
    let anchor = d(2025, 6, 15);
    engine
        .store()
        .insert_sales_row(
            anchor,
            &path("AMBON", "AMBON RAYA", "AMBON SERAM", "KOTA AMBON"),
            &SalesFacts {
                trx_ns_all: 120.0,
                ..Default::default()
            },
        )
        .unwrap();
    engine
        .store()
        .insert_target_row(
            "2025-06",
            &path("AMBON", "AMBON RAYA", "AMBON SERAM", "KOTA AMBON"),
            &TargetFacts {
                tgt_ns: 100.0,
                ..Default::default()
            },
        )
        .unwrap();

    let rows = engine.compute_report(&request("trx", anchor)).unwrap();

    let kabupaten: Vec<_> = rows
        .iter()
        .filter_map(ReportRow::as_data)
        .filter(|r| r.level == honai_core::Level::Kabupaten)
        .collect();
    assert_eq!(kabupaten.len(), 4);

    let kota = kabupaten.iter().find(|r| r.territory == "KOTA AMBON").unwrap();
    assert_eq!(kota.figures.actual, 120.0);
    assert_eq!(kota.figures.achievement, Percent::Value(120.0));

    let keerom = kabupaten.iter().find(|r| r.territory == "KEEROM").unwrap();
    assert_eq!(keerom.figures.actual, 0.0);
    assert_eq!(keerom.figures.achievement, Percent::NotComputable);
}
