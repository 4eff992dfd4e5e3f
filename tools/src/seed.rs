//! Deterministic demo warehouse seeding.
//!
//! Generates the PUMA territory reference plus plausible daily fact
//! snapshots and monthly targets from an explicit seed, so two runs with
//! the same seed and date range produce byte-identical databases.

use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use honai_core::{
    store::{DemandFacts, RevenueFacts, SalesFacts, TargetFacts, WarehouseStore},
    TerritoryPath,
};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// The demo deployment's reference paths: 5 branches across Maluku and
/// Papua, one row per kabupaten.
const REFERENCE: &[(&str, &str, &str, &str)] = &[
    ("AMBON", "AMBON RAYA", "AMBON SERAM", "KOTA AMBON"),
    ("AMBON", "AMBON RAYA", "AMBON SERAM", "MALUKU TENGAH"),
    ("AMBON", "AMBON RAYA", "BURU KEPULAUAN", "BURU"),
    ("AMBON", "TUAL", "KEI ARU", "MALUKU TENGGARA"),
    ("AMBON", "TUAL", "KEI ARU", "KEPULAUAN ARU"),
    ("JAYAPURA", "JAYAPURA KOTA", "JAYAPURA SENTANI", "KOTA JAYAPURA"),
    ("JAYAPURA", "JAYAPURA KOTA", "JAYAPURA SENTANI", "JAYAPURA"),
    ("JAYAPURA", "JAYAPURA KOTA", "KEEROM ARSO", "KEEROM"),
    ("SORONG", "SORONG RAJA AMPAT", "SORONG KOTA", "KOTA SORONG"),
    ("SORONG", "SORONG RAJA AMPAT", "SORONG KOTA", "SORONG"),
    ("SORONG", "MANOKWARI", "MANOKWARI BINTUNI", "MANOKWARI"),
    ("TIMIKA", "TIMIKA PUNCAK", "MIMIKA", "MIMIKA"),
    ("TIMIKA", "TIMIKA PUNCAK", "MIMIKA", "PUNCAK JAYA"),
    ("MERAUKE", "MERAUKE SELATAN", "MERAUKE KOTA", "MERAUKE"),
    ("MERAUKE", "MERAUKE SELATAN", "MERAUKE KOTA", "BOVEN DIGOEL"),
];

pub fn seed_demo(
    store: &WarehouseStore,
    seed: u64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<()> {
    for (branch, subbranch, cluster, kabupaten) in REFERENCE {
        store.insert_territory(&TerritoryPath {
            regional: "PUMA".to_string(),
            branch: branch.to_string(),
            subbranch: subbranch.to_string(),
            cluster: cluster.to_string(),
            kabupaten: kabupaten.to_string(),
        })?;
    }

    // Generate off the reference as stored, in its display order.
    let paths = store.all_paths()?;

    let mut rng = Pcg64::seed_from_u64(seed);
    for path in &paths {
        // Per-kabupaten market size; KOTA markets run larger.
        let base = if path.kabupaten.starts_with("KOTA") {
            rng.gen_range(1.5..3.0)
        } else {
            rng.gen_range(0.4..1.2)
        };
        seed_path(store, &mut rng, path, base, from, to)?;
    }

    log::info!(
        "seeded demo warehouse: {} kabupaten, {} through {}",
        paths.len(),
        from,
        to,
    );
    Ok(())
}

/// Walk the date range for one kabupaten, growing cumulative
/// month-to-date snapshots and writing one target row per month.
fn seed_path(
    store: &WarehouseStore,
    rng: &mut Pcg64,
    path: &TerritoryPath,
    base: f64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<()> {
    let mut sales = SalesFacts::default();
    let mut revenue = RevenueFacts::default();
    let mut demand = DemandFacts::default();

    let mut date = from;
    while date <= to {
        if date.day() == 1 || date == from {
            sales = SalesFacts::default();
            revenue = RevenueFacts::default();
            demand = DemandFacts::default();

            let period = format!("{:04}-{:02}", date.year(), date.month());
            store.insert_target_row(&period, path, &month_target(rng, base))?;
        }

        let ns = base * rng.gen_range(25.0..70.0);
        let ns_byu = ns * rng.gen_range(0.15..0.35);
        let so = base * rng.gen_range(120.0..300.0);
        let so_byu = so * rng.gen_range(0.15..0.35);
        let redeem = base * rng.gen_range(4.0e7..1.2e8);
        let redeem_byu = redeem * rng.gen_range(0.1..0.25);
        sales.trx_ns_all += ns;
        sales.trx_ns_byu += ns_byu;
        sales.trx_so_all += so;
        sales.trx_so_byu += so_byu;
        sales.rev_redeem_all += redeem;
        sales.rev_redeem_byu += redeem_byu;
        store.insert_sales_row(date, path, &sales)?;

        let rev = base * rng.gen_range(2.0e8..6.0e8);
        revenue.rev_all += rev;
        revenue.rev_byu += rev * rng.gen_range(0.1..0.3);
        store.insert_revenue_row(date, path, &revenue)?;

        demand.hh_demand += base * rng.gen_range(8.0..25.0);
        demand.hh_deploy += base * rng.gen_range(3.0..12.0);
        store.insert_demand_row(date, path, &demand)?;

        date = date + Duration::days(1);
    }
    Ok(())
}

fn month_target(rng: &mut Pcg64, base: f64) -> TargetFacts {
    let stretch = rng.gen_range(0.9..1.2);
    TargetFacts {
        // New-sales plans are stored at 1/10 scale; the catalog
        // multiplies them back up.
        tgt_ns: base * 1_400.0 * stretch / 10.0,
        tgt_ns_byu: base * 380.0 * stretch / 10.0,
        tgt_so: base * 6_500.0 * stretch,
        tgt_redeem: base * 2.4e9 * stretch,
        tgt_rev: base * 1.1e10 * stretch,
        tgt_rev_byu: base * 2.2e9 * stretch,
        tgt_hh_demand: base * 520.0 * stretch,
        tgt_hh_deploy: base * 210.0 * stretch,
    }
}
