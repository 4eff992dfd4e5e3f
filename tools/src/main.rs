//! report-runner: headless report runner for the Honai PUMA dashboard.
//!
//! Usage:
//!   report-runner --db honai.db --seed-demo --seed 42
//!   report-runner --db honai.db --metric revenue --date 2025-06-15
//!   report-runner --db honai.db --metric new_sales --branch AMBON --format csv
//!   report-runner --db honai.db --list-metrics

mod seed;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use honai_core::{
    format, DataRow, ReportConfig, ReportEngine, ReportRequest, ReportRow, TerritoryFilter,
};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = parse_str(&args, "--db").unwrap_or_else(|| "honai.db".to_string());
    let metric = parse_str(&args, "--metric").unwrap_or_else(|| "revenue".to_string());
    let output = parse_str(&args, "--format").unwrap_or_else(|| "table".to_string());
    let list_metrics = args.iter().any(|a| a == "--list-metrics");
    let seed_demo = args.iter().any(|a| a == "--seed-demo");

    let config = match parse_str(&args, "--catalog") {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading catalog {path}"))?;
            ReportConfig::from_json(&text)?
        }
        None => ReportConfig::default_catalog(),
    };

    let engine = ReportEngine::open(&db, config)?;

    if list_metrics {
        for id in engine.config().metric_ids() {
            println!("{id}");
        }
        return Ok(());
    }

    if seed_demo {
        let seed = parse_arg(&args, "--seed", 42u64);
        let today = chrono::Local::now().date_naive();
        // Default range starts the prior Jan 1 so YoY and prior-YTD
        // comparisons have data to land on.
        let from = parse_date(&args, "--from")?
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(today.year() - 1, 1, 1).unwrap_or(today));
        let to = parse_date(&args, "--to")?.unwrap_or(today - chrono::Duration::days(2));
        seed::seed_demo(engine.store(), seed, from, to)?;
        println!("seeded {db} (seed {seed}, {from} through {to})");
    }

    let request = ReportRequest {
        metric,
        date: parse_date(&args, "--date")?,
        filter: TerritoryFilter {
            branch: parse_str(&args, "--branch"),
            subbranch: parse_str(&args, "--subbranch"),
            cluster: parse_str(&args, "--cluster"),
            kabupaten: parse_str(&args, "--kabupaten"),
        },
    };

    let rows = engine.compute_report(&request)?;

    match output.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
        "csv" => print_csv(&rows),
        _ => print_table(&request.metric, &rows),
    }

    Ok(())
}

fn print_table(metric: &str, rows: &[ReportRow]) {
    println!("Honai PUMA — {metric}");
    println!(
        "{:<24} {:>14} {:>14} {:>9} {:>9} {:>14} {:>9} {:>14} {:>9} {:>9} {:>9}",
        "TERRITORY", "TARGET", "ACTUAL", "ACH", "DRR", "GAP", "MOM", "ABS", "YOY", "YTD", "QOQ",
    );
    for row in rows {
        match row {
            ReportRow::SectionHeader { level } => {
                println!("── {} ──", level.label());
            }
            ReportRow::Data(data) => print_data_line(data),
        }
    }
}

fn print_data_line(data: &DataRow) {
    let f = &data.figures;
    println!(
        "{:<24} {:>14.2} {:>14.2} {:>9} {:>9} {:>14} {:>9} {:>14.2} {:>9} {:>9} {:>9}",
        data.territory,
        f.target,
        f.actual,
        format::percent(f.achievement),
        format::percent(f.run_rate),
        format::signed(f.gap),
        format::percent(f.mom),
        f.abs_change,
        format::percent(f.yoy),
        format::percent(f.ytd),
        f.qoq.map(format::percent).unwrap_or_else(|| "-".to_string()),
    );
}

/// CSV feed consumed by the dashboard's spreadsheet download.
fn print_csv(rows: &[ReportRow]) {
    println!("territory,target,actual,achievement,run_rate,gap,mom,abs_change,yoy,ytd,qoq");
    for row in rows {
        match row {
            ReportRow::SectionHeader { level } => {
                println!("{},,,,,,,,,,", level.label());
            }
            ReportRow::Data(data) => {
                let f = &data.figures;
                println!(
                    "{},{:.2},{:.2},{},{},{:.2},{},{:.2},{},{},{}",
                    data.territory,
                    f.target,
                    f.actual,
                    format::percent(f.achievement),
                    format::percent(f.run_rate),
                    f.gap,
                    format::percent(f.mom),
                    f.abs_change,
                    format::percent(f.yoy),
                    format::percent(f.ytd),
                    f.qoq.map(format::percent).unwrap_or_default(),
                );
            }
        }
    }
}

fn parse_str(args: &[String], flag: &str) -> Option<String> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].clone())
}

fn parse_date(args: &[String], flag: &str) -> Result<Option<NaiveDate>> {
    match parse_str(args, flag) {
        Some(text) => {
            let date = text
                .parse::<NaiveDate>()
                .with_context(|| format!("{flag} expects yyyy-mm-dd, got '{text}'"))?;
            Ok(Some(date))
        }
        None => Ok(None),
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
