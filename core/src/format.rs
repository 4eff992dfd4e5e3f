//! Presentation-boundary formatting.
//!
//! Core figures stay numeric all the way through the engine; display
//! strings are minted only here, by the caller-side adapters (runner
//! table/CSV output, spreadsheet export feeds).

use crate::{
    derive::Percent,
    metric::Unit,
};

/// `"120.00%"`, or `"N/A"` for a non-computable percentage.
pub fn percent(p: Percent) -> String {
    match p.value() {
        Some(v) => format!("{v:.2}%"),
        None => "N/A".to_string(),
    }
}

/// Sign-preserved gap rendering: `"+20.00"` / `"-3.50"`.
pub fn signed(x: f64) -> String {
    format!("{x:+.2}")
}

/// Magnitude scaled to billions with 0–2 fractional digits
/// (`1_500_000_000.0` → `"1.5"`).
pub fn billions(x: f64) -> String {
    trim_fraction(x / 1e9)
}

/// A raw amount in its metric's display unit: counts stay whole,
/// rupiah amounts render in billions.
pub fn amount(x: f64, unit: Unit) -> String {
    match unit {
        Unit::Count => format!("{x:.0}"),
        Unit::Rupiah => billions(x),
    }
}

fn trim_fraction(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}
