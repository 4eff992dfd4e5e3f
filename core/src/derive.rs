//! Derived comparison figures.
//!
//! Percentages are carried as an explicit tri-state: a zero or absent
//! denominator yields `Percent::NotComputable`, which is distinct from a
//! legitimate 0% and never surfaces as NaN or Infinity. Formatting to
//! display strings happens at the presentation boundary (`format`), not
//! here.

use crate::{period::ReportingPeriod, rollup::MetricAggregate};
use serde::{Deserialize, Serialize};

/// A derived percentage, or the marker that its denominator was zero.
/// Serializes as a plain number or `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Percent {
    Value(f64),
    NotComputable,
}

impl Percent {
    /// `numerator / denominator` as a percentage, rounded to 2 decimals,
    /// with the zero-denominator sentinel.
    pub fn ratio(numerator: f64, denominator: f64) -> Percent {
        if denominator == 0.0 {
            Percent::NotComputable
        } else {
            Percent::Value(round2(numerator / denominator * 100.0))
        }
    }

    /// Relative change of `current` against `baseline`.
    pub fn change(current: f64, baseline: f64) -> Percent {
        Percent::ratio(current - baseline, baseline)
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Percent::Value(v) => Some(v),
            Percent::NotComputable => None,
        }
    }

    pub fn is_computable(self) -> bool {
        matches!(self, Percent::Value(_))
    }
}

/// The fixed figure set of one data row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedFigures {
    pub target: f64,
    pub actual: f64,
    /// Ach FM: actual vs full-month target.
    pub achievement: Percent,
    /// DRR: actual vs the pro-rata (days-elapsed) share of the target.
    pub run_rate: Percent,
    /// Actual minus target, sign preserved (positive = ahead of plan).
    pub gap: f64,
    pub mom: Percent,
    pub abs_change: f64,
    pub yoy: Percent,
    pub ytd: Percent,
    /// Only for metrics that define a quarter comparison; `None` means
    /// the metric has no QoQ at all, which is not the same as
    /// `NotComputable`.
    pub qoq: Option<Percent>,
}

/// Derive the full comparison figure set from one raw aggregate.
pub fn derive(agg: &MetricAggregate, period: &ReportingPeriod) -> DerivedFigures {
    let pro_rata_target = period.run_rate_fraction() * agg.target;
    DerivedFigures {
        target: round2(agg.target),
        actual: round2(agg.current),
        achievement: Percent::ratio(agg.current, agg.target),
        run_rate: Percent::ratio(agg.current, pro_rata_target),
        gap: round2(agg.current - agg.target),
        mom: Percent::change(agg.current, agg.prior_month),
        abs_change: round2(agg.current - agg.prior_month),
        yoy: Percent::change(agg.current, agg.prior_year),
        ytd: Percent::change(agg.ytd_current, agg.ytd_prior),
        qoq: match (agg.qtd_current, agg.qtd_prior) {
            (Some(current), Some(prior)) => Some(Percent::change(current, prior)),
            _ => None,
        },
    }
}

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
