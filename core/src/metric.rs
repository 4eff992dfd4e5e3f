//! Metric source adapters.
//!
//! One `MetricSpec` per catalog entry names the fact table and columns
//! feeding a metric and the plan column it is judged against. The rollup
//! engine is generic over this record, so per-metric differences live
//! here as data instead of duplicated query blocks.

use crate::{
    error::{ReportError, ReportResult},
    types::MetricId,
};
use serde::{Deserialize, Serialize};

/// Which segment of a byu-split metric a catalog entry reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    /// The all-segment column as stored.
    All,
    /// The byu sub-segment column.
    Byu,
    /// Prepaid-equivalent: all-segment minus byu-segment.
    PrepaidEquivalent,
}

impl Default for Segment {
    fn default() -> Self {
        Segment::All
    }
}

/// Unit a metric's raw values are stored in. Drives presentation only;
/// the engine never rescales fact values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Count,
    Rupiah,
}

impl Default for Unit {
    fn default() -> Self {
        Unit::Count
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricSpec {
    pub id: MetricId,
    pub label: String,
    pub fact_table: String,
    /// All-segment fact column.
    pub value_column: String,
    /// Byu fact column; required for Byu and PrepaidEquivalent entries.
    #[serde(default)]
    pub byu_column: Option<String>,
    #[serde(default)]
    pub segment: Segment,
    pub target_column: String,
    /// Fixed per-metric unit conversion applied to the raw plan figure
    /// (e.g. 10.0 for targets stored at 1/10 scale). Configuration, not
    /// something the engine infers.
    #[serde(default = "default_scale")]
    pub target_scale: f64,
    #[serde(default)]
    pub unit: Unit,
    /// Data-pipeline latency: the default report date is today minus
    /// this many days.
    #[serde(default = "default_latency")]
    pub latency_days: u32,
    /// Whether this metric reports a quarter-over-quarter comparison.
    #[serde(default)]
    pub quarter_comparison: bool,
}

fn default_scale() -> f64 {
    1.0
}

fn default_latency() -> u32 {
    2
}

impl MetricSpec {
    /// The named segment derivation. Prepaid-equivalent is always
    /// all-segment minus byu-segment; keep it spelled out here instead
    /// of inlined ad hoc.
    pub fn segment_value(&self, all: f64, byu: f64) -> f64 {
        match self.segment {
            Segment::All => all,
            Segment::Byu => byu,
            Segment::PrepaidEquivalent => all - byu,
        }
    }

    pub(crate) fn needs_byu(&self) -> bool {
        !matches!(self.segment, Segment::All)
    }

    /// Catalog-load validation. SQL identifiers come from the catalog,
    /// so they are checked once here and trusted by the store layer.
    pub(crate) fn validate(&self) -> ReportResult<()> {
        for ident in [&self.fact_table, &self.value_column, &self.target_column] {
            if !is_identifier(ident) {
                return Err(ReportError::Catalog {
                    reason: format!("metric '{}': bad identifier '{ident}'", self.id),
                });
            }
        }
        match &self.byu_column {
            Some(col) if !is_identifier(col) => {
                return Err(ReportError::Catalog {
                    reason: format!("metric '{}': bad identifier '{col}'", self.id),
                });
            }
            None if self.needs_byu() => {
                return Err(ReportError::Catalog {
                    reason: format!(
                        "metric '{}': segment {:?} requires byu_column",
                        self.id, self.segment
                    ),
                });
            }
            _ => {}
        }
        if self.target_scale <= 0.0 {
            return Err(ReportError::Catalog {
                reason: format!("metric '{}': target_scale must be positive", self.id),
            });
        }
        Ok(())
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
