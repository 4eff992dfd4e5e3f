//! Final report assembly: level rollups interleaved with section
//! headers, in the fixed hierarchy order the dashboards render.

use crate::{
    derive::{derive, DerivedFigures},
    error::ReportResult,
    metric::MetricSpec,
    period::ReportingPeriod,
    rollup::rollup_level,
    store::WarehouseStore,
    territory::{Level, ScopePredicate},
};
use serde::Serialize;

/// One row of the assembled report. Consumers branch on the tag instead
/// of sniffing for magic uppercase names.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportRow {
    /// Rendering divider announcing the level of the rows that follow.
    SectionHeader { level: Level },
    Data(DataRow),
}

#[derive(Debug, Clone, Serialize)]
pub struct DataRow {
    pub level: Level,
    pub territory: String,
    #[serde(flatten)]
    pub figures: DerivedFigures,
}

impl ReportRow {
    pub fn is_header(&self) -> bool {
        matches!(self, ReportRow::SectionHeader { .. })
    }

    pub fn as_data(&self) -> Option<&DataRow> {
        match self {
            ReportRow::Data(row) => Some(row),
            ReportRow::SectionHeader { .. } => None,
        }
    }
}

/// Run the rollup once per level in fixed order, inserting one section
/// header before each level below Regional.
///
/// Ordering within a level follows the territory reference; there is no
/// re-sort here, since header/data pairing is positional downstream. If any
/// level's rollup fails the whole assembly fails; partial hierarchies
/// are never returned.
pub fn assemble(
    store: &WarehouseStore,
    spec: &MetricSpec,
    scope: &ScopePredicate,
    period: &ReportingPeriod,
) -> ReportResult<Vec<ReportRow>> {
    let mut rows = Vec::new();
    for level in Level::ALL {
        if level != Level::Regional {
            rows.push(ReportRow::SectionHeader { level });
        }
        for aggregate in rollup_level(store, spec, level, scope, period)? {
            rows.push(ReportRow::Data(DataRow {
                level,
                territory: aggregate.node.name.clone(),
                figures: derive(&aggregate, period),
            }));
        }
    }
    Ok(rows)
}
