//! The rollup engine: one raw aggregate per territory node per level.
//!
//! The authoritative node list always comes from the territory
//! reference, and the period-point sums are joined against it in code
//! with zero-fill. A node with no fact rows therefore still appears
//! with zeros — the left-join semantics the dashboards depend on.

use crate::{
    error::ReportResult,
    metric::MetricSpec,
    period::ReportingPeriod,
    store::WarehouseStore,
    territory::{Level, ScopePredicate, TerritoryNode},
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Per-node raw rollup for one metric and one reporting period.
/// All sums coalesce missing source rows to 0; `target` is already
/// unit-scaled by the metric's configured factor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricAggregate {
    pub node: TerritoryNode,
    pub current: f64,
    pub prior_month: f64,
    pub prior_year: f64,
    pub ytd_current: f64,
    pub ytd_prior: f64,
    pub target: f64,
    pub qtd_current: Option<f64>,
    pub qtd_prior: Option<f64>,
}

/// Aggregate one level: every node in scope, exactly once, in reference
/// order.
///
/// The six period-point fetches are independent of each other; nothing
/// below depends on their order.
pub fn rollup_level(
    store: &WarehouseStore,
    spec: &MetricSpec,
    level: Level,
    scope: &ScopePredicate,
    period: &ReportingPeriod,
) -> ReportResult<Vec<MetricAggregate>> {
    let nodes = store.list_nodes(level, scope)?;

    let current = segment_sums(store, spec, level, scope, &[period.current_anchor])?;
    let prior_month = segment_sums(store, spec, level, scope, &[period.prior_month_anchor])?;
    let prior_year = segment_sums(store, spec, level, scope, &[period.prior_year_anchor])?;
    let ytd_current = segment_sums(store, spec, level, scope, &period.ytd_sample_dates())?;
    let ytd_prior = segment_sums(store, spec, level, scope, &period.prior_ytd_sample_dates())?;

    let targets = store.sum_targets_by_node(
        &spec.target_column,
        level,
        scope,
        &period.current_month_key(),
    )?;

    let (qtd_current, qtd_prior) = if spec.quarter_comparison {
        (
            Some(segment_sums(store, spec, level, scope, &period.qtd_sample_dates())?),
            Some(segment_sums(store, spec, level, scope, &period.prior_qtd_sample_dates())?),
        )
    } else {
        (None, None)
    };

    log::debug!(
        "rollup metric={} level={:?} nodes={} anchor={}",
        spec.id,
        level,
        nodes.len(),
        period.current_anchor,
    );

    let aggregates = nodes
        .into_iter()
        .map(|node| {
            let at = |sums: &HashMap<String, f64>| sums.get(&node.name).copied().unwrap_or(0.0);
            MetricAggregate {
                current: at(&current),
                prior_month: at(&prior_month),
                prior_year: at(&prior_year),
                ytd_current: at(&ytd_current),
                ytd_prior: at(&ytd_prior),
                target: at(&targets) * spec.target_scale,
                qtd_current: qtd_current.as_ref().map(&at),
                qtd_prior: qtd_prior.as_ref().map(&at),
                node,
            }
        })
        .collect();

    Ok(aggregates)
}

/// Fact sums per node with the metric's segment derivation applied.
fn segment_sums(
    store: &WarehouseStore,
    spec: &MetricSpec,
    level: Level,
    scope: &ScopePredicate,
    dates: &[NaiveDate],
) -> ReportResult<HashMap<String, f64>> {
    let all = store.sum_facts_by_node(&spec.fact_table, &spec.value_column, level, scope, dates)?;
    if !spec.needs_byu() {
        return Ok(all);
    }
    // Catalog validation guarantees the byu column for these segments.
    let byu_column = spec.byu_column.as_deref().unwrap_or(&spec.value_column);
    let byu = store.sum_facts_by_node(&spec.fact_table, byu_column, level, scope, dates)?;

    let mut merged: HashMap<String, f64> = HashMap::new();
    for name in all.keys().chain(byu.keys()) {
        if !merged.contains_key(name) {
            let all_value = all.get(name).copied().unwrap_or(0.0);
            let byu_value = byu.get(name).copied().unwrap_or(0.0);
            merged.insert(name.clone(), spec.segment_value(all_value, byu_value));
        }
    }
    Ok(merged)
}
