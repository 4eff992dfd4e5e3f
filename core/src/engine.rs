//! The report engine — the crate's public entry point.
//!
//! One call = one stateless report: derive the period, resolve the
//! territory scope, roll up every level, assemble. Nothing is cached or
//! memoized across calls; freshness is caller-controlled via the date.

use crate::{
    assemble::{assemble, ReportRow},
    config::ReportConfig,
    error::ReportResult,
    period::ReportingPeriod,
    store::WarehouseStore,
    territory::{resolve_scope, TerritoryFilter},
    types::MetricId,
};
use chrono::{Duration, NaiveDate};

/// One report request, as received from the HTTP/UI boundary.
#[derive(Debug, Clone, Default)]
pub struct ReportRequest {
    pub metric: MetricId,
    /// Omitted ⇒ today minus the metric's pipeline latency.
    pub date: Option<NaiveDate>,
    pub filter: TerritoryFilter,
}

pub struct ReportEngine {
    store: WarehouseStore,
    config: ReportConfig,
}

impl ReportEngine {
    pub fn new(store: WarehouseStore, config: ReportConfig) -> Self {
        Self { store, config }
    }

    /// Open a warehouse file and apply migrations.
    pub fn open(db_path: &str, config: ReportConfig) -> ReportResult<Self> {
        let store = WarehouseStore::open(db_path)?;
        store.migrate()?;
        Ok(Self::new(store, config))
    }

    /// In-memory engine with migrated schema and the test catalog.
    pub fn build_test() -> ReportResult<Self> {
        let store = WarehouseStore::in_memory()?;
        store.migrate()?;
        Ok(Self::new(store, ReportConfig::default_test()))
    }

    /// The backing store, for seeding (tools, tests).
    pub fn store(&self) -> &WarehouseStore {
        &self.store
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Compute one report, defaulting the date off the wall clock.
    pub fn compute_report(&self, request: &ReportRequest) -> ReportResult<Vec<ReportRow>> {
        self.compute_report_as_of(request, chrono::Local::now().date_naive())
    }

    /// Same as `compute_report` with an explicit "today" (tests pin it).
    pub fn compute_report_as_of(
        &self,
        request: &ReportRequest,
        today: NaiveDate,
    ) -> ReportResult<Vec<ReportRow>> {
        let spec = self.config.metric(&request.metric)?;
        let selected = request
            .date
            .unwrap_or_else(|| today - Duration::days(spec.latency_days as i64));
        let period = ReportingPeriod::for_date(selected);
        let scope = resolve_scope(&self.store, &self.config.root_regional, &request.filter)?;

        log::info!(
            "report metric={} date={} scope={:?}",
            spec.id,
            selected,
            scope.pairs(),
        );

        assemble(&self.store, spec, &scope, &period)
    }
}
