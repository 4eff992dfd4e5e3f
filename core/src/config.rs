//! Reporting configuration: the fixed territory root and the metric
//! catalog.
//!
//! The catalog is data. Adding a metric means adding an entry here (or
//! to the JSON catalog file), never another copy of the rollup query
//! blocks.

use crate::{
    error::{ReportError, ReportResult},
    metric::{MetricSpec, Segment, Unit},
};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// The fixed top-level root every report is scoped to ("PUMA" in
    /// this deployment). Configuration, not a rule the engine re-derives.
    pub root_regional: String,
    metrics: HashMap<String, MetricSpec>,
    order: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct MetricCatalogFile {
    root_regional: String,
    metrics: Vec<MetricSpec>,
}

impl ReportConfig {
    pub fn new(root_regional: &str, metrics: Vec<MetricSpec>) -> ReportResult<Self> {
        let mut map = HashMap::new();
        let mut order = Vec::new();
        for spec in metrics {
            spec.validate()?;
            if map.contains_key(&spec.id) {
                return Err(ReportError::Catalog {
                    reason: format!("duplicate metric id '{}'", spec.id),
                });
            }
            order.push(spec.id.clone());
            map.insert(spec.id.clone(), spec);
        }
        Ok(ReportConfig {
            root_regional: root_regional.to_string(),
            metrics: map,
            order,
        })
    }

    /// Load a catalog from its JSON form.
    pub fn from_json(text: &str) -> ReportResult<Self> {
        let file: MetricCatalogFile = serde_json::from_str(text)?;
        ReportConfig::new(&file.root_regional, file.metrics)
    }

    pub fn metric(&self, id: &str) -> ReportResult<&MetricSpec> {
        self.metrics.get(id).ok_or_else(|| ReportError::UnknownMetric {
            id: id.to_string(),
        })
    }

    /// Metric ids in catalog order.
    pub fn metric_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// The deployment's metric set. Unit-scale factors mirror the source
    /// target tables (new-sales plans are stored at 1/10 scale).
    pub fn default_catalog() -> Self {
        let metrics = vec![
            MetricSpec {
                id: "new_sales".into(),
                label: "New Sales".into(),
                fact_table: "sales_daily".into(),
                value_column: "trx_ns_all".into(),
                byu_column: Some("trx_ns_byu".into()),
                segment: Segment::PrepaidEquivalent,
                target_column: "tgt_ns".into(),
                target_scale: 10.0,
                unit: Unit::Count,
                latency_days: 2,
                quarter_comparison: false,
            },
            MetricSpec {
                id: "new_sales_byu".into(),
                label: "New Sales byU".into(),
                fact_table: "sales_daily".into(),
                value_column: "trx_ns_all".into(),
                byu_column: Some("trx_ns_byu".into()),
                segment: Segment::Byu,
                target_column: "tgt_ns_byu".into(),
                target_scale: 10.0,
                unit: Unit::Count,
                latency_days: 2,
                quarter_comparison: false,
            },
            MetricSpec {
                id: "so_trx".into(),
                label: "SO Transactions".into(),
                fact_table: "sales_daily".into(),
                value_column: "trx_so_all".into(),
                byu_column: Some("trx_so_byu".into()),
                segment: Segment::All,
                target_column: "tgt_so".into(),
                target_scale: 1.0,
                unit: Unit::Count,
                latency_days: 2,
                quarter_comparison: false,
            },
            MetricSpec {
                id: "redeem_pv".into(),
                label: "Redeem PV Revenue".into(),
                fact_table: "sales_daily".into(),
                value_column: "rev_redeem_all".into(),
                byu_column: Some("rev_redeem_byu".into()),
                segment: Segment::All,
                target_column: "tgt_redeem".into(),
                target_scale: 1.0,
                unit: Unit::Rupiah,
                latency_days: 2,
                quarter_comparison: true,
            },
            MetricSpec {
                id: "revenue".into(),
                label: "Recharge Revenue".into(),
                fact_table: "revenue_daily".into(),
                value_column: "rev_all".into(),
                byu_column: Some("rev_byu".into()),
                segment: Segment::PrepaidEquivalent,
                target_column: "tgt_rev".into(),
                target_scale: 1.0,
                unit: Unit::Rupiah,
                latency_days: 3,
                quarter_comparison: true,
            },
            MetricSpec {
                id: "revenue_byu".into(),
                label: "Recharge Revenue byU".into(),
                fact_table: "revenue_daily".into(),
                value_column: "rev_all".into(),
                byu_column: Some("rev_byu".into()),
                segment: Segment::Byu,
                target_column: "tgt_rev_byu".into(),
                target_scale: 1.0,
                unit: Unit::Rupiah,
                latency_days: 3,
                quarter_comparison: false,
            },
            MetricSpec {
                id: "hh_demand".into(),
                label: "Household Demand".into(),
                fact_table: "demand_daily".into(),
                value_column: "hh_demand".into(),
                byu_column: None,
                segment: Segment::All,
                target_column: "tgt_hh_demand".into(),
                target_scale: 1.0,
                unit: Unit::Count,
                latency_days: 3,
                quarter_comparison: false,
            },
            MetricSpec {
                id: "hh_deploy".into(),
                label: "Household Deployment".into(),
                fact_table: "demand_daily".into(),
                value_column: "hh_deploy".into(),
                byu_column: None,
                segment: Segment::All,
                target_column: "tgt_hh_deploy".into(),
                target_scale: 1.0,
                unit: Unit::Count,
                latency_days: 3,
                quarter_comparison: false,
            },
        ];
        // Catalog literals above are identifier-checked like any other
        // catalog source.
        ReportConfig::new("PUMA", metrics).expect("built-in catalog is valid")
    }

    /// Compact catalog with hardcoded values for use in tests.
    pub fn default_test() -> Self {
        let metrics = vec![
            MetricSpec {
                id: "trx".into(),
                label: "Transactions".into(),
                fact_table: "sales_daily".into(),
                value_column: "trx_ns_all".into(),
                byu_column: Some("trx_ns_byu".into()),
                segment: Segment::All,
                target_column: "tgt_ns".into(),
                target_scale: 1.0,
                unit: Unit::Count,
                latency_days: 2,
                quarter_comparison: false,
            },
            MetricSpec {
                id: "trx_byu".into(),
                label: "Transactions byU".into(),
                fact_table: "sales_daily".into(),
                value_column: "trx_ns_all".into(),
                byu_column: Some("trx_ns_byu".into()),
                segment: Segment::Byu,
                target_column: "tgt_ns_byu".into(),
                target_scale: 1.0,
                unit: Unit::Count,
                latency_days: 2,
                quarter_comparison: false,
            },
            MetricSpec {
                id: "trx_prepaid".into(),
                label: "Transactions Prepaid".into(),
                fact_table: "sales_daily".into(),
                value_column: "trx_ns_all".into(),
                byu_column: Some("trx_ns_byu".into()),
                segment: Segment::PrepaidEquivalent,
                target_column: "tgt_ns".into(),
                target_scale: 1.0,
                unit: Unit::Count,
                latency_days: 2,
                quarter_comparison: false,
            },
            MetricSpec {
                id: "trx_scaled".into(),
                label: "Transactions (scaled plan)".into(),
                fact_table: "sales_daily".into(),
                value_column: "trx_ns_all".into(),
                byu_column: Some("trx_ns_byu".into()),
                segment: Segment::All,
                target_column: "tgt_ns".into(),
                target_scale: 10.0,
                unit: Unit::Count,
                latency_days: 2,
                quarter_comparison: false,
            },
            MetricSpec {
                id: "rev".into(),
                label: "Revenue".into(),
                fact_table: "revenue_daily".into(),
                value_column: "rev_all".into(),
                byu_column: Some("rev_byu".into()),
                segment: Segment::All,
                target_column: "tgt_rev".into(),
                target_scale: 1.0,
                unit: Unit::Rupiah,
                latency_days: 3,
                quarter_comparison: true,
            },
        ];
        ReportConfig::new("PUMA", metrics).expect("test catalog is valid")
    }
}
