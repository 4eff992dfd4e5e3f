use super::{scope_conditions, WarehouseStore};
use crate::{
    error::ReportResult,
    territory::{Level, ScopePredicate, TerritoryPath},
};
use chrono::NaiveDate;
use rusqlite::{params, params_from_iter};
use std::collections::HashMap;

/// One `sales_daily` snapshot row's metric values.
#[derive(Debug, Clone, Copy, Default)]
pub struct SalesFacts {
    pub trx_ns_all: f64,
    pub trx_ns_byu: f64,
    pub trx_so_all: f64,
    pub trx_so_byu: f64,
    pub rev_redeem_all: f64,
    pub rev_redeem_byu: f64,
}

/// One `revenue_daily` snapshot row's metric values.
#[derive(Debug, Clone, Copy, Default)]
pub struct RevenueFacts {
    pub rev_all: f64,
    pub rev_byu: f64,
}

/// One `demand_daily` snapshot row's metric values.
#[derive(Debug, Clone, Copy, Default)]
pub struct DemandFacts {
    pub hh_demand: f64,
    pub hh_deploy: f64,
}

impl WarehouseStore {
    /// Sum one fact column per territory node over the given snapshot
    /// dates, within the scope.
    ///
    /// Nodes with no matching rows are simply absent from the map; the
    /// rollup engine zero-fills them from the reference node list.
    /// `table` and `column` come from the validated metric catalog, not
    /// from user input.
    pub fn sum_facts_by_node(
        &self,
        table: &str,
        column: &str,
        level: Level,
        scope: &ScopePredicate,
        dates: &[NaiveDate],
    ) -> ReportResult<HashMap<String, f64>> {
        if dates.is_empty() {
            return Ok(HashMap::new());
        }
        let group_col = level.column();
        let (where_sql, mut params) = scope_conditions(scope);
        let mut placeholders = Vec::with_capacity(dates.len());
        for date in dates {
            params.push(date.format("%Y-%m-%d").to_string());
            placeholders.push(format!("?{}", params.len()));
        }
        let sql = format!(
            "SELECT {group_col}, COALESCE(SUM({column}), 0.0)
             FROM {table}
             WHERE {where_sql} AND event_date IN ({})
             GROUP BY {group_col}",
            placeholders.join(", "),
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })?;
        rows.collect::<Result<HashMap<_, _>, _>>().map_err(Into::into)
    }

    // ── Insert helpers (seeder and tests) ──────────────────────────

    pub fn insert_sales_row(
        &self,
        date: NaiveDate,
        path: &TerritoryPath,
        facts: &SalesFacts,
    ) -> ReportResult<()> {
        self.conn.execute(
            "INSERT INTO sales_daily (
                event_date, regional, branch, subbranch, cluster, kabupaten,
                trx_ns_all, trx_ns_byu, trx_so_all, trx_so_byu,
                rev_redeem_all, rev_redeem_byu
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                date.format("%Y-%m-%d").to_string(),
                path.regional,
                path.branch,
                path.subbranch,
                path.cluster,
                path.kabupaten,
                facts.trx_ns_all,
                facts.trx_ns_byu,
                facts.trx_so_all,
                facts.trx_so_byu,
                facts.rev_redeem_all,
                facts.rev_redeem_byu,
            ],
        )?;
        Ok(())
    }

    pub fn insert_revenue_row(
        &self,
        date: NaiveDate,
        path: &TerritoryPath,
        facts: &RevenueFacts,
    ) -> ReportResult<()> {
        self.conn.execute(
            "INSERT INTO revenue_daily (
                event_date, regional, branch, subbranch, cluster, kabupaten,
                rev_all, rev_byu
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                date.format("%Y-%m-%d").to_string(),
                path.regional,
                path.branch,
                path.subbranch,
                path.cluster,
                path.kabupaten,
                facts.rev_all,
                facts.rev_byu,
            ],
        )?;
        Ok(())
    }

    pub fn insert_demand_row(
        &self,
        date: NaiveDate,
        path: &TerritoryPath,
        facts: &DemandFacts,
    ) -> ReportResult<()> {
        self.conn.execute(
            "INSERT INTO demand_daily (
                event_date, regional, branch, subbranch, cluster, kabupaten,
                hh_demand, hh_deploy
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                date.format("%Y-%m-%d").to_string(),
                path.regional,
                path.branch,
                path.subbranch,
                path.cluster,
                path.kabupaten,
                facts.hh_demand,
                facts.hh_deploy,
            ],
        )?;
        Ok(())
    }
}
