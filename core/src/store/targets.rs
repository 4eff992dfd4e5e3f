use super::{scope_conditions, WarehouseStore};
use crate::{
    error::ReportResult,
    territory::{Level, ScopePredicate, TerritoryPath},
};
use rusqlite::{params, params_from_iter};
use std::collections::HashMap;

/// One `monthly_target` row's plan values, raw (unscaled).
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetFacts {
    pub tgt_ns: f64,
    pub tgt_ns_byu: f64,
    pub tgt_so: f64,
    pub tgt_redeem: f64,
    pub tgt_rev: f64,
    pub tgt_rev_byu: f64,
    pub tgt_hh_demand: f64,
    pub tgt_hh_deploy: f64,
}

impl WarehouseStore {
    /// Sum one plan column per territory node for the given month.
    ///
    /// A node with no target row is absent from the map and contributes
    /// 0 downstream, never an error. `column` comes from the validated
    /// metric catalog.
    pub fn sum_targets_by_node(
        &self,
        column: &str,
        level: Level,
        scope: &ScopePredicate,
        period: &str,
    ) -> ReportResult<HashMap<String, f64>> {
        let group_col = level.column();
        let (where_sql, mut params) = scope_conditions(scope);
        params.push(period.to_string());
        let sql = format!(
            "SELECT {group_col}, COALESCE(SUM({column}), 0.0)
             FROM monthly_target
             WHERE {where_sql} AND period = ?{}
             GROUP BY {group_col}",
            params.len(),
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })?;
        rows.collect::<Result<HashMap<_, _>, _>>().map_err(Into::into)
    }

    /// Insert one monthly plan row. Used by the seeder and tests.
    pub fn insert_target_row(
        &self,
        period: &str,
        path: &TerritoryPath,
        targets: &TargetFacts,
    ) -> ReportResult<()> {
        self.conn.execute(
            "INSERT INTO monthly_target (
                period, regional, branch, subbranch, cluster, kabupaten,
                tgt_ns, tgt_ns_byu, tgt_so, tgt_redeem,
                tgt_rev, tgt_rev_byu, tgt_hh_demand, tgt_hh_deploy
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                period,
                path.regional,
                path.branch,
                path.subbranch,
                path.cluster,
                path.kabupaten,
                targets.tgt_ns,
                targets.tgt_ns_byu,
                targets.tgt_so,
                targets.tgt_redeem,
                targets.tgt_rev,
                targets.tgt_rev_byu,
                targets.tgt_hh_demand,
                targets.tgt_hh_deploy,
            ],
        )?;
        Ok(())
    }
}
