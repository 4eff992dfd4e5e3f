use super::{scope_conditions, WarehouseStore};
use crate::{
    error::ReportResult,
    territory::{Level, ScopePredicate, TerritoryNode, TerritoryPath},
};
use rusqlite::{params, params_from_iter};

impl WarehouseStore {
    /// Authoritative node list for one level within a scope.
    ///
    /// This is the left side of every rollup join: a node listed here
    /// appears in the report even when no fact row matches it. Order
    /// follows the reference table's row order.
    pub fn list_nodes(
        &self,
        level: Level,
        scope: &ScopePredicate,
    ) -> ReportResult<Vec<TerritoryNode>> {
        let col = level.column();
        let (where_sql, params) = scope_conditions(scope);
        let sql = match level.parent() {
            Some(parent) => format!(
                "SELECT {col}, MIN({parent_col})
                 FROM territory WHERE {where_sql}
                 GROUP BY {col} ORDER BY MIN(rowid)",
                parent_col = parent.column(),
            ),
            None => format!(
                "SELECT {col}, NULL
                 FROM territory WHERE {where_sql}
                 GROUP BY {col} ORDER BY MIN(rowid)"
            ),
        };
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(params.iter()), |row| {
            Ok(TerritoryNode {
                level,
                name: row.get(0)?,
                parent: row.get(1)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Whether any reference row matches the scope. Used by filter
    /// resolution to reject unknown or non-contained combinations.
    pub fn scope_exists(&self, scope: &ScopePredicate) -> ReportResult<bool> {
        let (where_sql, params) = scope_conditions(scope);
        let sql = format!("SELECT COUNT(*) FROM territory WHERE {where_sql}");
        let count: i64 = self
            .conn
            .query_row(&sql, params_from_iter(params.iter()), |row| row.get(0))?;
        Ok(count > 0)
    }

    /// Insert one kabupaten path row. Used by the seeder and tests.
    pub fn insert_territory(&self, path: &TerritoryPath) -> ReportResult<()> {
        self.conn.execute(
            "INSERT INTO territory (regional, branch, subbranch, cluster, kabupaten)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                path.regional,
                path.branch,
                path.subbranch,
                path.cluster,
                path.kabupaten,
            ],
        )?;
        Ok(())
    }

    /// All kabupaten paths in reference order. The seeder iterates this
    /// to generate fact history.
    pub fn all_paths(&self) -> ReportResult<Vec<TerritoryPath>> {
        let mut stmt = self.conn.prepare(
            "SELECT regional, branch, subbranch, cluster, kabupaten
             FROM territory ORDER BY rowid",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(TerritoryPath {
                regional: row.get(0)?,
                branch: row.get(1)?,
                subbranch: row.get(2)?,
                cluster: row.get(3)?,
                kabupaten: row.get(4)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
