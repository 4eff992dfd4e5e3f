//! SQLite warehouse access.
//!
//! RULE: Only the store layer talks to the database.
//! The rollup engine and resolvers call store methods — they never
//! execute SQL directly.

use crate::{error::ReportResult, territory::ScopePredicate};
use rusqlite::Connection;

mod facts;
mod targets;
mod territory;

pub use facts::{DemandFacts, RevenueFacts, SalesFacts};
pub use targets::TargetFacts;

pub struct WarehouseStore {
    conn: Connection,
}

impl WarehouseStore {
    pub fn open(path: &str) -> ReportResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> ReportResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> ReportResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_territory.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/002_facts.sql"))?;
        self.conn
            .execute_batch(include_str!("../../../migrations/003_targets.sql"))?;
        Ok(())
    }
}

/// WHERE fragment plus positional params for a territory scope.
/// Placeholders start at ?1; callers appending more params continue
/// numbering from the returned vec's length.
pub(crate) fn scope_conditions(scope: &ScopePredicate) -> (String, Vec<String>) {
    let mut conds = Vec::new();
    let mut params = Vec::new();
    for (col, val) in scope.pairs() {
        params.push(val.to_string());
        conds.push(format!("{col} = ?{}", params.len()));
    }
    (conds.join(" AND "), params)
}
