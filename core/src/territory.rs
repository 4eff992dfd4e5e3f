//! Territory hierarchy: levels, reference nodes, and filter resolution.
//!
//! The hierarchy is a fixed 5-level containment chain
//! Regional > Branch > Subbranch > Cluster > Kabupaten. The set of valid
//! names is reference data owned by the warehouse; the engine only reads
//! it.

use crate::{
    error::{ReportError, ReportResult},
    store::WarehouseStore,
    types::TerritoryName,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Regional,
    Branch,
    Subbranch,
    Cluster,
    Kabupaten,
}

impl Level {
    /// Rollup order, top to bottom. The assembler walks this exactly.
    pub const ALL: [Level; 5] = [
        Level::Regional,
        Level::Branch,
        Level::Subbranch,
        Level::Cluster,
        Level::Kabupaten,
    ];

    /// Uppercase section label, as rendered in header rows.
    pub fn label(self) -> &'static str {
        match self {
            Level::Regional => "REGIONAL",
            Level::Branch => "BRANCH",
            Level::Subbranch => "SUBBRANCH",
            Level::Cluster => "CLUSTER",
            Level::Kabupaten => "KABUPATEN",
        }
    }

    /// Column of the territory path this level aggregates by.
    pub(crate) fn column(self) -> &'static str {
        match self {
            Level::Regional => "regional",
            Level::Branch => "branch",
            Level::Subbranch => "subbranch",
            Level::Cluster => "cluster",
            Level::Kabupaten => "kabupaten",
        }
    }

    pub fn parent(self) -> Option<Level> {
        match self {
            Level::Regional => None,
            Level::Branch => Some(Level::Regional),
            Level::Subbranch => Some(Level::Branch),
            Level::Cluster => Some(Level::Subbranch),
            Level::Kabupaten => Some(Level::Cluster),
        }
    }
}

/// One entity in the hierarchy, as listed by the reference table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerritoryNode {
    pub level: Level,
    pub name: TerritoryName,
    pub parent: Option<TerritoryName>,
}

/// A full reference path, one per kabupaten. Used by inserts (seeder,
/// tests) and mirrored by every fact row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerritoryPath {
    pub regional: String,
    pub branch: String,
    pub subbranch: String,
    pub cluster: String,
    pub kabupaten: String,
}

/// Caller-supplied narrowing filter. Always implicitly scoped to the
/// configured root regional; each supplied level requires its parent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TerritoryFilter {
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub subbranch: Option<String>,
    #[serde(default)]
    pub cluster: Option<String>,
    #[serde(default)]
    pub kabupaten: Option<String>,
}

impl TerritoryFilter {
    fn validate_shape(&self) -> ReportResult<()> {
        let violations = [
            (self.subbranch.is_some() && self.branch.is_none(), "subbranch requires branch"),
            (self.cluster.is_some() && self.subbranch.is_none(), "cluster requires subbranch"),
            (self.kabupaten.is_some() && self.cluster.is_none(), "kabupaten requires cluster"),
        ];
        for (violated, reason) in violations {
            if violated {
                return Err(ReportError::InvalidFilter {
                    reason: reason.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Resolved scoping for every rollup query: the fixed root plus the
/// validated filter chain. Narrowing conditions compose by AND; an
/// absent level means no restriction beyond the parent scope.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopePredicate {
    pub regional: String,
    pub branch: Option<String>,
    pub subbranch: Option<String>,
    pub cluster: Option<String>,
    pub kabupaten: Option<String>,
}

impl ScopePredicate {
    /// (column, value) pairs for WHERE clauses, root first.
    pub(crate) fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![("regional", self.regional.as_str())];
        if let Some(b) = &self.branch {
            pairs.push(("branch", b));
        }
        if let Some(s) = &self.subbranch {
            pairs.push(("subbranch", s));
        }
        if let Some(c) = &self.cluster {
            pairs.push(("cluster", c));
        }
        if let Some(k) = &self.kabupaten {
            pairs.push(("kabupaten", k));
        }
        pairs
    }
}

/// Turn a caller filter into the scoping predicate used at every level.
///
/// Containment violations and unknown territory names surface as
/// `InvalidFilter` here, before any fact or target query runs. Only the
/// reference table is consulted.
pub fn resolve_scope(
    store: &WarehouseStore,
    root_regional: &str,
    filter: &TerritoryFilter,
) -> ReportResult<ScopePredicate> {
    filter.validate_shape()?;

    let scope = ScopePredicate {
        regional: root_regional.to_string(),
        branch: filter.branch.clone(),
        subbranch: filter.subbranch.clone(),
        cluster: filter.cluster.clone(),
        kabupaten: filter.kabupaten.clone(),
    };

    if !store.scope_exists(&scope)? {
        return Err(ReportError::InvalidFilter {
            reason: format!(
                "no territory matches {}",
                scope
                    .pairs()
                    .iter()
                    .map(|(col, val)| format!("{col}={val}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        });
    }

    Ok(scope)
}
