//! Shared primitive types used across the reporting engine.

/// Identifier of a metric in the catalog (e.g. "new_sales").
pub type MetricId = String;

/// A territory entity name as it appears in the reference table.
pub type TerritoryName = String;

/// A calendar month key in `yyyy-mm` form, as stored in the target table.
pub type YearMonth = String;
