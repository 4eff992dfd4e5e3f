//! Honai PUMA reporting core.
//!
//! A hierarchical KPI rollup and period-comparison engine: given a
//! reporting date and an optional territory filter, it aggregates a
//! metric at every level of the Regional > Branch > Subbranch > Cluster
//! > Kabupaten hierarchy, joins the aggregates against monthly targets,
//! derives the standard comparison figures (achievement, DRR, gap, MoM,
//! YoY, YTD, QoQ), and assembles one ordered row sequence with section
//! headers between levels.

pub mod assemble;
pub mod config;
pub mod derive;
pub mod engine;
pub mod error;
pub mod format;
pub mod metric;
pub mod period;
pub mod rollup;
pub mod store;
pub mod territory;
pub mod types;

pub use assemble::{DataRow, ReportRow};
pub use config::ReportConfig;
pub use derive::Percent;
pub use engine::{ReportEngine, ReportRequest};
pub use error::{ReportError, ReportResult};
pub use period::ReportingPeriod;
pub use territory::{Level, TerritoryFilter, TerritoryPath};
