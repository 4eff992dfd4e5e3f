use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("invalid territory filter: {reason}")]
    InvalidFilter { reason: String },

    #[error("unknown metric '{id}'")]
    UnknownMetric { id: String },

    #[error("invalid metric catalog: {reason}")]
    Catalog { reason: String },

    #[error("data source unavailable: {0}")]
    DataUnavailable(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
