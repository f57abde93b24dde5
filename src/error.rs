use thiserror::Error;

#[derive(Debug, Error)]
pub enum RowInsertError {
    #[error("created_at {value:?} is not a valid RFC 3339 timestamp: {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("insert statement failed: {0}")]
    Execute(#[from] sqlx::Error),
}

/// Batch inserts run row by row in batch order, so a failure can leave a
/// durably written prefix behind. The error states how far the batch got
/// instead of collapsing it into an opaque aggregate.
#[derive(Debug, Error)]
#[error("batch insert aborted at element {failed_index} after {inserted} rows were written: {source}")]
pub struct BatchInsertError {
    pub inserted: usize,
    pub failed_index: usize,
    #[source]
    pub source: RowInsertError,
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("malformed transaction batch: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to persist transaction batch: {0}")]
    Persist(#[from] BatchInsertError),
    #[error("failed to encode send statuses: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to publish send statuses: {0}")]
    Publish(#[source] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to load transactions: {0}")]
    Query(#[source] anyhow::Error),
    #[error("failed to render report: {0}")]
    Render(#[from] csv::Error),
    #[error("failed to upload report: {0}")]
    Upload(#[source] anyhow::Error),
}
