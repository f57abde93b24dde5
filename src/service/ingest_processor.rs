use crate::domain::transaction::{send_status_for, PersistOutcome, Transaction, TransactionSendStatus};
use crate::error::IngestError;
use crate::repo::transactions_repo::TransactionStore;
use crate::stream::StatusPublisher;
use std::sync::Arc;

/// Linear per-message pipeline: decode the batch, persist it in full, then
/// publish one send status per transaction. No state survives a call.
#[derive(Clone)]
pub struct IngestProcessor {
    pub store: Arc<dyn TransactionStore>,
    pub publisher: Arc<dyn StatusPublisher>,
}

impl IngestProcessor {
    pub async fn process(&self, payload: &[u8]) -> Result<(), IngestError> {
        let batch: Vec<Transaction> = serde_json::from_slice(payload).map_err(IngestError::Decode)?;
        tracing::debug!(count = batch.len(), "received transaction batch");

        // On any insert failure the whole notification step is skipped, even
        // though a prefix of the batch may already be durable.
        self.store.insert_batch(&batch).await?;

        let statuses: Vec<TransactionSendStatus> = batch
            .iter()
            .map(|t| TransactionSendStatus {
                id: t.id.clone(),
                send_status: send_status_for(PersistOutcome::Persisted),
            })
            .collect();

        let encoded = serde_json::to_vec(&statuses).map_err(IngestError::Encode)?;
        self.publisher.publish(encoded).await.map_err(IngestError::Publish)?;

        Ok(())
    }
}
