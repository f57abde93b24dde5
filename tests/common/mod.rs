#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Mutex;
use transaction_reports::domain::transaction::{
    SendStatus, Transaction, TransactionReport, TransactionStatus, TransactionType,
};
use transaction_reports::error::{BatchInsertError, RowInsertError};
use transaction_reports::repo::transactions_repo::TransactionStore;
use transaction_reports::storage::ReportStorage;
use transaction_reports::stream::StatusPublisher;

pub struct StoredRow {
    pub user_id: i64,
    pub report: TransactionReport,
}

/// In-memory stand-in for the transactions table. Mirrors the store contract:
/// row-by-row inserts that abort on the first bad timestamp or injected
/// failure, and a closed-interval range query ordered by created_at.
#[derive(Default)]
pub struct InMemoryStore {
    pub rows: Mutex<Vec<StoredRow>>,
    pub fail_at: Option<usize>,
    pub fail_query: Option<String>,
}

#[async_trait::async_trait]
impl TransactionStore for InMemoryStore {
    async fn insert_batch(&self, batch: &[Transaction]) -> Result<(), BatchInsertError> {
        for (index, transaction) in batch.iter().enumerate() {
            let created_at = DateTime::parse_from_rfc3339(&transaction.created_at)
                .map_err(|source| BatchInsertError {
                    inserted: index,
                    failed_index: index,
                    source: RowInsertError::Timestamp {
                        value: transaction.created_at.clone(),
                        source,
                    },
                })?
                .with_timezone(&Utc);

            if self.fail_at == Some(index) {
                return Err(BatchInsertError {
                    inserted: index,
                    failed_index: index,
                    source: RowInsertError::Execute(sqlx::Error::PoolClosed),
                });
            }

            self.rows.lock().unwrap().push(StoredRow {
                user_id: transaction.user_id,
                report: TransactionReport {
                    id: transaction.id.clone(),
                    amount: transaction.amount,
                    currency: transaction.currency.clone(),
                    description: transaction.description.clone().unwrap_or_default(),
                    payment_description: transaction.payment_description.clone().unwrap_or_default(),
                    status: transaction.status.as_str().to_string(),
                    send_status: transaction.send_status.as_str().to_string(),
                    created_at,
                },
            });
        }

        Ok(())
    }

    async fn reports_by_user(
        &self,
        user_id: i64,
        start: &str,
        end: &str,
    ) -> anyhow::Result<Vec<TransactionReport>> {
        if let Some(message) = &self.fail_query {
            anyhow::bail!("{message}");
        }

        let (Some(start), Some(end)) = (parse_bound(start), parse_bound(end)) else {
            return Ok(Vec::new());
        };

        let mut out: Vec<TransactionReport> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| {
                row.user_id == user_id
                    && row.report.created_at >= start
                    && row.report.created_at <= end
            })
            .map(|row| row.report.clone())
            .collect();
        out.sort_by_key(|report| report.created_at);

        Ok(out)
    }
}

fn parse_bound(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_hms_opt(0, 0, 0).unwrap().and_utc())
}

#[derive(Default)]
pub struct RecordingPublisher {
    pub published: Mutex<Vec<Vec<u8>>>,
    pub fail: bool,
}

#[async_trait::async_trait]
impl StatusPublisher for RecordingPublisher {
    async fn publish(&self, payload: Vec<u8>) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("simulated publish failure");
        }
        self.published.lock().unwrap().push(payload);
        Ok(())
    }
}

#[derive(Default)]
pub struct CapturingStorage {
    pub uploads: Mutex<Vec<(String, Vec<u8>)>>,
}

#[async_trait::async_trait]
impl ReportStorage for CapturingStorage {
    async fn upload_csv(&self, object_name: &str, bytes: Vec<u8>) -> anyhow::Result<String> {
        self.uploads
            .lock()
            .unwrap()
            .push((object_name.to_string(), bytes));
        Ok(format!("http://storage.local/reports/{object_name}"))
    }
}

pub fn transaction(id: &str, user_id: i64, amount: i64, created_at: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        payment_id: format!("pay-{id}"),
        account_id: format!("acc-{id}"),
        user_id,
        transaction_type: TransactionType::Credit,
        amount,
        currency: "USD".to_string(),
        description: Some("salary".to_string()),
        payment_description: Some("march salary".to_string()),
        status: TransactionStatus::Completed,
        send_status: SendStatus::Pending,
        created_at: created_at.to_string(),
    }
}
