use crate::domain::transaction::{Transaction, TransactionReport};
use crate::error::{BatchInsertError, RowInsertError};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

#[async_trait::async_trait]
pub trait TransactionStore: Send + Sync {
    /// Persists a batch with one insert per element, in batch order. Not
    /// atomic across the batch: on failure the elements before `failed_index`
    /// stay written.
    async fn insert_batch(&self, batch: &[Transaction]) -> Result<(), BatchInsertError>;

    /// Rows for one user whose created_at falls inside the closed interval
    /// [start, end], ascending by created_at. Bounds pass through verbatim;
    /// start > end simply matches nothing.
    async fn reports_by_user(
        &self,
        user_id: i64,
        start: &str,
        end: &str,
    ) -> anyhow::Result<Vec<TransactionReport>>;
}

#[derive(Clone)]
pub struct TransactionsRepo {
    pub pool: PgPool,
}

#[async_trait::async_trait]
impl TransactionStore for TransactionsRepo {
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

            sqlx::query(
                r#"
                INSERT INTO transactions (
                    id, payment_id, account_id, user_id, type, amount,
                    currency, description, payment_description, status, send_status, created_at
                ) VALUES (
                    $1, $2, $3, $4, $5, $6,
                    $7, $8, $9, $10, $11, $12
                )
                "#,
            )
            .bind(&transaction.id)
            .bind(&transaction.payment_id)
            .bind(&transaction.account_id)
            .bind(transaction.user_id)
            .bind(transaction.transaction_type.as_str())
            .bind(transaction.amount)
            .bind(&transaction.currency)
            .bind(transaction.description.clone().unwrap_or_default())
            .bind(transaction.payment_description.clone().unwrap_or_default())
            .bind(transaction.status.as_str())
            .bind(transaction.send_status.as_str())
            .bind(created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| BatchInsertError {
                inserted: index,
                failed_index: index,
                source: RowInsertError::Execute(e),
            })?;
        }

        Ok(())
    }

    async fn reports_by_user(
        &self,
        user_id: i64,
        start: &str,
        end: &str,
    ) -> anyhow::Result<Vec<TransactionReport>> {
        let rows = sqlx::query(
            r#"
            SELECT id, amount, currency, description, payment_description, status, send_status, created_at
            FROM transactions
            WHERE user_id = $1 AND created_at BETWEEN $2::timestamptz AND $3::timestamptz
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| TransactionReport {
                id: r.get("id"),
                amount: r.get("amount"),
                currency: r.get("currency"),
                description: r.get("description"),
                payment_description: r.get("payment_description"),
                status: r.get("status"),
                send_status: r.get("send_status"),
                created_at: r.get("created_at"),
            })
            .collect())
    }
}
