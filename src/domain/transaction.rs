use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Debit,
    Credit,
    Transfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Debit => "debit",
            TransactionType::Credit => "credit",
            TransactionType::Transfer => "transfer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
        }
    }
}

/// Delivery state of the downstream notification for a transaction, distinct
/// from its business status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SendStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl SendStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SendStatus::Pending => "PENDING",
            SendStatus::Completed => "COMPLETED",
            SendStatus::Failed => "FAILED",
        }
    }
}

/// A change-data-capture record of a financial movement. Amounts are integer
/// minor currency units end to end; `created_at` stays a raw ISO-8601 string
/// until the repository parses it at the persistence boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub payment_id: String,
    pub account_id: String,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub payment_description: Option<String>,
    pub status: TransactionStatus,
    #[serde(default)]
    pub send_status: SendStatus,
    pub created_at: String,
}

/// Correlates a transaction id with its delivery outcome. Published once per
/// persisted transaction, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSendStatus {
    pub id: String,
    pub send_status: SendStatus,
}

#[derive(Debug, Clone, Copy)]
pub enum PersistOutcome {
    Persisted,
}

/// Maps a persistence outcome to the status reported downstream. Only the
/// success path produces statuses today; failed and partial batches publish
/// nothing at all.
pub fn send_status_for(outcome: PersistOutcome) -> SendStatus {
    match outcome {
        PersistOutcome::Persisted => SendStatus::Completed,
    }
}

/// Read projection of a transaction used only for report rendering.
#[derive(Debug, Clone)]
pub struct TransactionReport {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub description: String,
    pub payment_description: String,
    pub status: String,
    pub send_status: String,
    pub created_at: DateTime<Utc>,
}
