use crate::domain::transaction::TransactionReport;
use crate::error::ReportError;
use crate::repo::transactions_repo::TransactionStore;
use crate::storage::ReportStorage;
use chrono::{DateTime, Datelike, Utc};
use std::sync::Arc;
use uuid::Uuid;

pub const REPORT_HEADER: [&str; 6] = [
    "amount",
    "currency",
    "description",
    "payment_description",
    "status",
    "created_at",
];

#[derive(Clone)]
pub struct ReportBuilder {
    pub store: Arc<dyn TransactionStore>,
    pub storage: Arc<dyn ReportStorage>,
}

impl ReportBuilder {
    /// Queries the user's transactions for the range, renders them as CSV and
    /// uploads the file. Every call re-queries and uploads a fresh object;
    /// identical requests are not deduplicated.
    pub async fn build_report(
        &self,
        user_id: i64,
        start_date: &str,
        end_date: &str,
    ) -> Result<String, ReportError> {
        let rows = self
            .store
            .reports_by_user(user_id, start_date, end_date)
            .await
            .map_err(ReportError::Query)?;

        let table = render_csv(&rows)?;
        let name = object_name(Utc::now());
        let file_url = self
            .storage
            .upload_csv(&name, table)
            .await
            .map_err(ReportError::Upload)?;

        tracing::debug!(%file_url, "report uploaded");
        Ok(file_url)
    }
}

/// Renders the fixed-header table. Row order is the query order, so the output
/// is byte-identical for a given row set.
pub fn render_csv(rows: &[TransactionReport]) -> Result<Vec<u8>, csv::Error> {
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(REPORT_HEADER)?;
        for row in rows {
            writer.write_record([
                format_amount(row.amount).as_str(),
                row.currency.as_str(),
                row.description.as_str(),
                row.payment_description.as_str(),
                row.status.as_str(),
                row.created_at.to_rfc3339().as_str(),
            ])?;
        }
        writer.flush()?;
    }

    Ok(buf)
}

/// Minor units to a two-decimal display value, in integer arithmetic the whole
/// way: 12345 -> "123.45", 99 -> "0.99". Amounts past f64's 53-bit mantissa
/// still render exactly.
pub fn format_amount(minor: i64) -> String {
    let sign = if minor < 0 { "-" } else { "" };
    let magnitude = minor.unsigned_abs();
    format!("{sign}{}.{:02}", magnitude / 100, magnitude % 100)
}

/// Object name under the current wall-clock date, not any date from the
/// report's range.
pub fn object_name(now: DateTime<Utc>) -> String {
    format!(
        "{:04}/{:02}/{:02}-{}.csv",
        now.year(),
        now.month(),
        now.day(),
        Uuid::new_v4()
    )
}
