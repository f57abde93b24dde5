pub mod s3;

/// Object storage facility. Takes a named byte stream and returns a
/// retrievable reference to it.
#[async_trait::async_trait]
pub trait ReportStorage: Send + Sync {
    async fn upload_csv(&self, object_name: &str, bytes: Vec<u8>) -> anyhow::Result<String>;
}
