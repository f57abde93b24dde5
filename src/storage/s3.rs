use crate::storage::ReportStorage;
use anyhow::Result;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;

/// S3-compatible report store. Path-style addressing so a MinIO endpoint
/// works unchanged.
#[derive(Clone)]
pub struct S3ReportStorage {
    pub client: aws_sdk_s3::Client,
    pub bucket: String,
    pub public_base_url: String,
}

impl S3ReportStorage {
    pub fn new(endpoint: &str, region: &str, bucket: &str, access_key: &str, secret_key: &str) -> Self {
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .endpoint_url(endpoint)
            .credentials_provider(Credentials::new(access_key, secret_key, None, None, "static"))
            .force_path_style(true)
            .build();

        Self {
            client: aws_sdk_s3::Client::from_conf(config),
            bucket: bucket.to_string(),
            public_base_url: endpoint.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait::async_trait]
impl ReportStorage for S3ReportStorage {
    async fn upload_csv(&self, object_name: &str, bytes: Vec<u8>) -> Result<String> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(object_name)
            .content_type("text/csv")
            .body(ByteStream::from(bytes))
            .send()
            .await?;

        Ok(format!("{}/{}/{}", self.public_base_url, self.bucket, object_name))
    }
}
