use crate::stream::StatusPublisher;
use anyhow::Result;

#[derive(Clone)]
pub struct RedisStatusPublisher {
    pub client: redis::Client,
    pub stream_key: String,
}

#[async_trait::async_trait]
impl StatusPublisher for RedisStatusPublisher {
    async fn publish(&self, payload: Vec<u8>) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: String = redis::cmd("XADD")
            .arg(&self.stream_key)
            .arg("MAXLEN")
            .arg("~")
            .arg(1_000_000)
            .arg("*")
            .arg("payload")
            .arg(payload)
            .query_async(&mut conn)
            .await?;

        Ok(())
    }
}
