use crate::error::IngestError;
use crate::service::ingest_processor::IngestProcessor;
use anyhow::Result;
use redis::streams::StreamReadReply;

/// Consumes CDC batches from a stream consumer group, one entry at a time.
/// Processing fully completes before the next entry is read. Acked entries are
/// done; entries left pending after a failure are the stream's to redeliver.
pub struct CdcConsumer {
    pub redis_client: redis::Client,
    pub stream_key: String,
    pub group: String,
    pub consumer_name: String,
    pub processor: IngestProcessor,
}

impl CdcConsumer {
    pub async fn run(self) -> Result<()> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;

        let _: redis::RedisResult<String> = redis::cmd("XGROUP")
            .arg("CREATE")
            .arg(&self.stream_key)
            .arg(&self.group)
            .arg("0")
            .arg("MKSTREAM")
            .query_async(&mut conn)
            .await;

        loop {
            let reply: StreamReadReply = redis::cmd("XREADGROUP")
                .arg("GROUP")
                .arg(&self.group)
                .arg(&self.consumer_name)
                .arg("COUNT")
                .arg(100)
                .arg("BLOCK")
                .arg(2000)
                .arg("STREAMS")
                .arg(&self.stream_key)
                .arg(">")
                .query_async(&mut conn)
                .await
                .unwrap_or(StreamReadReply { keys: vec![] });

            if reply.keys.is_empty() {
                continue;
            }

            for stream_key in reply.keys {
                for entry in stream_key.ids {
                    let payload = entry
                        .map
                        .get("payload")
                        .and_then(|v| redis::from_redis_value::<Vec<u8>>(v).ok());

                    let ack = match payload {
                        None => {
                            tracing::warn!(id = %entry.id, "dropping stream entry without payload field");
                            true
                        }
                        Some(bytes) => match self.processor.process(&bytes).await {
                            Ok(()) => true,
                            Err(err @ IngestError::Decode(_)) => {
                                tracing::warn!(id = %entry.id, "dropping batch: {err}");
                                true
                            }
                            Err(err) => {
                                tracing::error!(id = %entry.id, "failed to process batch: {err}");
                                false
                            }
                        },
                    };

                    if ack {
                        let _: i64 = redis::cmd("XACK")
                            .arg(&self.stream_key)
                            .arg(&self.group)
                            .arg(&entry.id)
                            .query_async(&mut conn)
                            .await
                            .unwrap_or(0);
                    }
                }
            }
        }
    }
}
