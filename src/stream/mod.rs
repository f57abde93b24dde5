pub mod consumer;
pub mod publisher_redis;

/// Downstream notification facility. Accepts one opaque payload and delivers
/// it at least once under a fixed logical destination.
#[async_trait::async_trait]
pub trait StatusPublisher: Send + Sync {
    async fn publish(&self, payload: Vec<u8>) -> anyhow::Result<()>;
}
