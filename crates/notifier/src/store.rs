//! Redis-backed record store.
//!
//! Records are stored as JSON strings under `notification:record:{id}` keys.
//! Retention and expiry are the store's concern; the engine never deletes.

use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use herald_common::error::AppError;
use herald_engine::delivery::RecordStore;

/// Key under which a record with the given id is stored.
pub fn record_key(id: &str) -> String {
    format!("notification:record:{id}")
}

/// Key-value store client over a shared Redis connection.
pub struct RedisRecordStore {
    redis: ConnectionManager,
}

impl RedisRecordStore {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl RecordStore for RedisRecordStore {
    async fn get(&self, id: &str) -> Result<Option<String>, AppError> {
        let mut conn = self.redis.clone();
        let payload: Option<String> = conn.get(record_key(id)).await?;
        Ok(payload)
    }

    async fn set(&self, id: &str, payload: &str) -> Result<(), AppError> {
        let mut conn = self.redis.clone();
        conn.set::<_, _, ()>(record_key(id), payload).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_key_format() {
        assert_eq!(
            record_key("0192d3a0-0000-7000-8000-000000000000"),
            "notification:record:0192d3a0-0000-7000-8000-000000000000"
        );
    }
}
