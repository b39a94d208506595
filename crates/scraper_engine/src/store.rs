use std::time::Duration;

use redis::aio::ConnectionManager;
use tokio::sync::Mutex;

use crate::StoreError;

/// The store primitives the writer needs: hashes, sorted sets and expiry.
#[async_trait::async_trait]
pub trait PositionStore: Send + Sync {
    async fn hash_set(&self, key: &str, fields: &[(&'static str, String)]) -> Result<(), StoreError>;

    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError>;

    async fn sorted_set_add(&self, key: &str, score: u8, member: &str) -> Result<(), StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;

    /// Replace the underlying connection with a freshly opened one.
    async fn reconnect(&self) -> Result<(), StoreError>;
}

/// Redis-backed store holding one long-lived connection.
pub struct RedisStore {
    client: redis::Client,
    conn: Mutex<ConnectionManager>,
}

impl RedisStore {
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let client = redis::Client::open(url)?;
        let manager = client.get_connection_manager().await?;
        Ok(Self {
            client,
            conn: Mutex::new(manager),
        })
    }

    async fn connection(&self) -> ConnectionManager {
        self.conn.lock().await.clone()
    }
}

#[async_trait::async_trait]
impl PositionStore for RedisStore {
    async fn hash_set(&self, key: &str, fields: &[(&'static str, String)]) -> Result<(), StoreError> {
        let mut cmd = redis::cmd("HSET");
        cmd.arg(key);
        for (name, value) in fields {
            cmd.arg(*name).arg(value);
        }
        let mut conn = self.connection().await;
        let _: () = cmd.query_async(&mut conn).await?;
        Ok(())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<(), StoreError> {
        let mut conn = self.connection().await;
        let _: () = redis::cmd("EXPIRE")
            .arg(key)
            .arg(ttl.as_secs())
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn sorted_set_add(&self, key: &str, score: u8, member: &str) -> Result<(), StoreError> {
        let mut conn = self.connection().await;
        let _: () = redis::cmd("ZADD")
            .arg(key)
            .arg(score)
            .arg(member)
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.connection().await;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        if pong != "PONG" {
            return Err(StoreError::Unavailable(format!("unexpected PING reply {pong}")));
        }
        Ok(())
    }

    async fn reconnect(&self) -> Result<(), StoreError> {
        let manager = self.client.get_connection_manager().await?;
        *self.conn.lock().await = manager;
        Ok(())
    }
}
