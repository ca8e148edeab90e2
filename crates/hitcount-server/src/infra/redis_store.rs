//! Redis-backed `KvStore`.
//!
//! One multiplexed connection is opened lazily on first use and shared by all
//! in-flight requests. Every round trip, connect included, is bounded by the
//! configured timeout. A transport failure drops the cached connection so the
//! next request dials again; nothing is retried within a request.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, RedisError};
use tokio::sync::Mutex;

use hitcount_core::error::{HitcountError, Result};
use hitcount_core::KvStore;

pub struct RedisStore {
    client: redis::Client,
    conn: Mutex<Option<MultiplexedConnection>>,
    timeout: Duration,
}

impl RedisStore {
    /// Does not connect; the first round trip does.
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| HitcountError::Config(format!("invalid redis address {url}: {e}")))?;
        Ok(Self {
            client,
            conn: Mutex::new(None),
            timeout,
        })
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        let mut slot = self.conn.lock().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }
        // Dial while holding the slot so concurrent requests share one attempt.
        // Nothing cached yet, so a failure leaves the slot empty as is.
        let dial = self.client.get_multiplexed_async_connection();
        let conn = match tokio::time::timeout(self.timeout, dial).await {
            Ok(Ok(conn)) => conn,
            Ok(Err(e)) => return Err(HitcountError::StoreUnavailable(format!("connect: {e}"))),
            Err(_) => return Err(self.timed_out("connect")),
        };
        tracing::info!(backend = "redis", "store connection established");
        *slot = Some(conn.clone());
        Ok(conn)
    }

    /// Bound one command on an established connection. Transport failures drop
    /// the cached connection so the next request dials again.
    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, RedisError>>,
    {
        let err = match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(v)) => return Ok(v),
            Ok(Err(e)) => map_redis_err(op, &e),
            Err(_) => self.timed_out(op),
        };
        if matches!(err, HitcountError::StoreUnavailable(_)) {
            self.conn.lock().await.take();
        }
        Err(err)
    }

    fn timed_out(&self, op: &str) -> HitcountError {
        HitcountError::StoreUnavailable(format!(
            "{op} timed out after {}ms",
            self.timeout.as_millis()
        ))
    }
}

fn map_redis_err(op: &str, e: &RedisError) -> HitcountError {
    if e.is_io_error() || e.is_timeout() || e.is_connection_dropped() || e.is_connection_refusal() {
        HitcountError::StoreUnavailable(format!("{op}: {e}"))
    } else {
        HitcountError::StoreProtocol(format!("{op}: {e}"))
    }
}

#[async_trait]
impl KvStore for RedisStore {
    fn backend(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        self.bounded("GET", conn.get::<_, Option<String>>(key)).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.connection().await?;
        self.bounded("SET", conn.set::<_, _, ()>(key, value)).await
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.connection().await?;
        self.bounded("INCR", conn.incr::<_, _, i64>(key, 1)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_url_is_config_error() {
        let err = RedisStore::new("not a url", Duration::from_millis(100)).err();
        assert!(matches!(err, Some(HitcountError::Config(_))));
    }

    #[tokio::test]
    async fn unreachable_server_fails_within_timeout() {
        // Port 1 on loopback: refused immediately on any sane host.
        let store = RedisStore::new("redis://127.0.0.1:1/", Duration::from_millis(500))
            .expect("url parses");

        for _ in 0..2 {
            let res = tokio::time::timeout(Duration::from_secs(5), store.get("counter"))
                .await
                .expect("connect failure must not hang");
            assert!(matches!(res, Err(HitcountError::StoreUnavailable(_))));
        }

        let res = tokio::time::timeout(Duration::from_secs(5), store.set("counter", "1"))
            .await
            .expect("set after failed connect must not hang");
        assert!(matches!(res, Err(HitcountError::StoreUnavailable(_))));
        assert!(store.conn.lock().await.is_none());
    }
}
