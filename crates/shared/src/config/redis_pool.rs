use anyhow::{Context, Result};
use deadpool_redis::{Config as PoolConfig, Pool, Runtime};
use tracing::info;

pub struct RedisPool;

impl RedisPool {
    pub async fn connect(url: &str) -> Result<Pool> {
        info!("Creating redis pool");

        let pool = PoolConfig::from_url(url)
            .create_pool(Some(Runtime::Tokio1))
            .context("Failed to create redis pool")?;

        let mut conn = pool
            .get()
            .await
            .context("Failed to get redis connection")?;

        info!("Pinging redis");
        redis::cmd("PING")
            .query_async::<()>(&mut conn)
            .await
            .context("Failed to ping redis server")?;
        info!("Pinged redis");

        Ok(pool)
    }
}
