mod database;
mod hashing;
mod myconfig;
mod redis_pool;

pub use self::database::{ConnectionManager, ConnectionPool, run_migrations};
pub use self::hashing::Hashing;
pub use self::myconfig::{Config, LogConfig, StoreBackend};
pub use self::redis_pool::RedisPool;
