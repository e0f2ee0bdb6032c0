mod file;
mod memory;
mod redis_store;

pub use self::file::FileStore;
pub use self::memory::MemoryStore;
pub use self::redis_store::RedisStore;
