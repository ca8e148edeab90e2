//! Concrete `KvStore` backends.

pub mod memory_store;
pub mod redis_store;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
