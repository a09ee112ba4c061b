//! Database layer - connection pool, repositories, and migrations
//!
//! - Every statement runs on a connection borrowed from the pool and handed
//!   back when the query future completes, success or error
//! - One statement per operation; no explicit transactions
//! - Rows come back in primary-key order

pub mod memory;
pub mod migrations;
pub mod pool;
pub mod repos;

pub use memory::InMemoryRepository;
pub use pool::{create_pool, PoolConfig};
pub use repos::*;
