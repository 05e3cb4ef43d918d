//! Database layer - storage handle, connection pool and repositories
//!
//! # Design Principles
//!
//! - Connection pool - no Arc<Mutex<Connection>>
//! - Question listings use JOINs - no N+1 queries
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Handlers receive the store explicitly through `TriviaStore`

pub mod memory;
pub mod pool;
pub mod repos;
pub mod schema;
pub mod store;

pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_with_options};
pub use repos::DbError;
pub use store::{PgStore, TriviaStore};
