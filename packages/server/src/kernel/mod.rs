//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod memory_store;
pub mod postgres_store;
pub mod traits;

pub use deps::ServerDeps;
pub use memory_store::MemoryEntityStore;
pub use postgres_store::PostgresEntityStore;
pub use traits::*;
