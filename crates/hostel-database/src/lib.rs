//! # hostel-database
//!
//! PostgreSQL connection management, migrations, and the [`AccountStore`]
//! seam with its Postgres and in-memory implementations.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod retry;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryAccountStore;
pub use repositories::AccountRepository;
pub use retry::RetryPolicy;
pub use store::AccountStore;
