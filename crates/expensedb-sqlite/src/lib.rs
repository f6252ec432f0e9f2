//! SQLite storage backend for expensedb.
//!
//! Each store owns one long-lived connection and a full in-memory mirror of
//! its table. Reads are served from the mirror; writes hit the database
//! first and are applied to the mirror only once the row is durable, so a
//! storage fault never leaves memory ahead of disk.

pub mod account_store;
pub mod dates;
pub mod schema;
pub mod transaction_store;

pub use account_store::SqliteAccountStore;
pub use transaction_store::SqliteTransactionStore;
