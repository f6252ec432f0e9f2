//! expensedb — a personal expense-tracking data layer.
//!
//! Two stores (accounts and an append-mostly transaction log) backed by a
//! local SQLite database, each mirroring its table in memory. Storage
//! backends are pluggable: `expensedb-sqlite` is the durable one,
//! `expensedb-memory` keeps everything in process memory.

pub mod config;
pub mod manager;

pub use expensedb_core::{
    Account, AccountStore, ExpenseType, StorageError, Transaction, TransactionStore,
};
pub use expensedb_memory::{InMemoryAccountStore, InMemoryTransactionStore};
pub use expensedb_sqlite::{SqliteAccountStore, SqliteTransactionStore};
pub use manager::ExpenseManager;
