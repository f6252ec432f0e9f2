//! Core types and traits for expensedb storage backends.
//!
//! This crate provides the `AccountStore` and `TransactionStore` traits and
//! all associated types, enabling pluggable storage implementations in
//! separate crates.

pub mod models;
pub mod storage;

// Re-export key types at crate root for convenience
pub use models::{Account, ExpenseType, Transaction};
pub use storage::{AccountStore, StorageError, TransactionStore};
