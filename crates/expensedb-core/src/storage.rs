use std::sync::Arc;

use crate::models::{Account, ExpenseType, Transaction};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("{0}")]
    Other(String),
    #[error("invalid account: {0}")]
    InvalidAccount(String),
    #[error("account already exists: {0}")]
    AccountExists(String),
    #[error("malformed stored date: {0}")]
    MalformedDate(String),
    #[error("malformed expense type: {0}")]
    MalformedType(String),
}

pub trait AccountStore: Send + Sync {
    /// All known account numbers, order unspecified.
    fn list_account_numbers(&self) -> Vec<Arc<str>>;
    /// All account records, order unspecified.
    fn list_accounts(&self) -> Vec<Account>;
    fn get_account(&self, account_no: &str) -> Result<Account, StorageError>;
    /// Fails with `AccountExists` if the account number is already taken.
    fn add_account(&self, account: Account) -> Result<(), StorageError>;
    fn remove_account(&self, account_no: &str) -> Result<(), StorageError>;
    /// Applies `amount` to the balance: subtracted for `Expense`, added for
    /// `Income`.
    fn update_balance(
        &self,
        account_no: &str,
        expense_type: ExpenseType,
        amount: f64,
    ) -> Result<(), StorageError>;
}

pub trait TransactionStore: Send + Sync {
    /// Appends to the log. The referenced account is not validated.
    fn log_transaction(&self, transaction: Transaction) -> Result<(), StorageError>;
    /// The full log in insertion order, oldest first.
    fn get_all_transactions(&self) -> Vec<Transaction>;
    /// The most recent `limit` entries in insertion order; everything when
    /// `limit` exceeds the log length.
    fn get_paginated_transactions(&self, limit: usize) -> Vec<Transaction>;
}
