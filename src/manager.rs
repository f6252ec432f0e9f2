use std::sync::Arc;

use time::Date;

use expensedb_core::{
    AccountStore, ExpenseType, StorageError, Transaction, TransactionStore,
};
use expensedb_memory::{InMemoryAccountStore, InMemoryTransactionStore};
use expensedb_sqlite::{SqliteAccountStore, SqliteTransactionStore};

/// Wires one account store and one transaction store together.
///
/// The stores stay uncoordinated; recording a transaction is two explicit
/// calls, balance first, so an invalid account logs nothing.
pub struct ExpenseManager {
    accounts: Arc<dyn AccountStore>,
    transactions: Arc<dyn TransactionStore>,
}

impl ExpenseManager {
    pub fn new(accounts: Arc<dyn AccountStore>, transactions: Arc<dyn TransactionStore>) -> Self {
        Self {
            accounts,
            transactions,
        }
    }

    /// Both stores over the same database file.
    pub fn open_sqlite(path: &str) -> Result<Self, StorageError> {
        let accounts = SqliteAccountStore::open(path)?;
        let transactions = SqliteTransactionStore::open(path)?;
        Ok(Self::new(Arc::new(accounts), Arc::new(transactions)))
    }

    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryAccountStore::new()),
            Arc::new(InMemoryTransactionStore::new()),
        )
    }

    pub fn accounts(&self) -> &dyn AccountStore {
        self.accounts.as_ref()
    }

    pub fn transactions(&self) -> &dyn TransactionStore {
        self.transactions.as_ref()
    }

    /// Applies the amount to the account balance and appends a log entry.
    pub fn record_transaction(
        &self,
        account_no: &str,
        date: Date,
        expense_type: ExpenseType,
        amount: f64,
    ) -> Result<(), StorageError> {
        self.accounts
            .update_balance(account_no, expense_type, amount)?;
        self.transactions.log_transaction(Transaction {
            date,
            account_no: Arc::from(account_no),
            expense_type,
            amount,
        })
    }
}
