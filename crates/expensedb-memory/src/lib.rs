//! In-memory storage backend for expensedb.
//!
//! Holds accounts and the transaction log entirely in process memory with
//! no durability. Useful as a scratch backend, in tests, and in benches.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use expensedb_core::{
    Account, AccountStore, ExpenseType, StorageError, Transaction, TransactionStore,
};

#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: RwLock<HashMap<Arc<str>, Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountStore for InMemoryAccountStore {
    fn list_account_numbers(&self) -> Vec<Arc<str>> {
        self.accounts.read().unwrap().keys().cloned().collect()
    }

    fn list_accounts(&self) -> Vec<Account> {
        self.accounts.read().unwrap().values().cloned().collect()
    }

    fn get_account(&self, account_no: &str) -> Result<Account, StorageError> {
        self.accounts
            .read()
            .unwrap()
            .get(account_no)
            .cloned()
            .ok_or_else(|| StorageError::InvalidAccount(account_no.to_string()))
    }

    fn add_account(&self, account: Account) -> Result<(), StorageError> {
        let mut accounts = self.accounts.write().unwrap();
        if accounts.contains_key(&account.account_no) {
            return Err(StorageError::AccountExists(account.account_no.to_string()));
        }
        tracing::debug!(account_no = %account.account_no, "account added");
        accounts.insert(account.account_no.clone(), account);
        Ok(())
    }

    fn remove_account(&self, account_no: &str) -> Result<(), StorageError> {
        let mut accounts = self.accounts.write().unwrap();
        accounts
            .remove(account_no)
            .map(|_| ())
            .ok_or_else(|| StorageError::InvalidAccount(account_no.to_string()))
    }

    fn update_balance(
        &self,
        account_no: &str,
        expense_type: ExpenseType,
        amount: f64,
    ) -> Result<(), StorageError> {
        let mut accounts = self.accounts.write().unwrap();
        let account = accounts
            .get_mut(account_no)
            .ok_or_else(|| StorageError::InvalidAccount(account_no.to_string()))?;
        account.balance = match expense_type {
            ExpenseType::Expense => account.balance - amount,
            ExpenseType::Income => account.balance + amount,
        };
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryTransactionStore {
    transactions: RwLock<Vec<Transaction>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionStore for InMemoryTransactionStore {
    fn log_transaction(&self, transaction: Transaction) -> Result<(), StorageError> {
        self.transactions.write().unwrap().push(transaction);
        Ok(())
    }

    fn get_all_transactions(&self) -> Vec<Transaction> {
        self.transactions.read().unwrap().clone()
    }

    fn get_paginated_transactions(&self, limit: usize) -> Vec<Transaction> {
        let transactions = self.transactions.read().unwrap();
        let start = transactions.len().saturating_sub(limit);
        transactions[start..].to_vec()
    }
}
