use std::{
    collections::HashMap,
    sync::{Arc, Mutex, RwLock},
};

use rusqlite::{params, Connection};

use expensedb_core::{Account, AccountStore, ExpenseType, StorageError};

use crate::schema;

/// Account store backed by the `account` table, with a full in-memory
/// mirror hydrated at construction. Reads never touch the database.
pub struct SqliteAccountStore {
    conn: Mutex<Connection>,
    accounts: RwLock<HashMap<Arc<str>, Account>>,
}

impl SqliteAccountStore {
    pub fn open(path: &str) -> Result<Self, StorageError> {
        let conn = schema::open(path)?;
        let accounts = Self::hydrate(&conn)?;
        tracing::debug!(count = accounts.len(), "account mirror hydrated");

        Ok(Self {
            conn: Mutex::new(conn),
            accounts: RwLock::new(accounts),
        })
    }

    fn hydrate(conn: &Connection) -> Result<HashMap<Arc<str>, Account>, StorageError> {
        let mut stmt = conn
            .prepare("SELECT account_no, bank, name, balance FROM account")
            .map_err(|e| StorageError::Other(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                let account_no: String = row.get(0)?;
                let bank_name: String = row.get(1)?;
                let holder_name: String = row.get(2)?;
                let balance: f64 = row.get(3)?;
                Ok(Account {
                    account_no: Arc::from(account_no.as_str()),
                    bank_name,
                    holder_name,
                    balance,
                })
            })
            .map_err(|e| StorageError::Other(e.to_string()))?;

        let mut accounts = HashMap::new();
        for row in rows {
            let account = row.map_err(|e| StorageError::Other(e.to_string()))?;
            accounts.insert(account.account_no.clone(), account);
        }
        Ok(accounts)
    }
}

impl AccountStore for SqliteAccountStore {
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

        // Row first; the mirror is only updated once the insert is durable
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO account (account_no, name, bank, balance) VALUES (?1, ?2, ?3, ?4)",
            params![
                account.account_no.as_ref(),
                account.holder_name,
                account.bank_name,
                account.balance
            ],
        )
        .map_err(|e| StorageError::Other(e.to_string()))?;

        accounts.insert(account.account_no.clone(), account);
        Ok(())
    }

    fn remove_account(&self, account_no: &str) -> Result<(), StorageError> {
        let mut accounts = self.accounts.write().unwrap();
        if !accounts.contains_key(account_no) {
            return Err(StorageError::InvalidAccount(account_no.to_string()));
        }

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "DELETE FROM account WHERE account_no = ?1",
            params![account_no],
        )
        .map_err(|e| StorageError::Other(e.to_string()))?;

        accounts.remove(account_no);
        Ok(())
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

        let balance = match expense_type {
            ExpenseType::Expense => account.balance - amount,
            ExpenseType::Income => account.balance + amount,
        };

        let conn = self.conn.lock().unwrap();
        conn.execute(
            "UPDATE account SET balance = ?1 WHERE account_no = ?2",
            params![balance, account_no],
        )
        .map_err(|e| StorageError::Other(e.to_string()))?;

        account.balance = balance;
        Ok(())
    }
}
