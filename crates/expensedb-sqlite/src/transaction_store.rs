use std::sync::{Arc, Mutex, RwLock};

use rusqlite::{params, Connection};

use expensedb_core::{ExpenseType, StorageError, Transaction, TransactionStore};

use crate::{dates, schema};

fn expense_type_to_str(t: ExpenseType) -> &'static str {
    match t {
        ExpenseType::Expense => "EXPENSE",
        ExpenseType::Income => "INCOME",
    }
}

fn str_to_expense_type(s: &str) -> Result<ExpenseType, StorageError> {
    match s {
        "EXPENSE" => Ok(ExpenseType::Expense),
        "INCOME" => Ok(ExpenseType::Income),
        _ => Err(StorageError::MalformedType(s.to_string())),
    }
}

/// Append-mostly transaction log backed by the `log` table, mirrored in
/// insertion order. Entries are never updated or deleted.
pub struct SqliteTransactionStore {
    conn: Mutex<Connection>,
    transactions: RwLock<Vec<Transaction>>,
}

impl SqliteTransactionStore {
    /// Opens the store and hydrates the mirror with a full scan of `log`
    /// in storage order. A row with an unreadable date or type tag fails
    /// construction entirely.
    pub fn open(path: &str) -> Result<Self, StorageError> {
        let conn = schema::open(path)?;
        let transactions = Self::hydrate(&conn)?;
        tracing::debug!(count = transactions.len(), "transaction log hydrated");

        Ok(Self {
            conn: Mutex::new(conn),
            transactions: RwLock::new(transactions),
        })
    }

    fn hydrate(conn: &Connection) -> Result<Vec<Transaction>, StorageError> {
        let mut stmt = conn
            .prepare("SELECT account_no, date, type, amount FROM log ORDER BY id")
            .map_err(|e| StorageError::Other(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                let account_no: Option<String> = row.get(0)?;
                let date: String = row.get(1)?;
                let expense_type: String = row.get(2)?;
                let amount: f64 = row.get(3)?;
                Ok((account_no, date, expense_type, amount))
            })
            .map_err(|e| StorageError::Other(e.to_string()))?;

        let mut transactions = Vec::new();
        for row in rows {
            let (account_no, date, expense_type, amount) =
                row.map_err(|e| StorageError::Other(e.to_string()))?;
            transactions.push(Transaction {
                date: dates::str_to_date(&date)?,
                account_no: Arc::from(account_no.unwrap_or_default().as_str()),
                expense_type: str_to_expense_type(&expense_type)?,
                amount,
            });
        }
        Ok(transactions)
    }
}

impl TransactionStore for SqliteTransactionStore {
    fn log_transaction(&self, transaction: Transaction) -> Result<(), StorageError> {
        let mut transactions = self.transactions.write().unwrap();

        // Row first; the mirror is only appended once the insert is durable
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO log (account_no, date, type, amount) VALUES (?1, ?2, ?3, ?4)",
            params![
                transaction.account_no.as_ref(),
                dates::date_to_str(transaction.date),
                expense_type_to_str(transaction.expense_type),
                transaction.amount
            ],
        )
        .map_err(|e| StorageError::Other(e.to_string()))?;

        transactions.push(transaction);
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

#[cfg(test)]
mod tests {
    use super::*;
    use time::{Date, Month};

    fn entry(no: &str, day: u8, t: ExpenseType, amount: f64) -> Transaction {
        Transaction {
            date: Date::from_calendar_date(2023, Month::June, day).unwrap(),
            account_no: Arc::from(no),
            expense_type: t,
            amount,
        }
    }

    #[test]
    fn test_log_preserves_insertion_order() {
        let store = SqliteTransactionStore::open(":memory:").unwrap();
        store
            .log_transaction(entry("AC100", 1, ExpenseType::Income, 100.0))
            .unwrap();
        store
            .log_transaction(entry("AC100", 2, ExpenseType::Expense, 40.0))
            .unwrap();
        store
            .log_transaction(entry("AC200", 3, ExpenseType::Expense, 5.0))
            .unwrap();

        let all = store.get_all_transactions();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].amount, 100.0);
        assert_eq!(all[2].account_no.as_ref(), "AC200");
    }

    #[test]
    fn test_no_account_validation() {
        let store = SqliteTransactionStore::open(":memory:").unwrap();
        // The referenced account was never created
        let result = store.log_transaction(entry("GHOST", 1, ExpenseType::Expense, 1.0));
        assert!(result.is_ok());
    }

    #[test]
    fn test_paginated_tail() {
        let store = SqliteTransactionStore::open(":memory:").unwrap();
        for day in 1..=3 {
            store
                .log_transaction(entry("AC100", day, ExpenseType::Expense, day as f64))
                .unwrap();
        }

        let tail = store.get_paginated_transactions(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].amount, 2.0);
        assert_eq!(tail[1].amount, 3.0);

        assert_eq!(
            store.get_paginated_transactions(3),
            store.get_all_transactions()
        );
        assert!(store.get_paginated_transactions(0).is_empty());
    }

    #[test]
    fn test_malformed_date_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expense.sqlite");
        let path = path.to_str().unwrap();

        {
            let conn = schema::open(path).unwrap();
            conn.execute(
                "INSERT INTO log (account_no, date, type, amount) VALUES ('AC1', 'not-a-date', 'EXPENSE', 5.0)",
                [],
            )
            .unwrap();
        }

        let result = SqliteTransactionStore::open(path);
        assert!(matches!(result, Err(StorageError::MalformedDate(_))));
    }

    #[test]
    fn test_malformed_type_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expense.sqlite");
        let path = path.to_str().unwrap();

        {
            let conn = schema::open(path).unwrap();
            conn.execute(
                "INSERT INTO log (account_no, date, type, amount) VALUES ('AC1', '01-01-2023', 'REFUND', 5.0)",
                [],
            )
            .unwrap();
        }

        let result = SqliteTransactionStore::open(path);
        assert!(matches!(result, Err(StorageError::MalformedType(_))));
    }

    #[test]
    fn test_stored_date_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("expense.sqlite");
        let path = path.to_str().unwrap();

        let date = Date::from_calendar_date(2024, Month::February, 29).unwrap();
        {
            let store = SqliteTransactionStore::open(path).unwrap();
            store
                .log_transaction(Transaction {
                    date,
                    account_no: Arc::from("AC100"),
                    expense_type: ExpenseType::Income,
                    amount: 12.5,
                })
                .unwrap();
        }

        let reopened = SqliteTransactionStore::open(path).unwrap();
        let all = reopened.get_all_transactions();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].date, date);
        assert_eq!(all[0].expense_type, ExpenseType::Income);
        assert_eq!(all[0].amount, 12.5);
    }
}
