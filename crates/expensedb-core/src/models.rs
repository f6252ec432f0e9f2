use std::sync::Arc;

use time::Date;

/// Direction of a logged transaction. The stored amount is always a
/// magnitude; this tag carries the sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseType {
    Expense,
    Income,
}

/// A financial account. `account_no` uniquely identifies the account and is
/// immutable once created; only the balance changes over its lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub account_no: Arc<str>,
    pub bank_name: String,
    pub holder_name: String,
    pub balance: f64,
}

/// One entry in the transaction log. Entries are append-only: once logged
/// they are never updated or deleted. `account_no` is a back-reference by
/// value; nothing checks that the account still exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub date: Date,
    pub account_no: Arc<str>,
    pub expense_type: ExpenseType,
    pub amount: f64,
}
