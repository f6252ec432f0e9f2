use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use time::{Date, Month};

use expensedb::{
    Account, AccountStore, ExpenseType, InMemoryAccountStore, InMemoryTransactionStore,
    Transaction, TransactionStore,
};

fn seed_log(store: &InMemoryTransactionStore, entries: usize) {
    let date = Date::from_calendar_date(2023, Month::January, 1).unwrap();
    for i in 0..entries {
        store
            .log_transaction(Transaction {
                date,
                account_no: Arc::from(format!("AC{}", i % 10).as_str()),
                expense_type: if i % 2 == 0 {
                    ExpenseType::Expense
                } else {
                    ExpenseType::Income
                },
                amount: 10.0,
            })
            .unwrap();
    }
}

fn bench_update_balance(c: &mut Criterion) {
    let store = InMemoryAccountStore::new();
    store
        .add_account(Account {
            account_no: Arc::from("AC100"),
            bank_name: "BankX".to_string(),
            holder_name: "Alice".to_string(),
            balance: 0.0,
        })
        .unwrap();

    c.bench_function("update_balance", |b| {
        b.iter(|| {
            store
                .update_balance(black_box("AC100"), ExpenseType::Income, 1.0)
                .unwrap()
        })
    });
}

fn bench_paginated_tail(c: &mut Criterion) {
    let store = InMemoryTransactionStore::new();
    seed_log(&store, 10_000);

    c.bench_function("get_paginated_transactions", |b| {
        b.iter(|| black_box(store.get_paginated_transactions(black_box(50))))
    });
}

criterion_group!(benches, bench_update_balance, bench_paginated_tail);
criterion_main!(benches);
