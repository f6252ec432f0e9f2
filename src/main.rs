use std::process::exit;
use std::sync::Arc;

use clap::Parser;
use prettytable::{row, Table};
use tracing_subscriber::EnvFilter;

use expensedb::config::{CliArgs, Command, Config};
use expensedb::{
    Account, AccountStore, ExpenseManager, ExpenseType, StorageError, TransactionStore,
};
use expensedb_sqlite::dates;

fn main() {
    let cli = CliArgs::parse();
    let config = Config::load(&cli);

    init_logging(&config);

    let manager = match ExpenseManager::open_sqlite(&config.storage.path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Failed to open database {}: {}", config.storage.path, e);
            exit(1);
        }
    };
    tracing::debug!(path = %config.storage.path, "database opened");

    if let Err(e) = run(&manager, cli.command) {
        eprintln!("Error: {}", e);
        exit(1);
    }
}

fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn run(manager: &ExpenseManager, command: Command) -> Result<(), StorageError> {
    match command {
        Command::AddAccount {
            account_no,
            bank,
            holder,
            balance,
        } => {
            manager.accounts().add_account(Account {
                account_no: Arc::from(account_no.as_str()),
                bank_name: bank,
                holder_name: holder,
                balance,
            })?;
            println!("Account {} added.", account_no);
        }
        Command::RemoveAccount { account_no } => {
            manager.accounts().remove_account(&account_no)?;
            println!("Account {} removed.", account_no);
        }
        Command::Accounts => {
            let mut table = Table::new();
            table.add_row(row!["Account", "Bank", "Holder", "Balance"]);
            table.add_empty_row();
            for account in manager.accounts().list_accounts() {
                table.add_row(row![
                    account.account_no,
                    account.bank_name,
                    account.holder_name,
                    format!("{:.2}", account.balance)
                ]);
            }
            println!("{}", table);
        }
        Command::Balance { account_no } => {
            let account = manager.accounts().get_account(&account_no)?;
            println!("{:.2}", account.balance);
        }
        Command::Record {
            account_no,
            date,
            kind,
            amount,
        } => {
            let date = dates::str_to_date(&date)?;
            let kind = parse_expense_type(&kind)?;
            manager.record_transaction(&account_no, date, kind, amount)?;
            let account = manager.accounts().get_account(&account_no)?;
            println!("Recorded. New balance: {:.2}", account.balance);
        }
        Command::Transactions { limit } => {
            let transactions = match limit {
                Some(limit) => manager.transactions().get_paginated_transactions(limit),
                None => manager.transactions().get_all_transactions(),
            };
            let mut table = Table::new();
            table.add_row(row!["Date", "Account", "Type", "Amount"]);
            table.add_empty_row();
            for txn in transactions {
                table.add_row(row![
                    dates::date_to_str(txn.date),
                    txn.account_no,
                    match txn.expense_type {
                        ExpenseType::Expense => "EXPENSE",
                        ExpenseType::Income => "INCOME",
                    },
                    format!("{:.2}", txn.amount)
                ]);
            }
            println!("{}", table);
        }
    }
    Ok(())
}

fn parse_expense_type(s: &str) -> Result<ExpenseType, StorageError> {
    match s.to_ascii_lowercase().as_str() {
        "expense" => Ok(ExpenseType::Expense),
        "income" => Ok(ExpenseType::Income),
        _ => Err(StorageError::MalformedType(s.to_string())),
    }
}
