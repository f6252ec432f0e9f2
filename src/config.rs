use clap::{Parser, Subcommand};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(name = "expensedb", about = "ExpenseDB - local expense tracking data store")]
pub struct CliArgs {
    /// Path to config file
    #[arg(short, long, default_value = "expensedb.toml")]
    pub config: String,

    /// Database file (overrides config file)
    #[arg(short, long)]
    pub db: Option<String>,

    /// Log level (overrides config file)
    #[arg(short, long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new account
    AddAccount {
        account_no: String,
        bank: String,
        holder: String,
        #[arg(default_value_t = 0.0)]
        balance: f64,
    },
    /// Delete an account
    RemoveAccount { account_no: String },
    /// List all accounts
    Accounts,
    /// Show one account's balance
    Balance { account_no: String },
    /// Record an expense or income against an account
    Record {
        account_no: String,
        /// Date in dd-MM-yyyy form
        date: String,
        /// "expense" or "income"
        kind: String,
        amount: f64,
    },
    /// Show the transaction log, most recent last
    Transactions {
        /// Only the most recent N entries
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_storage")]
    pub storage: StorageConfig,

    #[serde(default = "default_logging")]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,
}

fn default_storage() -> StorageConfig {
    StorageConfig {
        path: default_db_path(),
    }
}

fn default_logging() -> LoggingConfig {
    LoggingConfig {
        level: default_log_level(),
        json: false,
    }
}

fn default_db_path() -> String {
    "expense_manager.sqlite".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            storage: default_storage(),
            logging: default_logging(),
        }
    }
}

impl Config {
    pub fn load(cli: &CliArgs) -> Self {
        let mut config = match std::fs::read_to_string(&cli.config) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse config file: {}", e);
                Config::default()
            }),
            Err(_) => Config::default(),
        };

        // CLI overrides
        if let Some(ref db) = cli.db {
            config.storage.path = db.clone();
        }
        if let Some(ref level) = cli.log_level {
            config.logging.level = level.clone();
        }

        config
    }
}
