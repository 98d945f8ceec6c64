use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::domain::{BookStatus, SearchCriterion};

// ログレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// コマンドライン引数
// 各オプションは環境変数でも指定できる（引数が優先）。
#[derive(Parser, Debug)]
#[command(
    name = "library",
    about = "Manage a small catalog of books stored in a JSON file",
    version
)]
pub struct Cli {
    /// Backing JSON file of the catalog
    #[arg(long, short = 'f', env = "LIBRARY_BOOKS_FILE", default_value = "books.json")]
    pub file: PathBuf,

    /// Log level (RUST_LOG takes precedence when set)
    #[arg(long, env = "LIBRARY_LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Append log lines to this file instead of stderr
    #[arg(long, env = "LIBRARY_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

// サブコマンド。省略時は対話メニューを起動する。
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a new book
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long, allow_negative_numbers = true)]
        year: i32,
    },

    /// Delete a book by ID
    Delete { id: u64 },

    /// Search books by title, author (substring) or year (exact)
    Search {
        /// title, author or year
        criterion: SearchCriterion,
        query: String,
    },

    /// List all books
    List,

    /// Change the status of a book
    Status {
        id: u64,
        /// available or borrowed
        status: BookStatus,
    },

    /// Interactive menu
    Menu,
}
