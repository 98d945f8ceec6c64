pub mod args;
pub mod commands;
pub mod error;
pub mod menu;
pub mod table;

pub use args::{Cli, Command, LogLevel};
pub use error::CliError;

use crate::application::catalog::CatalogStore;
use crate::domain::BookId;
use std::io::{BufRead, Write};

/// コマンドを実行する。省略時は対話メニュー。
///
/// `input`を読むのは対話メニューだけ。
pub fn run<R: BufRead, W: Write>(
    store: &mut CatalogStore,
    command: Option<Command>,
    input: R,
    mut output: W,
) -> Result<(), CliError> {
    let out: &mut dyn Write = &mut output;
    match command.unwrap_or(Command::Menu) {
        Command::Menu => menu::run(store, input, out),
        Command::Add {
            title,
            author,
            year,
        } => commands::add_book(store, &title, &author, year, out),
        Command::Delete { id } => commands::delete_book(store, BookId::new(id), out),
        Command::Search { criterion, query } => {
            commands::search_books(store, criterion, &query, out)
        }
        Command::List => commands::list_books(store, out),
        Command::Status { id, status } => {
            commands::change_status(store, BookId::new(id), status, out)
        }
    }
}
