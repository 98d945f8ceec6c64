use crate::application::catalog::CatalogStore;
use crate::domain::{BookId, BookStatus, PublicationYear, SearchCriterion};
use chrono::{Datelike, Local};
use std::io::{BufRead, Write};
use tracing::warn;

use super::{commands, error::CliError};

/// 対話メニューを実行する
///
/// 「6」または入力の終端で終了する。
/// 業務エラー（重複・存在しないIDなど）は表示してメニューに戻る。
pub fn run<R: BufRead, W: Write>(
    store: &mut CatalogStore,
    input: R,
    output: W,
) -> Result<(), CliError> {
    let mut menu = Menu {
        store,
        input,
        output,
        current_year: Local::now().year(),
    };

    match menu.run_loop() {
        Err(CliError::EndOfInput) => {
            writeln!(menu.output)?;
            Ok(())
        }
        other => other,
    }
}

struct Menu<'a, R, W> {
    store: &'a mut CatalogStore,
    input: R,
    output: W,
    current_year: i32,
}

impl<R: BufRead, W: Write> Menu<'_, R, W> {
    fn run_loop(&mut self) -> Result<(), CliError> {
        loop {
            writeln!(self.output, "\nLibrary Management System")?;
            writeln!(self.output, "1. Add book")?;
            writeln!(self.output, "2. Delete book")?;
            writeln!(self.output, "3. Search books")?;
            writeln!(self.output, "4. Display all books")?;
            writeln!(self.output, "5. Change book status")?;
            writeln!(self.output, "6. Exit")?;

            let choice = self.prompt("Enter your choice (1-6): ")?;
            let outcome = match choice.as_str() {
                "1" => self.add_book(),
                "2" => self.delete_book(),
                "3" => self.search_books(),
                "4" => commands::list_books(self.store, &mut self.output),
                "5" => self.change_status(),
                "6" => {
                    writeln!(self.output, "Exiting the library management system. Goodbye!")?;
                    return Ok(());
                }
                _ => {
                    writeln!(
                        self.output,
                        "Invalid choice. Please enter a number between 1 and 6."
                    )?;
                    warn!(choice = %choice, "Invalid menu selection");
                    Ok(())
                }
            };

            match outcome {
                Ok(()) => {}
                Err(CliError::Catalog(e)) => writeln!(self.output, "{e}.")?,
                Err(CliError::NotPersisted(path)) => writeln!(
                    self.output,
                    "Warning: changes could not be saved to {}.",
                    path.display()
                )?,
                Err(e) => return Err(e),
            }
        }
    }

    fn add_book(&mut self) -> Result<(), CliError> {
        let title = self.prompt_non_empty("Enter book title: ")?;
        let author = self.prompt_non_empty("Enter book author: ")?;
        let year = self.prompt_year()?;
        commands::add_book(self.store, &title, &author, year, &mut self.output)
    }

    fn delete_book(&mut self) -> Result<(), CliError> {
        self.store.ensure_not_empty()?;
        let book_id = self.prompt_id()?;
        commands::delete_book(self.store, book_id, &mut self.output)
    }

    fn search_books(&mut self) -> Result<(), CliError> {
        self.store.ensure_not_empty()?;
        let criterion = self.prompt_criterion()?;
        let query = self
            .prompt_non_empty(&format!("Enter {criterion}: "))?
            .to_lowercase();
        commands::search_books(self.store, criterion, &query, &mut self.output)
    }

    fn change_status(&mut self) -> Result<(), CliError> {
        self.store.ensure_not_empty()?;
        let book_id = self.prompt_id()?;
        let status = self.prompt_status()?;
        commands::change_status(self.store, book_id, status, &mut self.output)
    }

    // ------------------------------------------------------------------------
    // 入力ヘルパー：正しい値が入力されるまで繰り返し尋ねる
    // ------------------------------------------------------------------------

    fn prompt(&mut self, message: &str) -> Result<String, CliError> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CliError::EndOfInput);
        }
        Ok(line.trim().to_string())
    }

    fn prompt_non_empty(&mut self, message: &str) -> Result<String, CliError> {
        loop {
            let value = self.prompt(message)?;
            if !value.is_empty() {
                return Ok(value);
            }
            writeln!(self.output, "Input cannot be empty. Please try again.")?;
            warn!("Empty input entered for a required field");
        }
    }

    fn prompt_year(&mut self) -> Result<i32, CliError> {
        loop {
            let value = self.prompt("Enter year of publication: ")?;
            match value.parse::<i32>() {
                Ok(year) => match PublicationYear::new(year, self.current_year) {
                    Ok(valid) => return Ok(valid.value()),
                    Err(e) => {
                        writeln!(self.output, "{e}.")?;
                        warn!(year = year, "Invalid year entered");
                    }
                },
                Err(_) => {
                    writeln!(self.output, "Invalid input. Please enter a numeric year.")?;
                    warn!("Non-numeric input entered for year");
                }
            }
        }
    }

    fn prompt_id(&mut self) -> Result<BookId, CliError> {
        loop {
            let value = self.prompt("Enter the ID of the book: ")?;
            match value.parse::<u64>() {
                Ok(id) if self.store.find_by_id(BookId::new(id)).is_some() => {
                    return Ok(BookId::new(id));
                }
                Ok(id) => {
                    writeln!(self.output, "No book found with ID {id}. Please try again.")?;
                    warn!(book_id = id, "Invalid book ID entered");
                }
                Err(_) => {
                    writeln!(self.output, "Invalid input. Please enter a numeric ID.")?;
                    warn!("Non-numeric input entered for book ID");
                }
            }
        }
    }

    fn prompt_status(&mut self) -> Result<BookStatus, CliError> {
        loop {
            writeln!(self.output, "\nStatus Options:")?;
            writeln!(self.output, "1. Available")?;
            writeln!(self.output, "2. Borrowed")?;
            let choice = self.prompt("Enter your choice (1 or 2): ")?;
            match choice.as_str() {
                "1" => return Ok(BookStatus::Available),
                "2" => return Ok(BookStatus::Borrowed),
                _ => {
                    writeln!(self.output, "Invalid choice. Please enter 1 or 2.")?;
                    warn!(choice = %choice, "Invalid status choice entered");
                }
            }
        }
    }

    fn prompt_criterion(&mut self) -> Result<SearchCriterion, CliError> {
        loop {
            writeln!(self.output, "\nSearch Options:")?;
            writeln!(self.output, "1. Title")?;
            writeln!(self.output, "2. Author")?;
            writeln!(self.output, "3. Year")?;
            let choice = self.prompt("Enter your choice (1-3): ")?;
            match choice.as_str() {
                "1" => return Ok(SearchCriterion::Title),
                "2" => return Ok(SearchCriterion::Author),
                "3" => return Ok(SearchCriterion::Year),
                _ => {
                    writeln!(
                        self.output,
                        "Invalid choice. Please enter a number between 1 and 3."
                    )?;
                    warn!(choice = %choice, "Invalid search choice entered");
                }
            }
        }
    }
}
