use crate::application::catalog::{CatalogError, CatalogStore};
use crate::domain::{BookId, BookStatus, SearchCriterion};
use std::io::Write;

use super::{error::CliError, table::render_books};

// ============================================================================
// ワンショットコマンドのハンドラー
// ============================================================================

/// 書籍を登録して結果を表示する
pub fn add_book(
    store: &mut CatalogStore,
    title: &str,
    author: &str,
    year: i32,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let book = store.add_book(title, author, year)?;
    writeln!(
        out,
        "Book '{}' added successfully with ID {}.",
        book.title(),
        book.id()
    )?;
    ensure_persisted(store)
}

/// 書籍を削除して結果を表示する
pub fn delete_book(
    store: &mut CatalogStore,
    book_id: BookId,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    match store.delete_book(book_id) {
        Ok(book) => writeln!(out, "Book ID {} deleted successfully.", book.id())?,
        Err(CatalogError::EmptyLibrary) => return report_empty_library(out),
        Err(e) => return Err(e.into()),
    }
    ensure_persisted(store)
}

/// 書籍の状態を変更して結果を表示する
///
/// 状態が変わらない場合はその旨を表示するだけで成功扱い。
pub fn change_status(
    store: &mut CatalogStore,
    book_id: BookId,
    status: BookStatus,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    match store.change_status(book_id, status) {
        Ok(book) => writeln!(
            out,
            "Book ID {} status updated to '{}'.",
            book.id(),
            book.status()
        )?,
        Err(CatalogError::EmptyLibrary) => return report_empty_library(out),
        Err(CatalogError::StatusUnchanged(current)) => {
            writeln!(out, "The book is already '{current}'.")?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }
    ensure_persisted(store)
}

/// 検索結果を表示する
pub fn search_books(
    store: &CatalogStore,
    criterion: SearchCriterion,
    query: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let found = store.filter(criterion, query);
    if found.is_empty() {
        if store.is_empty() {
            return report_empty_library(out);
        }
        writeln!(out, "No matching books found.")?;
        return Ok(());
    }

    writeln!(out, "Found {} book(s):", found.len())?;
    writeln!(out, "{}", render_books(found))?;
    Ok(())
}

/// 全書籍を表示する
pub fn list_books(store: &CatalogStore, out: &mut dyn Write) -> Result<(), CliError> {
    let books = store.list_all();
    if books.is_empty() {
        return report_empty_library(out);
    }

    writeln!(out, "{}", render_books(books))?;
    Ok(())
}

fn report_empty_library(out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "No books in the library.")?;
    Ok(())
}

/// 直近の保存が失敗していればエラーにする
fn ensure_persisted(store: &CatalogStore) -> Result<(), CliError> {
    if store.is_persisted() {
        Ok(())
    } else {
        Err(CliError::NotPersisted(store.path().to_path_buf()))
    }
}
