use crate::adapters::json::JsonBookRepository;
use crate::domain::{
    self, AddBook, AddBookError, Book, BookDeleted, BookId, BookStatus, ChangeStatusError,
    DomainEvent, SearchCriterion,
};
use crate::ports::{BookRepository, RepositoryError};
use chrono::{Datelike, Local};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::errors::{CatalogError, Result};

/// カタログストア
///
/// 書籍コレクションを排他的に所有し、変更のたびにリポジトリへ全体を保存する。
///
/// - 生成時に一度だけ読み込む。読み込みの失敗はすべて空のカタログに縮退する
/// - 追加・削除・状態変更は成功するたびに同期的に保存する
/// - 保存の失敗はログに残し、メモリ上の状態はそのまま保持する
///
/// シングルスレッド前提のため内部でロックは取らない。変更系は`&mut self`。
pub struct CatalogStore {
    repository: Arc<dyn BookRepository>,
    books: Vec<Book>,
    persisted: bool,
}

impl CatalogStore {
    /// JSONファイルをバッキングファイルとしてストアを開く
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(JsonBookRepository::new(path)))
    }

    /// 任意のリポジトリでストアを生成し、カタログを読み込む
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        let books = load_books(repository.as_ref());
        Self {
            repository,
            books,
            persisted: true,
        }
    }

    /// バッキングファイルの場所
    pub fn path(&self) -> &Path {
        self.repository.location()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// 直近の保存が成功しているか
    ///
    /// falseの場合、メモリ上の状態がまだ永続化されていない。
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    /// カタログ全体を保存する
    ///
    /// 失敗してもエラーは返さず、ログに残して`false`を返す。
    pub fn save(&mut self) -> bool {
        match self.repository.save(&self.books) {
            Ok(()) => {
                debug!(path = %self.path().display(), count = self.books.len(), "Saved books");
                self.persisted = true;
            }
            Err(e) => {
                error!(path = %self.path().display(), error = %e, "Unable to save books");
                self.persisted = false;
            }
        }
        self.persisted
    }

    /// 書籍を登録する
    ///
    /// ビジネスルール：
    /// - 書名・著者名は空でないこと、0 < 出版年 <= 現在の暦年
    /// - 書名・著者名（大文字小文字無視）と出版年がすべて一致する書籍がないこと
    /// - IDは既存の最大値+1（空なら1）、状態はAvailable
    ///
    /// # エラー
    /// - InvalidInput: 入力値が不正（変更・保存なし）
    /// - DuplicateBook: 重複（変更・保存なし）
    pub fn add_book(&mut self, title: &str, author: &str, year: i32) -> Result<Book> {
        let cmd = AddBook::new(title, author, year);
        let current_year = Local::now().year();

        let (book, event) =
            domain::catalog::add_book(&self.books, cmd, current_year).map_err(|e| match e {
                AddBookError::Invalid(reason) => {
                    warn!(error = %reason, "Invalid book rejected");
                    CatalogError::InvalidInput(reason)
                }
                AddBookError::Duplicate => {
                    warn!(
                        title = title,
                        author = author,
                        year = year,
                        "Duplicate book entry attempted"
                    );
                    CatalogError::DuplicateBook
                }
                AddBookError::IdSpaceExhausted => {
                    error!("No book ID left to assign, the highest ID is already at the limit");
                    CatalogError::IdSpaceExhausted
                }
            })?;

        self.books.push(book.clone());
        record_event(&DomainEvent::BookAdded(event));
        self.save();

        Ok(book)
    }

    /// 書籍を削除する
    ///
    /// # エラー
    /// - EmptyLibrary: カタログが空
    /// - BookNotFound: 指定IDの書籍がない
    pub fn delete_book(&mut self, book_id: BookId) -> Result<Book> {
        self.ensure_not_empty()?;
        let index = self.index_of(book_id)?;

        let book = self.books.remove(index);
        record_event(&DomainEvent::BookDeleted(BookDeleted {
            book_id,
            title: book.title().clone(),
        }));
        self.save();

        Ok(book)
    }

    /// 書籍の状態を変更する
    ///
    /// 既に同じ状態の場合は何も変更せず、保存もしない。
    ///
    /// # エラー
    /// - EmptyLibrary: カタログが空
    /// - BookNotFound: 指定IDの書籍がない
    /// - StatusUnchanged: 既に指定の状態
    pub fn change_status(&mut self, book_id: BookId, new_status: BookStatus) -> Result<Book> {
        self.ensure_not_empty()?;
        let index = self.index_of(book_id)?;

        let (updated, event) = domain::catalog::change_status(&self.books[index], new_status)
            .map_err(|e| match e {
                ChangeStatusError::AlreadyInStatus(status) => {
                    info!(
                        book_id = %book_id,
                        status = %status,
                        "Status update skipped, book already has this status"
                    );
                    CatalogError::StatusUnchanged(status)
                }
            })?;

        self.books[index] = updated.clone();
        record_event(&DomainEvent::BookStatusChanged(event));
        self.save();

        Ok(updated)
    }

    /// IDで書籍を取得する
    pub fn find_by_id(&self, book_id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id() == book_id)
    }

    /// 条件で書籍を検索する
    ///
    /// クエリは前後の空白を除いて小文字化してから比較する。
    /// 一致なし・カタログが空の場合も空のVecを返す（エラーではない）。
    pub fn filter(&self, criterion: SearchCriterion, query: &str) -> Vec<&Book> {
        if self.books.is_empty() {
            notice_empty_library();
            return Vec::new();
        }

        let query = query.trim().to_lowercase();
        let found = domain::catalog::filter_books(&self.books, criterion, &query);
        if found.is_empty() {
            info!(
                criterion = %criterion,
                query = %query,
                "No books matched the search"
            );
        }
        found
    }

    /// 全書籍を登録順で返す
    pub fn list_all(&self) -> &[Book] {
        if self.books.is_empty() {
            notice_empty_library();
        }
        &self.books
    }

    /// カタログが空なら`EmptyLibrary`を返す
    ///
    /// 対話入力の前に空かどうかを確かめるために呼び出し側からも使う。
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.books.is_empty() {
            notice_empty_library();
            return Err(CatalogError::EmptyLibrary);
        }
        Ok(())
    }

    fn index_of(&self, book_id: BookId) -> Result<usize> {
        domain::catalog::position_of(&self.books, book_id).ok_or_else(|| {
            warn!(book_id = %book_id, "Book ID not found");
            CatalogError::BookNotFound(book_id)
        })
    }
}

/// リポジトリから読み込み、失敗時は空のカタログに縮退する
///
/// 壊れたファイルは上書きせずに残す（次に保存が成功するまで）。
fn load_books(repository: &dyn BookRepository) -> Vec<Book> {
    let path = repository.location().display().to_string();
    match repository.load() {
        Ok(books) => {
            debug!(path = %path, count = books.len(), "Loaded books");
            books
        }
        Err(RepositoryError::NotFound(_)) => {
            warn!(path = %path, "Backing file not found. A new file will be created");
            Vec::new()
        }
        Err(e @ (RepositoryError::Corrupt(_) | RepositoryError::MalformedRecord(_))) => {
            error!(
                path = %path,
                error = %e,
                "Backing file is corrupted. Starting with an empty library"
            );
            Vec::new()
        }
        Err(e) => {
            error!(path = %path, error = %e, "Unexpected error while loading books");
            Vec::new()
        }
    }
}

fn notice_empty_library() {
    info!("Operation attempted, but the library is empty");
}

fn record_event(event: &DomainEvent) {
    match event {
        DomainEvent::BookAdded(e) => info!(
            book_id = %e.book_id,
            title = %e.title,
            author = %e.author,
            year = %e.year,
            "Book added"
        ),
        DomainEvent::BookDeleted(e) => {
            info!(book_id = %e.book_id, title = %e.title, "Book deleted")
        }
        DomainEvent::BookStatusChanged(e) => info!(
            book_id = %e.book_id,
            from = %e.old_status,
            to = %e.new_status,
            "Book status updated"
        ),
    }
}
