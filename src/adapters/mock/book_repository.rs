use crate::domain::Book;
use crate::ports::book_repository::{BookRepository as BookRepositoryTrait, RepositoryError, Result};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// インメモリリポジトリが返す保存先
pub const MEMORY_LOCATION: &str = ":memory:";

/// `load`で再現する読み込み失敗の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailure {
    /// バッキングファイルが存在しない
    Missing,
    /// 形式の不正なレコードが含まれる
    Malformed,
    /// 読み込み時のI/Oエラー
    Io,
}

/// BookRepositoryのモック実装
///
/// 保存されたカタログをメモリ上に保持し、保存回数を数える。
/// 変更のない操作で保存されないことをテストで確認できる。
/// 読み込み・保存の失敗を注入可能。
pub struct BookRepository {
    location: PathBuf,
    books: Mutex<Vec<Book>>,
    save_count: Mutex<usize>,
    load_failure: Mutex<Option<LoadFailure>>,
    fail_saves: Mutex<bool>,
}

impl BookRepository {
    pub fn new() -> Self {
        Self::with_books(Vec::new())
    }

    /// 保存済みのカタログを持った状態で生成
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            location: PathBuf::from(MEMORY_LOCATION),
            books: Mutex::new(books),
            save_count: Mutex::new(0),
            load_failure: Mutex::new(None),
            fail_saves: Mutex::new(false),
        }
    }

    /// 以降の読み込みをすべて失敗させる
    pub fn fail_loads_with(&self, failure: LoadFailure) {
        *self.load_failure.lock().unwrap() = Some(failure);
    }

    /// 以降の保存を失敗させる（falseで元に戻す）
    pub fn set_fail_saves(&self, fail: bool) {
        *self.fail_saves.lock().unwrap() = fail;
    }

    /// 成功した保存の回数
    pub fn save_count(&self) -> usize {
        *self.save_count.lock().unwrap()
    }

    /// 最後に保存されたカタログ
    pub fn saved_books(&self) -> Vec<Book> {
        self.books.lock().unwrap().clone()
    }
}

impl Default for BookRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl BookRepositoryTrait for BookRepository {
    fn load(&self) -> Result<Vec<Book>> {
        match *self.load_failure.lock().unwrap() {
            None => Ok(self.books.lock().unwrap().clone()),
            Some(LoadFailure::Missing) => Err(RepositoryError::NotFound(self.location.clone())),
            Some(LoadFailure::Malformed) => Err(RepositoryError::MalformedRecord(
                serde::de::Error::custom("missing field `author`"),
            )),
            Some(LoadFailure::Io) => Err(RepositoryError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            ))),
        }
    }

    fn save(&self, books: &[Book]) -> Result<()> {
        if *self.fail_saves.lock().unwrap() {
            return Err(RepositoryError::Io(io::Error::other("disk full")));
        }
        *self.books.lock().unwrap() = books.to_vec();
        *self.save_count.lock().unwrap() += 1;
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.location
    }
}
