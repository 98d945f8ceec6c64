use thiserror::Error;

use crate::domain::{BookId, BookStatus, ValidationError};

/// カタログ管理アプリケーション層のエラー
///
/// いずれも想定内の業務上の結果であり、プロセスを終了させる障害ではない。
/// 永続化の失敗はここには含めず、ストアの`is_persisted()`で通知する。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// 書名・著者・出版年が同じ書籍が既に存在する
    #[error("A book with the same title, author and year already exists")]
    DuplicateBook,

    /// 指定IDの書籍が存在しない
    #[error("No book found with ID {0}")]
    BookNotFound(BookId),

    /// 最大IDが上限に達しており、新しいIDを払い出せない
    #[error("No book ID is left to assign")]
    IdSpaceExhausted,

    /// カタログが空
    #[error("No books in the library")]
    EmptyLibrary,

    /// 既に指定の状態になっている（変更なし）
    #[error("The book is already '{0}'")]
    StatusUnchanged(BookStatus),

    /// 入力値が不正
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, CatalogError>;
