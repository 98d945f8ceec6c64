use thiserror::Error;

use super::BookStatus;

/// 入力値のバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 書名が空
    #[error("Title cannot be empty")]
    EmptyTitle,

    /// 著者名が空
    #[error("Author cannot be empty")]
    EmptyAuthor,

    /// 出版年が範囲外
    #[error("Invalid year {year}. Please enter a year between 1 and {current_year}")]
    YearOutOfRange { year: i32, current_year: i32 },

    /// 未知の状態
    #[error("Invalid status '{0}'. Expected 'available' or 'borrowed'")]
    UnknownStatus(String),

    /// 未知の検索条件
    #[error("Invalid search criterion '{0}'. Expected 'title', 'author' or 'year'")]
    UnknownCriterion(String),
}

/// 書籍登録のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddBookError {
    /// 入力値が不正
    Invalid(ValidationError),
    /// 書名・著者・出版年が同じ書籍が既に存在する
    Duplicate,
    /// 既存の最大IDがu64の上限で、次のIDを払い出せない
    IdSpaceExhausted,
}

impl From<ValidationError> for AddBookError {
    fn from(err: ValidationError) -> Self {
        AddBookError::Invalid(err)
    }
}

/// 状態変更のエラー
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeStatusError {
    /// 既に指定の状態になっている
    AlreadyInStatus(BookStatus),
}
