use serde::{Deserialize, Serialize};

use super::{Author, BookId, BookStatus, PublicationYear, Title};

/// イベント：書籍が登録された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookAdded {
    pub book_id: BookId,
    pub title: Title,
    pub author: Author,
    pub year: PublicationYear,
}

/// イベント：書籍が削除された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDeleted {
    pub book_id: BookId,
    pub title: Title,
}

/// イベント：書籍の状態が変更された
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookStatusChanged {
    pub book_id: BookId,
    pub old_status: BookStatus,
    pub new_status: BookStatus,
}

/// ドメインイベント統合型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DomainEvent {
    BookAdded(BookAdded),
    BookDeleted(BookDeleted),
    BookStatusChanged(BookStatusChanged),
}
