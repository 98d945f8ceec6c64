use serde::{Deserialize, Serialize};

use super::{Author, BookId, BookStatus, PublicationYear, Title};

/// Book エンティティ
///
/// 生成は登録操作（`catalog::add_book`）経由のみ。
/// 生成後に変化しうる属性は`status`だけで、変更も新しい値を返す純粋関数で行う。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id: BookId,
    title: Title,
    author: Author,
    year: PublicationYear,
    status: BookStatus,
}

impl Book {
    pub(crate) fn new(id: BookId, title: Title, author: Author, year: PublicationYear) -> Self {
        Self {
            id,
            title,
            author,
            year,
            status: BookStatus::default(),
        }
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn year(&self) -> PublicationYear {
        self.year
    }

    pub fn status(&self) -> BookStatus {
        self.status
    }

    /// 状態だけを差し替えた新しいBookを返す
    pub(crate) fn with_status(&self, status: BookStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// 永続化用のレコードに変換する
    pub fn to_record(&self) -> BookRecord {
        BookRecord {
            id: self.id,
            title: self.title.clone(),
            author: self.author.clone(),
            year: self.year,
            status: self.status,
        }
    }

    /// 永続化済みのレコードから復元する
    ///
    /// 形の検証はレコードのデシリアライズ時に済んでいる。
    /// 出版年などの意味的な検証は登録時のみ行い、ここでは再検証しない。
    pub fn from_record(record: BookRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            author: record.author,
            year: record.year,
            status: record.status,
        }
    }
}

/// 永続化レコード
///
/// バッキングファイル上の1要素。キー名と型はファイル形式そのもの：
/// `id`(整数) `title`(文字列) `author`(文字列) `year`(整数) `status`(文字列)
///
/// キーの欠落や型の不一致はデシリアライズエラーとなる（フィールドごとの型変換はしない）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: BookId,
    pub title: Title,
    pub author: Author,
    pub year: PublicationYear,
    pub status: BookStatus,
}
