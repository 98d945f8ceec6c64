use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// 書籍ID - カタログ内で一意な正の整数
///
/// 利用者が指定することはなく、常にカタログ側で採番される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(u64);

impl BookId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// 空のカタログで最初に払い出すID
    pub fn first() -> Self {
        Self(1)
    }

    /// このIDの次のID
    ///
    /// u64の上限に達している場合はNone。
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 書名
///
/// 不変条件：前後の空白を除いて空でないこと
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Title(String);

impl Title {
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 大文字小文字を区別せずに比較する
    pub fn eq_ignore_case(&self, other: &Title) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }

    /// 小文字化済みのクエリを部分文字列として含むか
    pub fn contains_lowercase(&self, query: &str) -> bool {
        self.0.to_lowercase().contains(query)
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 著者名
///
/// 不変条件：前後の空白を除いて空でないこと
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Author(String);

impl Author {
    pub fn new(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyAuthor);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn eq_ignore_case(&self, other: &Author) -> bool {
        self.0.to_lowercase() == other.0.to_lowercase()
    }

    pub fn contains_lowercase(&self, query: &str) -> bool {
        self.0.to_lowercase().contains(query)
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 出版年
///
/// 不変条件（登録時のみ）：0 < year <= 現在の暦年
/// 永続化済みのデータを読み込む際は再検証しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicationYear(i32);

impl PublicationYear {
    /// 登録時のバリデーション付きで生成する
    ///
    /// # エラー
    /// 範囲外の場合は`ValidationError::YearOutOfRange`を返す
    pub fn new(year: i32, current_year: i32) -> Result<Self, ValidationError> {
        if year <= 0 || year > current_year {
            return Err(ValidationError::YearOutOfRange { year, current_year });
        }
        Ok(Self(year))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for PublicationYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 書籍の状態
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    /// 貸出可能
    #[default]
    Available,
    /// 貸出中
    Borrowed,
}

impl BookStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "available",
            BookStatus::Borrowed => "borrowed",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(BookStatus::Available),
            "borrowed" => Ok(BookStatus::Borrowed),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// 検索条件の対象フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchCriterion {
    /// 書名の部分一致
    Title,
    /// 著者名の部分一致
    Author,
    /// 出版年の完全一致
    Year,
}

impl SearchCriterion {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchCriterion::Title => "title",
            SearchCriterion::Author => "author",
            SearchCriterion::Year => "year",
        }
    }
}

impl fmt::Display for SearchCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchCriterion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "title" => Ok(SearchCriterion::Title),
            "author" => Ok(SearchCriterion::Author),
            "year" => Ok(SearchCriterion::Year),
            other => Err(ValidationError::UnknownCriterion(other.to_string())),
        }
    }
}
