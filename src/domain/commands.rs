use serde::{Deserialize, Serialize};

/// コマンド：書籍を登録する
///
/// 値は未検証のまま受け取り、ドメイン関数側で値オブジェクトに変換する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddBook {
    pub title: String,
    pub author: String,
    pub year: i32,
}

impl AddBook {
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
        }
    }
}
