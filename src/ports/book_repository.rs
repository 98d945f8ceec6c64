use crate::domain::Book;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 書籍リポジトリのエラー
///
/// 「ファイルがない」「構文が壊れている」「レコードの形が不正」「I/O障害」を
/// 呼び出し側がパターンマッチで区別できるように分けている。
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// バッキングファイルが存在しない
    #[error("Backing file {} not found", .0.display())]
    NotFound(PathBuf),

    /// JSONとして解釈できない
    #[error("Backing file is corrupted: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// 必須キーの欠落や型の不一致
    #[error("Backing file contains a malformed record: {0}")]
    MalformedRecord(#[source] serde_json::Error),

    /// シリアライズ失敗
    #[error("Failed to encode books: {0}")]
    Encode(#[source] serde_json::Error),

    /// 読み書き時のI/O障害
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;

/// 書籍リポジトリポート
///
/// カタログ全体を一括で読み込み・上書き保存する。
/// 差分更新や追記は行わない。
pub trait BookRepository: Send + Sync {
    /// カタログ全体を読み込む
    ///
    /// 保存時の順序をそのまま返す。
    fn load(&self) -> Result<Vec<Book>>;

    /// カタログ全体を保存する（ファイル全体の置き換え）
    fn save(&self, books: &[Book]) -> Result<()>;

    /// 保存先の場所（ログ出力用）
    fn location(&self) -> &Path;
}
