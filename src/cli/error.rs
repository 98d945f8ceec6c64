use crate::application::catalog::CatalogError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// CLI層のエラー型
///
/// アプリケーション層のエラーをラップし、終了コードへのマッピングを提供する。
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// 変更はメモリ上に残っているが、保存に失敗した
    #[error("Changes could not be saved to {}", .0.display())]
    NotPersisted(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// 対話メニューで入力が終端に達した
    #[error("End of input")]
    EndOfInput,
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            // 情報扱い（カタログが空・状態変更なし）
            CliError::Catalog(CatalogError::EmptyLibrary)
            | CliError::Catalog(CatalogError::StatusUnchanged(_))
            | CliError::EndOfInput => 0,

            // 業務エラー・永続化失敗
            CliError::Catalog(_) | CliError::NotPersisted(_) => 1,

            CliError::Io(_) => 2,
        }
    }
}
