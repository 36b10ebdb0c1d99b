use thiserror::Error;

// エラー型を定義
#[derive(Debug, Error)]
pub enum PathError {
    #[error("無効なパスです: {0}")]
    InvalidPath(String),

    /// ディレクトリ走査中に発生したエラー。
    #[error("ディレクトリ走査エラー: {0}")]
    Walk(#[from] walkdir::Error),
}
