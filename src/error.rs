use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterliningError {
    #[error(transparent)]
    Common(#[from] interlining_common::Error),

    #[error("検索条件エラー: {0}")]
    Filter(#[from] interlining_common::FilterError),

    #[error("列構成が不正: {path}: {detail}")]
    Schema { path: PathBuf, detail: String },

    #[error("Excel読み書きエラー: {0}")]
    Spreadsheet(String),

    #[error("書き込み権限がありません: {0}（他のプログラムで開いていないか確認してください）")]
    PermissionDenied(PathBuf),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("入力エラー: {0}")]
    Form(String),
}

impl From<calamine::XlsxError> for InterliningError {
    fn from(e: calamine::XlsxError) -> Self {
        match e {
            calamine::XlsxError::Io(io) => InterliningError::Io(io),
            other => InterliningError::Spreadsheet(other.to_string()),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for InterliningError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        InterliningError::Spreadsheet(e.to_string())
    }
}

impl From<dialoguer::Error> for InterliningError {
    fn from(e: dialoguer::Error) -> Self {
        InterliningError::Form(e.to_string())
    }
}

impl InterliningError {
    /// ファイルパスを付けてIOエラーを分類（権限エラーは専用の型へ）
    pub fn io_at(path: &std::path::Path, e: std::io::Error) -> Self {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            InterliningError::PermissionDenied(path.to_path_buf())
        } else {
            InterliningError::Io(e)
        }
    }
}

pub type Result<T> = std::result::Result<T, InterliningError>;
