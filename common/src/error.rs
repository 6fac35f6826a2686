//! エラー型定義

use thiserror::Error;

/// 検索条件のエラー
///
/// 「該当なし」とは区別して呼び出し側に返す。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("未知の列: {0}")]
    UnknownField(String),

    #[error("{field} は整数で指定してください（入力値 {value:?}）")]
    InvalidNumber { field: String, value: String },
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("検索条件エラー: {0}")]
    Filter(#[from] FilterError),

    #[error("レコードが不正: {0}")]
    InvalidRecord(String),

    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_filter() {
        let error = Error::from(FilterError::UnknownField("Colour".to_string()));
        assert_eq!(format!("{}", error), "検索条件エラー: 未知の列: Colour");
    }

    #[test]
    fn test_error_display_invalid_number() {
        let error = FilterError::InvalidNumber {
            field: "GSM".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(format!("{}", error), "GSM は整数で指定してください（入力値 \"abc\"）");
    }

    #[test]
    fn test_error_from_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: Error = json_error.into();
        assert!(matches!(error, Error::Json(_)));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::InvalidRecord("GSM below minimum".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("InvalidRecord"));
        assert!(debug.contains("GSM"));
    }
}
