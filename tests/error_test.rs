//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use interlining::common::{self, FilterError};
use interlining::error::InterliningError;
use interlining::store::{SaveOutcome, Store};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 権限エラーは専用の型に分類される
#[test]
fn test_permission_denied_is_classified() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
    let err = InterliningError::io_at(Path::new("Interlining_Data.xlsx"), io_err);

    assert!(matches!(err, InterliningError::PermissionDenied(_)));
    let display = format!("{}", err);
    assert!(display.contains("Interlining_Data.xlsx"));
    assert!(display.contains("他のプログラム"));
}

/// その他のIOエラーはそのまま
#[test]
fn test_other_io_error_is_kept() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err = InterliningError::io_at(Path::new("x.xlsx"), io_err);

    assert!(matches!(err, InterliningError::Io(_)));
    assert!(format!("{}", err).contains("file not found"));
}

/// 台帳パスがディレクトリの場合、追記は失敗を返す（パニックしない）
#[test]
fn test_append_to_directory_fails() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut store = Store::open(dir.path());

    let record = common::Record::new().with("Customer", "Acme").unwrap();
    let outcome = store.append(&record);
    assert!(matches!(outcome, SaveOutcome::Failed(_)));
    assert!(outcome.message().starts_with("Error saving data:"));
}

/// 読み取り専用の台帳への追記は失敗し、ファイルは変わらない
#[test]
fn test_append_to_read_only_file_fails() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.xlsx");
    let mut store = Store::open(&path);
    let first = common::Record::new().with("Customer", "Acme").unwrap();
    assert_eq!(store.append(&first), SaveOutcome::Saved);

    let mut permissions = std::fs::metadata(&path).unwrap().permissions();
    permissions.set_readonly(true);
    std::fs::set_permissions(&path, permissions).unwrap();
    let before = std::fs::read(&path).unwrap();

    let second = common::Record::new().with("Customer", "Globex").unwrap();
    let outcome = store.append(&second);
    assert!(matches!(outcome, SaveOutcome::Failed(_)), "{:?}", outcome);
    assert!(outcome.message().contains("他のプログラム"));

    assert_eq!(std::fs::read(&path).unwrap(), before);
    assert_eq!(store.reload().unwrap().len(), 1);
}

/// InterliningErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        InterliningError::Schema {
            path: PathBuf::from("data.xlsx"),
            detail: "missing columns: Flap".to_string(),
        },
        InterliningError::Spreadsheet("zip error".to_string()),
        InterliningError::PermissionDenied(PathBuf::from("data.xlsx")),
        InterliningError::Config("no home".to_string()),
        InterliningError::Form("interrupted".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 検索条件エラーの変換
#[test]
fn test_filter_error_conversion() {
    let err: InterliningError = FilterError::InvalidNumber {
        field: "GSM".to_string(),
        value: "heavy".to_string(),
    }
    .into();

    assert!(matches!(err, InterliningError::Filter(_)));
    assert!(format!("{}", err).contains("GSM"));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_transparent() {
    let common_err = common::Error::InvalidRecord("GSM は 9 以上で入力してください（入力値 3）".to_string());
    let err: InterliningError = common_err.into();

    assert!(matches!(err, InterliningError::Common(_)));
    assert_eq!(format!("{}", err), "レコードが不正: GSM は 9 以上で入力してください（入力値 3）");
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: InterliningError = json_err.into();

    assert!(matches!(err, InterliningError::Json(_)));
}
