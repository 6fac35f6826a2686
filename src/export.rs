//! 検索結果のファイル出力

use crate::error::{InterliningError, Result};
use crate::store::xlsx;
use interlining_common::Table;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExportFormat {
    Excel,
    Json,
}

impl ExportFormat {
    /// 拡張子から判定（拡張子なしはExcel）
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()).map(str::to_lowercase).as_deref() {
            None | Some("xlsx") => Ok(ExportFormat::Excel),
            Some("json") => Ok(ExportFormat::Json),
            Some(other) => Err(InterliningError::Config(format!(
                "未対応の出力形式: .{}（.xlsx または .json を指定してください）",
                other
            ))),
        }
    }
}

pub fn export_table(table: &Table, output: &Path) -> Result<()> {
    match ExportFormat::from_path(output)? {
        ExportFormat::Excel => xlsx::write_table(output, table),
        ExportFormat::Json => {
            let json = serde_json::to_string_pretty(table)?;
            std::fs::write(output, json).map_err(|e| InterliningError::io_at(output, e))
        }
    }
}
