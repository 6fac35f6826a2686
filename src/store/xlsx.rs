//! 台帳Excelの読み書き
//!
//! 読み込みはcalamine、書き込みはrust_xlsxwriter。
//! 書き込みは同じディレクトリの一時ファイルに出力してからリネームする。

use crate::error::{InterliningError, Result};
use calamine::{open_workbook, Data, Reader, Xlsx, XlsxError};
use interlining_common::schema::{self, FieldKind, FieldSpec, FIELDS, FIELD_COUNT};
use interlining_common::{Record, Table, Value};
use rust_xlsxwriter::{Format, FormatBorder, Workbook};
use std::fs::Permissions;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub const SHEET_NAME: &str = "Sheet1";

/// 先頭シートを読み込み、列名（前後空白除去）でスキーマに対応付ける
pub fn read_table(path: &Path) -> Result<Table> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| match e {
        XlsxError::Io(io) => InterliningError::io_at(path, io),
        other => other.into(),
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| schema_error(path, "シートがありません"))??;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| schema_error(path, "見出し行がありません"))?;
    let columns = map_columns(path, header)?;

    let mut table = Table::new();
    for row in rows {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }
        let values = FIELDS
            .iter()
            .zip(&columns)
            .map(|(spec, &col)| cell_value(spec, row.get(col).unwrap_or(&Data::Empty)))
            .collect();
        table.push(Record::from_values(values)?);
    }

    tracing::debug!(path = %path.display(), rows = table.len(), "workbook read");
    Ok(table)
}

/// スキーマ順 → シート上の列番号
fn map_columns(path: &Path, header: &[Data]) -> Result<Vec<usize>> {
    let mut columns: Vec<Option<usize>> = vec![None; FIELD_COUNT];
    let mut unexpected = Vec::new();

    for (col, cell) in header.iter().enumerate() {
        let name = match cell {
            Data::String(s) => s.trim().to_string(),
            Data::Empty => String::new(),
            other => other.to_string().trim().to_string(),
        };
        match schema::index_of(&name) {
            Some(idx) if columns[idx].is_none() => columns[idx] = Some(col),
            Some(_) => unexpected.push(format!("{:?}（重複）", name)),
            None => unexpected.push(format!("{:?}", name)),
        }
    }

    let missing: Vec<&str> = FIELDS
        .iter()
        .zip(&columns)
        .filter(|(_, col)| col.is_none())
        .map(|(spec, _)| spec.name)
        .collect();

    if !missing.is_empty() || !unexpected.is_empty() {
        let mut detail = Vec::new();
        if !missing.is_empty() {
            detail.push(format!("不足している列: {}", missing.join(", ")));
        }
        if !unexpected.is_empty() {
            detail.push(format!("想定外の列: {}", unexpected.join(", ")));
        }
        return Err(schema_error(path, &detail.join("; ")));
    }

    Ok(columns.into_iter().flatten().collect())
}

fn schema_error(path: &Path, detail: &str) -> InterliningError {
    InterliningError::Schema {
        path: path.to_path_buf(),
        detail: detail.to_string(),
    }
}

fn cell_value(spec: &FieldSpec, cell: &Data) -> Value {
    match (spec.kind, cell) {
        (FieldKind::Numeric, Data::Empty) => Value::Empty,
        (FieldKind::Numeric, Data::Int(i)) => Value::Number(*i as f64),
        (FieldKind::Numeric, Data::Float(f)) => Value::Number(*f),
        (FieldKind::Text, Data::Empty) => Value::Text(String::new()),
        (FieldKind::Text, Data::String(s)) => Value::Text(s.clone()),
        // Excelで直接入力された数値はテキスト列では文字列として扱う
        (FieldKind::Text, Data::Int(i)) => Value::from(*i).to_string().into(),
        (FieldKind::Text, Data::Float(f)) => Value::Number(*f).to_string().into(),
        (_, other) => Value::Text(other.to_string()),
    }
}

/// テーブル全体をxlsxのバイト列にする
pub fn table_to_buffer(table: &Table) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold().set_border(FormatBorder::Thin);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in schema::column_names().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &header_format)?;
    }

    for (i, record) in table.rows().iter().enumerate() {
        let row = i as u32 + 1;
        for (col, value) in record.values().iter().enumerate() {
            let col = col as u16;
            match value {
                Value::Number(n) => {
                    worksheet.write_number(row, col, *n)?;
                }
                Value::Text(s) if !s.is_empty() => {
                    worksheet.write_string(row, col, s)?;
                }
                _ => {}
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// テーブル全体を書き出す（一時ファイル → リネーム）
///
/// 既存ファイルが読み取り専用なら書き込まずに`PermissionDenied`を返す。
/// 既存ファイルの権限は置き換え後も引き継ぐ。
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let permissions = match target_permissions(path)? {
        Some(existing) => Some(existing),
        None => new_file_permissions(),
    };
    let buffer = table_to_buffer(table)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| InterliningError::io_at(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| InterliningError::io_at(dir, e))?;
    tmp.write_all(&buffer).map_err(|e| InterliningError::io_at(path, e))?;
    if let Some(permissions) = permissions {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| InterliningError::io_at(path, e))?;
    }
    tmp.as_file().sync_all().map_err(|e| InterliningError::io_at(path, e))?;
    tmp.persist(path).map_err(|e| InterliningError::io_at(path, e.error))?;

    tracing::debug!(path = %path.display(), rows = table.len(), bytes = buffer.len(), "workbook written");
    Ok(())
}

/// 置き換え対象の権限（ファイルがなければNone）
fn target_permissions(path: &Path) -> Result<Option<Permissions>> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.permissions().readonly() => {
            Err(InterliningError::PermissionDenied(path.to_path_buf()))
        }
        Ok(meta) => Ok(Some(meta.permissions())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(InterliningError::io_at(path, e)),
    }
}

/// 新規作成時の権限（一時ファイルの0600のままにしない）
#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}
