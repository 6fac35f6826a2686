//! 台帳ストア
//!
//! セッション内で台帳を一度だけ読み込んでキャッシュし、
//! 追記時は最新のファイルを読み直して全列一致の重複を確認してから全体を書き戻す。
//!
//! 複数プロセスからの同時書き込みは調停しない。後から書いた側が
//! テーブル全体を上書きする（相手の未読の変更は失われる）。

pub mod xlsx;

use crate::error::{InterliningError, Result};
use interlining_common::{filter, Criteria, Record, Selection, Table};
use std::path::{Path, PathBuf};

/// 追記結果
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved,
    /// 全列一致の行が既にある（書き込みなし）
    Duplicate,
    Failed(String),
}

impl SaveOutcome {
    pub fn message(&self) -> String {
        match self {
            SaveOutcome::Saved => "Data saved successfully!".to_string(),
            SaveOutcome::Duplicate => "Data already saved!".to_string(),
            SaveOutcome::Failed(reason) => format!("Error saving data: {}", reason),
        }
    }
}

#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    cache: Option<Table>,
}

impl Store {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 台帳を取得（セッション内でキャッシュ）
    ///
    /// ファイルがなければ列見出しのみの台帳を作成して保存する。
    pub fn load(&mut self) -> Result<&Table> {
        let table = match self.cache.take() {
            Some(table) => table,
            None => self.read_from_disk()?,
        };
        Ok(&*self.cache.insert(table))
    }

    /// キャッシュを捨てて読み直す
    pub fn reload(&mut self) -> Result<&Table> {
        self.invalidate();
        self.load()
    }

    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// レコードを追記
    ///
    /// 全列が空のレコードは読み戻せないため`Failed`とする。
    /// 失敗時はキャッシュもファイルも変更しない。再試行はしない。
    pub fn append(&mut self, record: &Record) -> SaveOutcome {
        match self.try_append(record) {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "append failed");
                SaveOutcome::Failed(e.to_string())
            }
        }
    }

    fn try_append(&mut self, record: &Record) -> Result<SaveOutcome> {
        if record.is_empty() {
            return Err(interlining_common::Error::InvalidRecord("全列が空です".into()).into());
        }
        let mut table = self.read_from_disk()?;

        if table.contains(record) {
            tracing::info!(path = %self.path.display(), "duplicate record skipped");
            self.cache = Some(table);
            return Ok(SaveOutcome::Duplicate);
        }

        table.push(record.clone());
        xlsx::write_table(&self.path, &table)?;

        tracing::info!(path = %self.path.display(), rows = table.len(), "record appended");
        self.cache = Some(table);
        Ok(SaveOutcome::Saved)
    }

    /// 読み込んだ台帳を条件で絞り込む
    pub fn retrieve(&mut self, criteria: &Criteria) -> Result<Selection> {
        let table = self.load()?;
        filter(table, criteria).map_err(InterliningError::from)
    }

    fn read_from_disk(&self) -> Result<Table> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "data file not found, creating empty ledger");
            let table = Table::new();
            xlsx::write_table(&self.path, &table)?;
            return Ok(table);
        }
        xlsx::read_table(&self.path)
    }
}
