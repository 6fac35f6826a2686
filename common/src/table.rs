//! 台帳テーブル

use crate::record::Record;
use crate::schema;
use crate::value::Value;
use serde::Serialize;

/// 固定26列のレコード列（挿入順を保持）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Table {
    rows: Vec<Record>,
}

impl Table {
    /// 列定義のみの空テーブル
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Record>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn push(&mut self, record: Record) {
        self.rows.push(record);
    }

    /// 全26列が完全一致する行があるか
    pub fn contains(&self, record: &Record) -> bool {
        self.rows.iter().any(|row| row == record)
    }

    /// 1列分の値
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Value> + 'a> {
        let idx = schema::index_of(name)?;
        Some(self.rows.iter().map(move |r| &r.values()[idx]))
    }
}

impl IntoIterator for Table {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self { rows: iter.into_iter().collect() }
    }
}
