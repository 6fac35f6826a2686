//! 検索エンジン
//!
//! 列=値 の条件をすべてAND結合して絞り込む。
//! 数値列は整数に変換して比較し、テキスト列は完全一致（大文字小文字・空白を区別）。

use crate::error::FilterError;
use crate::record::Record;
use crate::schema::{self, FieldKind};
use crate::table::Table;
use crate::value::Value;

/// 検索条件（挿入順を保持）
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    pairs: Vec<(String, String)>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// 条件を追加（同じ列は上書き）
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(f, _)| *f == field) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((field, value)),
        }
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    /// 空欄を除いた有効な条件
    ///
    /// 空白のみの値も条件なしとみなす。テキスト列の値`" "`そのものでは検索できない。
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .filter(|(_, v)| !is_unconstrained(v))
            .map(|(f, v)| (f.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// 有効な条件が一つもない
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Criteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut criteria = Criteria::new();
        for (k, v) in iter {
            criteria.insert(k, v);
        }
        criteria
    }
}

/// 空文字・空白のみは「条件なし」
fn is_unconstrained(value: &str) -> bool {
    value.trim().is_empty()
}

/// 検索結果
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// 条件なし（全件）
    All(Table),
    /// 条件あり（0件の場合もある）
    Matches(Table),
}

impl Selection {
    pub fn table(&self) -> &Table {
        match self {
            Selection::All(t) | Selection::Matches(t) => t,
        }
    }

    pub fn into_table(self) -> Table {
        match self {
            Selection::All(t) | Selection::Matches(t) => t,
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        matches!(self, Selection::All(_))
    }

    /// 条件ありで該当0件
    pub fn is_no_match(&self) -> bool {
        matches!(self, Selection::Matches(t) if t.is_empty())
    }
}

/// 比較用に変換済みの条件
enum Predicate<'a> {
    Number { idx: usize, value: i64 },
    Text { idx: usize, value: &'a str },
}

impl Predicate<'_> {
    fn matches(&self, record: &Record) -> bool {
        match self {
            Predicate::Number { idx, value } => {
                record.values()[*idx].as_number() == Some(*value as f64)
            }
            Predicate::Text { idx, value } => {
                matches!(&record.values()[*idx], Value::Text(s) if s.as_str() == *value)
            }
        }
    }
}

/// 条件をすべて変換（未知の列を先に検出し、その後に数値変換エラーを返す）
fn compile(criteria: &Criteria) -> Result<Vec<Predicate<'_>>, FilterError> {
    for (field, _) in criteria.iter() {
        if schema::index_of(field).is_none() {
            return Err(FilterError::UnknownField(field.to_string()));
        }
    }

    criteria
        .iter()
        .map(|(field, value)| {
            let idx = schema::index_of(field)
                .ok_or_else(|| FilterError::UnknownField(field.to_string()))?;
            match schema::FIELDS[idx].kind {
                FieldKind::Numeric => {
                    let n = value.trim().parse::<i64>().map_err(|_| FilterError::InvalidNumber {
                        field: field.to_string(),
                        value: value.to_string(),
                    })?;
                    Ok(Predicate::Number { idx, value: n })
                }
                FieldKind::Text => Ok(Predicate::Text { idx, value }),
            }
        })
        .collect()
}

/// テーブルを条件で絞り込む
pub fn filter(table: &Table, criteria: &Criteria) -> Result<Selection, FilterError> {
    if criteria.is_empty() {
        return Ok(Selection::All(table.clone()));
    }

    let predicates = compile(criteria)?;
    let matched: Table = table
        .rows()
        .iter()
        .filter(|row| predicates.iter().all(|p| p.matches(row)))
        .cloned()
        .collect();

    tracing::debug!(
        criteria = criteria.len(),
        total = table.len(),
        matched = matched.len(),
        "filter applied"
    );

    Ok(Selection::Matches(matched))
}
