//! 対話式入力フォーム
//!
//! 入力フォーム（全26列）と検索フォーム（8列）。
//! 数値列は下限付き、選択肢列は先頭に空欄を置いたリストから選ぶ。

use crate::error::Result;
use dialoguer::{Input, Select};
use interlining_common::schema::{FieldKind, FieldSpec, BLANK_CHOICE, FIELDS};
use interlining_common::{schema, Criteria, Record, Value};

/// 選択肢列の表示項目（先頭は空欄）
pub fn choice_items(spec: &FieldSpec) -> Vec<&'static str> {
    let mut items = vec![BLANK_CHOICE];
    if let Some(choices) = spec.choices {
        items.extend_from_slice(choices);
    }
    items
}

fn prompt_choice(spec: &FieldSpec) -> Result<String> {
    let items = choice_items(spec);
    let selected = Select::new()
        .with_prompt(spec.name)
        .items(&items)
        .default(0)
        .interact()?;
    Ok(items[selected].to_string())
}

fn prompt_text(name: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(name)
        .allow_empty(true)
        .interact_text()?;
    Ok(input)
}

fn prompt_number(spec: &FieldSpec) -> Result<i64> {
    let min = spec.min.unwrap_or(i64::MIN);
    let name = spec.name;
    let input: i64 = Input::new()
        .with_prompt(name)
        .default(spec.min.unwrap_or_default())
        .validate_with(move |n: &i64| -> std::result::Result<(), String> {
            if *n >= min {
                Ok(())
            } else {
                Err(format!("{} は {} 以上で入力してください", name, min))
            }
        })
        .interact_text()?;
    Ok(input)
}

/// 入力フォーム
pub fn prompt_record() -> Result<Record> {
    let mut values = Vec::with_capacity(FIELDS.len());
    for spec in FIELDS.iter() {
        let value = match (spec.kind, spec.choices) {
            (FieldKind::Numeric, _) => Value::from(prompt_number(spec)?),
            (FieldKind::Text, Some(_)) => Value::Text(prompt_choice(spec)?),
            (FieldKind::Text, None) => Value::Text(prompt_text(spec.name)?),
        };
        values.push(value);
    }

    let record = Record::from_values(values)?;
    record.validate()?;
    Ok(record)
}

/// 検索フォーム（空欄の項目は条件にしない）
pub fn prompt_criteria() -> Result<Criteria> {
    let mut criteria = Criteria::new();
    for spec in schema::filterable_fields() {
        // 数値列も文字列のまま渡し、変換エラーは検索側で報告する
        let value = match spec.choices {
            Some(_) => prompt_choice(spec)?,
            None => prompt_text(spec.name)?,
        };
        criteria.insert(spec.name, value);
    }
    Ok(criteria)
}
