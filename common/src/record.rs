//! 台帳レコード
//!
//! 26列の値をスキーマ順に保持する。列の追加・削除はできない。

use crate::error::{Error, Result};
use crate::schema::{self, FieldKind, FieldSpec, BLANK_CHOICE, FIELDS, FIELD_COUNT};
use crate::value::Value;
use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    values: Vec<Value>,
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl Record {
    /// 空レコード（テキスト列は空文字、数値列は空セル）
    pub fn new() -> Self {
        let values = FIELDS
            .iter()
            .map(|f| match f.kind {
                FieldKind::Numeric => Value::Empty,
                FieldKind::Text => Value::Text(String::new()),
            })
            .collect();
        Self { values }
    }

    /// スキーマ順の値列から生成
    pub fn from_values(values: Vec<Value>) -> Result<Self> {
        if values.len() != FIELD_COUNT {
            return Err(Error::InvalidRecord(format!(
                "列数が不正です（期待値 {}, 実際 {}）",
                FIELD_COUNT,
                values.len()
            )));
        }
        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        schema::index_of(name).map(|i| &self.values[i])
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let idx = schema::index_of(name)
            .ok_or_else(|| Error::InvalidRecord(format!("未知の列: {}", name)))?;
        self.values[idx] = value.into();
        Ok(())
    }

    /// ビルダー形式の`set`
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Result<Self> {
        self.set(name, value)?;
        Ok(self)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// (列定義, 値) をスキーマ順に返す
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldSpec, &Value)> {
        FIELDS.iter().zip(self.values.iter())
    }

    /// 入力フォームの制約を検証
    ///
    /// - 数値列: 整数かつ下限以上
    /// - 選択肢列: 選択肢のいずれか、または空欄（`""` / `" "`）
    pub fn validate(&self) -> Result<()> {
        for (spec, value) in self.fields() {
            match spec.kind {
                FieldKind::Numeric => {
                    let n = value.as_integer().ok_or_else(|| {
                        Error::InvalidRecord(format!("{} は整数で入力してください", spec.name))
                    })?;
                    if let Some(min) = spec.min {
                        if n < min {
                            return Err(Error::InvalidRecord(format!(
                                "{} は {} 以上で入力してください（入力値 {}）",
                                spec.name, min, n
                            )));
                        }
                    }
                }
                FieldKind::Text => {
                    let text = value.as_text().ok_or_else(|| {
                        Error::InvalidRecord(format!("{} は文字列で入力してください", spec.name))
                    })?;
                    if let Some(choices) = spec.choices {
                        let blank = text.is_empty() || text == BLANK_CHOICE;
                        if !blank && !choices.contains(&text) {
                            return Err(Error::InvalidRecord(format!(
                                "{} は次のいずれかを選択してください: {}",
                                spec.name,
                                choices.join(", ")
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// 全列が空か（Excelに書いても読み戻せない行）
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Value::is_blank)
    }

    /// JSONオブジェクトから生成
    ///
    /// 省略した列は空のまま。未知のキーはエラー。
    pub fn from_json(json: &serde_json::Value) -> Result<Self> {
        let object = json
            .as_object()
            .ok_or_else(|| Error::InvalidRecord("レコードはJSONオブジェクトで指定してください".into()))?;

        let mut record = Self::new();
        for (key, raw) in object {
            let spec = schema::field(key)
                .ok_or_else(|| Error::InvalidRecord(format!("未知の列: {}", key)))?;
            let value = match (spec.kind, raw) {
                (FieldKind::Numeric, serde_json::Value::Number(n)) => {
                    let n = n.as_i64().ok_or_else(|| {
                        Error::InvalidRecord(format!("{} は整数で入力してください", key))
                    })?;
                    Value::from(n)
                }
                (FieldKind::Numeric, serde_json::Value::String(s)) => {
                    let n: i64 = s.trim().parse().map_err(|_| {
                        Error::InvalidRecord(format!("{} は整数で入力してください（入力値 {:?}）", key, s))
                    })?;
                    Value::from(n)
                }
                (FieldKind::Numeric, serde_json::Value::Null) => Value::Empty,
                (FieldKind::Text, serde_json::Value::String(s)) => Value::Text(s.clone()),
                (FieldKind::Text, serde_json::Value::Null) => Value::Text(String::new()),
                (FieldKind::Text, serde_json::Value::Number(n)) => Value::Text(n.to_string()),
                _ => {
                    return Err(Error::InvalidRecord(format!(
                        "{} の値が不正です: {}",
                        key, raw
                    )))
                }
            };
            record.set(spec.name, value)?;
        }
        Ok(record)
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FIELD_COUNT))?;
        for (spec, value) in self.fields() {
            map.serialize_entry(spec.name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CUSTOMER, GSM, INDENT_NUMBER, STAGE, STRUCTURE};
    use serde_json::json;

    fn valid_record() -> Record {
        Record::new()
            .with(INDENT_NUMBER, 10005)
            .and_then(|r| r.with(GSM, 120))
            .and_then(|r| r.with(STAGE, "Proto"))
            .and_then(|r| r.with(CUSTOMER, "Acme"))
            .unwrap()
    }

    #[test]
    fn test_new_record_shape() {
        let record = Record::new();
        assert_eq!(record.values().len(), 26);
        assert_eq!(record.get(INDENT_NUMBER), Some(&Value::Empty));
        assert_eq!(record.get(CUSTOMER), Some(&Value::text("")));
        assert!(record.get("Colour").is_none());
    }

    #[test]
    fn test_set_unknown_field() {
        let mut record = Record::new();
        assert!(record.set("Colour", "Red").is_err());
    }

    #[test]
    fn test_validate_ok() {
        assert!(valid_record().validate().is_ok());
    }

    #[test]
    fn test_validate_minimums() {
        let record = valid_record().with(INDENT_NUMBER, 9998).unwrap();
        assert!(record.validate().is_err());

        let record = valid_record().with(GSM, 8).unwrap();
        assert!(record.validate().is_err());

        let record = valid_record().with(GSM, 9).unwrap();
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_validate_missing_number() {
        let record = valid_record().with(GSM, Value::Empty).unwrap();
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_validate_choices() {
        let record = valid_record().with(STRUCTURE, "Twill").unwrap();
        assert!(record.validate().is_ok());

        let record = valid_record().with(STRUCTURE, BLANK_CHOICE).unwrap();
        assert!(record.validate().is_ok());

        let record = valid_record().with(STRUCTURE, "twill").unwrap();
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_unset_choice_fields_are_blank() {
        let record = Record::new()
            .with(INDENT_NUMBER, 10005)
            .and_then(|r| r.with(GSM, 120))
            .unwrap();
        assert_eq!(record.get(STAGE), Some(&Value::text("")));
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_from_json_without_choice_fields_validates() {
        let record = Record::from_json(&json!({
            "Indent Number": 10005,
            "GSM": 120,
            "Customer": "Acme"
        }))
        .unwrap();
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_is_empty() {
        assert!(Record::new().is_empty());
        assert!(!Record::new().with(CUSTOMER, "Acme").unwrap().is_empty());
        assert!(!Record::new().with(CUSTOMER, " ").unwrap().is_empty());
    }

    #[test]
    fn test_from_json() {
        let record = Record::from_json(&json!({
            "Indent Number": 10005,
            "GSM": "120",
            "Customer": "Acme",
            "Welt": null
        }))
        .unwrap();
        assert_eq!(record.get(INDENT_NUMBER), Some(&Value::from(10005)));
        assert_eq!(record.get(GSM), Some(&Value::from(120)));
        assert_eq!(record.get(CUSTOMER), Some(&Value::text("Acme")));
        assert_eq!(record.get("Welt"), Some(&Value::text("")));
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(Record::from_json(&json!({"Colour": "Red"})).is_err());
        assert!(Record::from_json(&json!({"GSM": 1.5})).is_err());
        assert!(Record::from_json(&json!({"GSM": "abc"})).is_err());
        assert!(Record::from_json(&json!(["Acme"])).is_err());
    }

    #[test]
    fn test_serialize_keeps_schema_order() {
        let json = serde_json::to_string(&valid_record()).unwrap();
        assert!(json.starts_with(r#"{"Indent Number":10005,"Stage":"Proto","Customer":"Acme""#));
        assert!(json.ends_with(r#""Flap":""}"#));
    }
}
