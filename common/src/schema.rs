//! 列スキーマ定義
//!
//! 台帳の26列を固定順で定義する。重複判定・検索時の型変換・入力検証・
//! Excel入出力はすべてこの表を参照する。

/// 列の型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 整数ID（Indent Number, GSM）
    Numeric,
    /// 自由記述（選択肢付きの列もここに含む）
    Text,
}

/// 列定義
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// 数値列の下限（入力フォームの制約）
    pub min: Option<i64>,
    /// 選択肢（入力フォームで使用）
    pub choices: Option<&'static [&'static str]>,
    /// 検索フォームに出す列か
    pub filterable: bool,
}

impl FieldSpec {
    const fn text(name: &'static str) -> Self {
        Self { name, kind: FieldKind::Text, min: None, choices: None, filterable: false }
    }

    const fn numeric(name: &'static str, min: i64) -> Self {
        Self { name, kind: FieldKind::Numeric, min: Some(min), choices: None, filterable: true }
    }

    const fn choice(name: &'static str, choices: &'static [&'static str]) -> Self {
        Self { name, kind: FieldKind::Text, min: None, choices: Some(choices), filterable: false }
    }

    const fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == FieldKind::Numeric
    }
}

pub const INDENT_NUMBER: &str = "Indent Number";
pub const STAGE: &str = "Stage";
pub const CUSTOMER: &str = "Customer";
pub const STYLE: &str = "Style";
pub const WASH: &str = "Wash";
pub const CONTENT: &str = "Content";
pub const GSM: &str = "GSM";
pub const STRUCTURE: &str = "Structure";
pub const TYPE_OF_CONSTRUCTION: &str = "Type of construction";

/// 選択肢の空欄（フォームの先頭項目）
pub const BLANK_CHOICE: &str = " ";

pub const STAGES: &[&str] = &[
    "Design", "Development", "FIT", "GFE", "GPT", "GPT,PP", "Mock", "Offer",
    "Photoshoot", "Pre-Production", "Proto", "Quotation", "Sealer", "Size Set", "SMS",
];

pub const STRUCTURES: &[&str] = &[
    "Corduroy", "Dobby", "Denim", "French Terry", "Herringbone", "Interlock (Knit)",
    "Jersey", "Jacquard", "Knit", "Matt", "Miss Jersey Knit", "Oxford", "Oxford Twill",
    "Pique", "Plain", "Poplin", "Satin", "Seersucker", "Single Jersey", "Twill", "Twill Knit",
];

pub const CONSTRUCTIONS: &[&str] = &["Woven", "Knit"];

pub const FIELD_COUNT: usize = 26;

/// 全26列（この順で保存される）
pub static FIELDS: [FieldSpec; FIELD_COUNT] = [
    FieldSpec::numeric(INDENT_NUMBER, 9999),
    FieldSpec::choice(STAGE, STAGES),
    FieldSpec::text(CUSTOMER).filterable(),
    FieldSpec::text(STYLE).filterable(),
    FieldSpec::text(WASH).filterable(),
    FieldSpec::text(CONTENT).filterable(),
    FieldSpec::numeric(GSM, 9),
    FieldSpec::choice(STRUCTURE, STRUCTURES).filterable(),
    FieldSpec::text("Count_Cons"),
    FieldSpec::choice(TYPE_OF_CONSTRUCTION, CONSTRUCTIONS).filterable(),
    FieldSpec::text("Collar Skin"),
    FieldSpec::text("Collar Patch"),
    FieldSpec::text("Inner Collar"),
    FieldSpec::text("Inner NB"),
    FieldSpec::text("NB Patch"),
    FieldSpec::text("Outer NB"),
    FieldSpec::text("CF T P"),
    FieldSpec::text("CF D P"),
    FieldSpec::text("Top Cuff"),
    FieldSpec::text("In cuff"),
    FieldSpec::text("Top SP"),
    FieldSpec::text("Inner SP"),
    FieldSpec::text("Label Patch"),
    FieldSpec::text("Moon Patch"),
    FieldSpec::text("Welt"),
    FieldSpec::text("Flap"),
];

/// 列名から列定義を取得
pub fn field(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|f| f.name == name)
}

/// 列名から列位置を取得
pub fn index_of(name: &str) -> Option<usize> {
    FIELDS.iter().position(|f| f.name == name)
}

pub fn column_names() -> impl Iterator<Item = &'static str> {
    FIELDS.iter().map(|f| f.name)
}

/// 検索フォームの対象列（Stageは保存時のみ）
pub fn filterable_fields() -> impl Iterator<Item = &'static FieldSpec> {
    FIELDS.iter().filter(|f| f.filterable)
}
