//! Interlining Common Library
//!
//! 台帳の列スキーマ・レコード・検索エンジン（I/Oなし）

pub mod error;
pub mod filter;
pub mod record;
pub mod schema;
pub mod table;
pub mod value;

pub use error::{Error, FilterError, Result};
pub use filter::{filter, Criteria, Selection};
pub use record::Record;
pub use schema::{FieldKind, FieldSpec, FIELDS};
pub use table::Table;
pub use value::Value;
