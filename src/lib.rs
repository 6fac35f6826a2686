//! インターライニング台帳
//!
//! 縫製仕様（顧客・スタイル・生地・芯地の部位名など26列）をExcel台帳に記録し、
//! 条件で検索するためのライブラリとCLI。

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod logging;
pub mod render;
pub mod store;

pub use interlining_common as common;
