//! # Taxon CLI Library
//!
//! ALC 推論エンジンのコマンドラインインターフェース
//! 包含判定と概念分類をコマンドラインから実行

pub mod commands;
pub mod interactive;

pub use commands::*;
pub use interactive::*;
