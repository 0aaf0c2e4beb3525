//! sizechart CLI ライブラリ
//!
//! 復元と照合の本体は `sizechart-common`。ここではファイル入出力・設定・
//! キャッシュ・Excel出力をまとめる。

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod scanner;
