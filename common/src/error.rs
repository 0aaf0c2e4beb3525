//! エラー型定義

use thiserror::Error;

/// 共通エラー型
///
/// 復元と採点は失敗しないので、ここに来るのは出力系のエラーだけ。
#[derive(Error, Debug)]
pub enum Error {
    #[error("Export error: {0}")]
    Export(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// リクエスト境界のエラー
///
/// 推薦リクエストの入力検証で返す。HTTP層はステータスコードをそのまま使う。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    /// 対応するHTTPステータスコード
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
        }
    }
}
