use thiserror::Error;

#[derive(Error, Debug)]
pub enum SizeChartError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("OCRテキストが見つかりません: {0}")]
    NoTextFound(String),

    #[error("リクエストが不正です ({status}): {message}")]
    BadRequest { status: u16, message: String },

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] sizechart_common::Error),
}

impl From<sizechart_common::ApiError> for SizeChartError {
    fn from(err: sizechart_common::ApiError) -> Self {
        SizeChartError::BadRequest {
            status: err.status_code(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SizeChartError>;
