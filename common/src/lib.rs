//! Size Chart Common Library
//!
//! OCRテキストからのサイズ表復元と、採寸値との照合。
//! CLIとリクエスト処理層で共有される。

pub mod api;
pub mod classifier;
pub mod dictionary;
pub mod error;
pub mod export;
pub mod fit;
pub mod ocr_fix;
pub mod reconstruct;
pub mod sizes;
pub mod types;
pub mod vocabulary;

pub use api::{ocr_response, OcrResponse, RecommendationRequest, RecommendationResponse, StructuredChart};
pub use classifier::{classify_garment_type, is_size_guide};
pub use error::{ApiError, Error, Result};
pub use fit::{BaggyMargin, FitCategory, FitSettings, MarginType, Recommendation, SizeFit};
pub use reconstruct::{reconstruct, reconstruct_with, ParseSettings};
pub use types::{GarmentType, SizeChart, SizeRow, SizeTable};
