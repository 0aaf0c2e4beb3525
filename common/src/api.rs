//! リクエスト境界
//!
//! OCR結果の応答と推薦リクエストの検証。HTTP層はここの型をそのままJSONにする。

use crate::classifier;
use crate::error::ApiError;
use crate::fit::ease::EaseTable;
use crate::fit::{self, BaggyMargin, FitSettings, MarginType, Recommendation, UserMeasurements};
use crate::reconstruct::{self, ParseSettings};
use crate::types::{GarmentType, SizeChart, SizeRow, SizeTable};
use serde::{Deserialize, Serialize};

/// 復元した表と種別
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredChart {
    pub headers: Vec<String>,
    pub rows: Vec<SizeRow>,
    pub tables: Vec<SizeTable>,
    pub garment_type: GarmentType,
}

/// OCR応答
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrResponse {
    pub is_size_guide: bool,
    pub raw_text: String,
    pub translated_text: String,
    pub structured: StructuredChart,
}

impl OcrResponse {
    /// 推薦リクエストにそのまま渡せる形に戻す
    pub fn to_chart(&self) -> SizeChart {
        SizeChart {
            headers: self.structured.headers.clone(),
            rows: self.structured.rows.clone(),
            tables: self.structured.tables.clone(),
            raw_text: self.raw_text.clone(),
            translated_text: self.translated_text.clone(),
        }
    }
}

/// OCRテキストから応答を組み立てる
pub fn ocr_response(raw: Option<&str>, settings: &ParseSettings) -> OcrResponse {
    let text = raw.unwrap_or_default();
    let chart = reconstruct::reconstruct_with(raw, settings);
    let garment_type = classifier::classify_garment_type(&chart);

    OcrResponse {
        is_size_guide: classifier::is_size_guide(text),
        raw_text: chart.raw_text,
        translated_text: chart.translated_text,
        structured: StructuredChart {
            headers: chart.headers,
            rows: chart.rows,
            tables: chart.tables,
            garment_type,
        },
    }
}

/// 推薦リクエストの余裕指定（種別は文字列のまま受けて検証する）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaggyMarginRequest {
    #[serde(rename = "type")]
    pub margin_type: String,
    pub value: f64,
}

impl Default for BaggyMarginRequest {
    fn default() -> Self {
        Self {
            margin_type: "size".to_string(),
            value: 1.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub size_chart: SizeChart,
    pub user_measurements: UserMeasurements,
    #[serde(default = "default_garment_type")]
    pub garment_type: String,
    #[serde(default)]
    pub baggy_margin: BaggyMarginRequest,
}

fn default_garment_type() -> String {
    GarmentType::Top.as_str().to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    #[serde(flatten)]
    pub recommendation: Recommendation,
    pub garment_type: GarmentType,
    /// 採点に使ったゆとり量
    pub ease_allowances: EaseTable,
}

/// 推薦リクエストを検証して採点する
///
/// 行が無い、採寸値が無い、種別や余裕指定が不明なときは `ApiError::BadRequest`。
pub fn recommend(request: &RecommendationRequest, settings: &FitSettings) -> Result<RecommendationResponse, ApiError> {
    if request.size_chart.rows.is_empty() {
        return Err(ApiError::BadRequest("sizeChart.rows is empty".to_string()));
    }
    if request.user_measurements.is_empty() {
        return Err(ApiError::BadRequest("userMeasurements is empty".to_string()));
    }
    let garment_type: GarmentType = request.garment_type.parse().map_err(ApiError::BadRequest)?;
    let margin_type: MarginType = request
        .baggy_margin
        .margin_type
        .parse()
        .map_err(ApiError::BadRequest)?;
    let margin = BaggyMargin {
        margin_type,
        value: request.baggy_margin.value,
    };

    let recommendation = fit::recommend(
        &request.size_chart,
        &request.user_measurements,
        garment_type,
        &margin,
        settings,
    );
    Ok(RecommendationResponse {
        recommendation,
        garment_type,
        ease_allowances: settings.ease_table(garment_type),
    })
}
