//! サイズ推薦テスト
//!
//! OCRテキストの復元から推薦までを通しで検証

use sizechart_common::api::{self, RecommendationRequest};
use sizechart_common::fit::{self, BaggyMargin, FitSettings, MarginType, UserMeasurements};
use sizechart_common::{reconstruct, FitCategory, GarmentType};

const TOP_CHART: &str = "Size S M L XL\nChest 100 104 108 112\nShoulder 44 45 46 48\n\
                         Length 68 70 72 74\nSleeve 60 62 64 66";

fn user(entries: &[(&str, f64)]) -> UserMeasurements {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn recommend_top(chest: f64, margin: BaggyMargin) -> fit::Recommendation {
    let chart = reconstruct(Some(TOP_CHART));
    fit::recommend(&chart, &user(&[("chest", chest)]), GarmentType::Top, &margin, &FitSettings::default())
}

/// 胸囲98ならS
#[test]
fn test_regular_user_gets_small() {
    let rec = recommend_top(98.0, BaggyMargin::default());
    assert_eq!(rec.right_fit.unwrap().size, "S");
}

/// どのサイズにも入らないときは一番大きいサイズ
#[test]
fn test_large_user_gets_largest() {
    let rec = recommend_top(120.0, BaggyMargin::default());
    let right = rec.right_fit.unwrap();
    assert_eq!(right.size, "XL");
    assert_eq!(right.fit_category, FitCategory::TooSmall);
    assert!(right.notes.iter().any(|n| n == "Chest may be tight"));
}

/// 見出しが大きい順でも同点は一番大きいサイズ
#[test]
fn test_descending_header_large_user() {
    let chart = reconstruct(Some("Size XL L M S\nChest 112 108 104 100"));
    let rec = fit::recommend(
        &chart,
        &user(&[("chest", 120.0)]),
        GarmentType::Top,
        &BaggyMargin::default(),
        &FitSettings::default(),
    );
    assert_eq!(rec.right_fit.unwrap().size, "XL");
}

/// Mから1サイズ上はL
#[test]
fn test_baggy_one_size_up() {
    let margin = BaggyMargin {
        margin_type: MarginType::Size,
        value: 1.0,
    };
    let rec = recommend_top(102.0, margin);
    assert_eq!(rec.right_fit.unwrap().size, "M");
    assert_eq!(rec.baggy_fit.unwrap().size, "L");
}

/// 平置き寸法の表でも周囲寸法として照合する
#[test]
fn test_flat_lay_chart() {
    let chart = reconstruct(Some("Size S M L\nChest 50 52 54"));
    let rec = fit::recommend(
        &chart,
        &user(&[("chest", 98.0)]),
        GarmentType::Top,
        &BaggyMargin::default(),
        &FitSettings::default(),
    );
    let right = rec.right_fit.unwrap();
    assert_eq!(right.size, "S");
    assert_eq!(right.details[0].garment_value, 100.0);
}

/// 下衣の表は胴囲を基準にゆったりサイズを選ぶ
#[test]
fn test_bottom_baggy_by_cm() {
    let chart = reconstruct(Some("Size S M L XL\nWaist 68 72 76 80\nHip 94 98 102 106"));
    let margin = BaggyMargin {
        margin_type: MarginType::Cm,
        value: 9.0,
    };
    let rec = fit::recommend(
        &chart,
        &user(&[("waist", 70.0), ("hip", 96.0)]),
        GarmentType::Bottom,
        &margin,
        &FitSettings::default(),
    );
    assert_eq!(rec.baggy_fit.unwrap().size, "XL");
}

/// リクエストJSONから応答JSONまで（同じ入力は同じ出力）
#[test]
fn test_request_roundtrip_deterministic() {
    let chart = reconstruct(Some(TOP_CHART));
    let request = serde_json::json!({
        "sizeChart": chart,
        "userMeasurements": {"chest": 98, "shoulder": 43},
        "garmentType": "top",
        "baggyMargin": {"type": "percent", "value": 10}
    });
    let request: RecommendationRequest = serde_json::from_value(request).unwrap();

    let a = api::recommend(&request, &FitSettings::default()).unwrap();
    let b = api::recommend(&request, &FitSettings::default()).unwrap();
    assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());

    let json = serde_json::to_value(&a).unwrap();
    assert_eq!(json["rightFit"]["size"], "S");
    assert_eq!(json["allSizes"].as_array().unwrap().len(), 4);
    assert_eq!(json["easeAllowances"]["chest"]["min"], 0.0);
}

/// OCR応答から推薦リクエストを組み立てる
#[test]
fn test_ocr_response_to_request() {
    let response = api::ocr_response(Some(TOP_CHART), &Default::default());
    assert!(response.is_size_guide);

    let request = RecommendationRequest {
        size_chart: response.to_chart(),
        user_measurements: user(&[("chest", 106.0)]),
        garment_type: response.structured.garment_type.to_string(),
        ..Default::default()
    };
    let result = api::recommend(&request, &FitSettings::default()).unwrap();
    assert_eq!(result.recommendation.right_fit.unwrap().size, "M");
}
