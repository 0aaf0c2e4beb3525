//! サイズ表復元テスト
//!
//! OCRテキストの典型的な崩れ方ごとに復元結果を検証

use sizechart_common::{reconstruct, GarmentType};

fn sizes(rows: &[sizechart_common::SizeRow]) -> Vec<&str> {
    rows.iter().map(|r| r.size.as_str()).collect()
}

/// 素直な見出し＋計測行（小文字のサイズは大文字に揃う）
#[test]
fn test_clean_header_uppercase_sizes() {
    let chart = reconstruct(Some("Size s m l xl\nChest 100 104 108 112\nLength 68 70 72 74"));
    assert_eq!(sizes(&chart.rows), vec!["S", "M", "L", "XL"]);
    assert_eq!(chart.rows[3].get("chest"), Some(112.0));

    let json = serde_json::to_value(&chart).unwrap();
    assert_eq!(json["rows"][0]["size"], "S");
}

/// 空・None はどちらも空の表
#[test]
fn test_empty_input() {
    for chart in [reconstruct(Some("")), reconstruct(None)] {
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["headers"], serde_json::json!([]));
        assert_eq!(json["rows"], serde_json::json!([]));
        assert_eq!(json["tables"], serde_json::json!([]));
    }
}

/// `$` は `5` の誤認識
#[test]
fn test_dollar_read_as_five() {
    let chart = reconstruct(Some("Size S M L XL\nLength 6$ 67 69 71"));
    assert_eq!(chart.rows[0].get("length"), Some(65.0));
    assert_eq!(chart.rows[3].get("length"), Some(71.0));
}

/// 上下セットは2つの表になる
#[test]
fn test_top_and_bottom_tables() {
    let text = "Size S M L XL\nShoulder 44 45 46 48\nChest 100 104 108 112\nSleeve 60 62 64 66\n\
                Size S M L XL\nWaist 68 72 76 80\nHip 94 98 102 106\nThigh 56 58 60 62";
    let chart = reconstruct(Some(text));
    assert!(chart.tables.len() >= 2);
    assert_eq!(chart.tables[0].garment_type, GarmentType::Top);
    assert_eq!(chart.tables[1].garment_type, GarmentType::Bottom);
    assert_eq!(chart.rows, chart.tables[0].rows);
}

/// 中国語の表
#[test]
fn test_chinese_chart() {
    let text = "尺码 S M L\n肩宽 44 45 46\n胸围 100 104 108\n身高 160 170 180";
    let chart = reconstruct(Some(text));
    assert!(chart.translated_text.starts_with("Size S M L"));
    assert_eq!(chart.headers, vec!["shoulder", "chest"]);
    assert_eq!(chart.rows[1].get("shoulder"), Some(45.0));
}

/// 全角数字
#[test]
fn test_full_width_digits() {
    let chart = reconstruct(Some("Size S M\nChest １００ １０４"));
    assert_eq!(chart.rows[1].get("chest"), Some(104.0));
}

/// 行形式（1行1サイズ、見出しはキーワード行）
#[test]
fn test_row_based_chart() {
    let text = "Chest Length Sleeve\nS 100 68 60\nM 104 70 62\nL 108 72 64";
    let chart = reconstruct(Some(text));
    assert!(chart.tables.is_empty());
    assert_eq!(chart.headers, vec!["chest", "length", "sleeve"]);
    assert_eq!(chart.rows[2].get("sleeve"), Some(64.0));
}

/// 列グループ形式
#[test]
fn test_column_grouped_chart() {
    let text = "S(36)\nM(38)\nL(40)\nChest\n100\n104\n108\nLength\n68\n70\n72";
    let chart = reconstruct(Some(text));
    assert_eq!(sizes(&chart.rows), vec!["S", "M", "L"]);
    assert_eq!(chart.rows[2].get("length"), Some(72.0));
}

/// 最小サイズのラベル欠落
#[test]
fn test_missing_small_label() {
    let text = "Chest Length Shoulder\n100 68 44\nM 104 70 45\nL 108 72 46";
    let chart = reconstruct(Some(text));
    assert_eq!(sizes(&chart.rows), vec!["S", "M", "L"]);
    assert_eq!(chart.rows[0].get("chest"), Some(100.0));
}

/// EUサイズ
#[test]
fn test_eu_sizes() {
    let text = "Size Chest Length\n46 100 68\n48 104 70\n50 108 72";
    let chart = reconstruct(Some(text));
    assert_eq!(sizes(&chart.rows), vec!["46", "48", "50"]);
    assert_eq!(chart.rows[2].get("length"), Some(72.0));
}

/// 改行の失われた1行
#[test]
fn test_single_line_ocr() {
    let chart = reconstruct(Some("Size 1 2 3 Chest 100 104 108 Length 68 70 72"));
    assert_eq!(sizes(&chart.rows), vec!["1", "2", "3"]);
    assert_eq!(chart.rows[0].get("length"), Some(68.0));
}

/// サイズ表でないテキスト
#[test]
fn test_not_a_chart() {
    let chart = reconstruct(Some("Thank you for your purchase!\nShipping in 3 days"));
    assert!(chart.rows.is_empty());
    assert!(chart.tables.is_empty());
}

/// 同じ入力は同じ結果
#[test]
fn test_deterministic() {
    let text = "S\nChest 100\nM\nChest 104\nL\nChest 108";
    let a = serde_json::to_string(&reconstruct(Some(text))).unwrap();
    let b = serde_json::to_string(&reconstruct(Some(text))).unwrap();
    assert_eq!(a, b);
}
