//! 衣類種別の判定とサイズ表画像の判定

use crate::dictionary;
use crate::reconstruct::{multi_table, text};
use crate::types::{GarmentType, SizeChart};
use crate::vocabulary::{self, Measurement};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// 単位付きの数値
    static ref UNIT_NUMBER_RE: Regex =
        Regex::new(r#"(?i)\d+(?:\.\d+)?\s*(?:cm|厘米|公分|inch|in\b|")"#).unwrap();
}

/// 1区間の列キーから種別を決める
///
/// 下衣のキーがあり、上衣のキーが1つも無いときだけ下衣。
pub fn segment_garment_type<'a, I>(keys: I) -> GarmentType
where
    I: IntoIterator<Item = &'a str>,
{
    let mut has_top = false;
    let mut has_bottom = false;
    for key in keys {
        match Measurement::from_key(key) {
            Some(m) if m.is_top() => has_top = true,
            Some(m) if m.is_bottom() => has_bottom = true,
            _ => {}
        }
    }
    if has_bottom && !has_top {
        GarmentType::Bottom
    } else {
        GarmentType::Top
    }
}

/// 表全体の種別を推定する
///
/// 上衣・下衣それぞれのキーを数え、下衣が上回れば下衣。
pub fn classify_garment_type(chart: &SizeChart) -> GarmentType {
    let mut top = 0usize;
    let mut bottom = 0usize;
    for key in chart.measurement_keys() {
        match Measurement::from_key(&key) {
            Some(m) if m.is_top() => top += 1,
            Some(m) if m.is_bottom() => bottom += 1,
            _ => {}
        }
    }
    if bottom > top {
        GarmentType::Bottom
    } else {
        GarmentType::Top
    }
}

/// OCRテキストがサイズ表らしいか
///
/// 計測用語があり、さらに単位付きの数値かサイズ名のどちらかを含むこと。
/// 数字のサイズ（`Size 46 48 50`）は見出し行にあるときだけ数える。
pub fn is_size_guide(raw: &str) -> bool {
    let has_term = vocabulary::has_keyword(raw) || dictionary::has_measurement_term(raw);
    if !has_term {
        return false;
    }
    UNIT_NUMBER_RE.is_match(raw)
        || !text::letter_size_tokens(raw).is_empty()
        || has_numeric_size_header(raw)
}

fn has_numeric_size_header(raw: &str) -> bool {
    let translated = dictionary::translate(raw);
    text::lines(&translated)
        .iter()
        .any(|line| multi_table::size_header(line).is_some())
}
