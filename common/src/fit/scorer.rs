//! サイズごとの適合度計算と推薦
//!
//! ## 処理フロー
//! 1. 各サイズ・各計測項目で、平置き（半周）寸法なら2倍に補正する
//! 2. ゆとり量の表と比べて項目ごとの得点と区分を出す
//! 3. 項目の平均点でサイズを並べ、最上位をジャストサイズとする
//! 4. ゆったりサイズは余裕の指定（サイズ数・cm・%）から選ぶ

use super::ease::{self, EaseAllowance, EaseTable};
use super::{FitSettings, HalfMeasurementRule};
use crate::sizes;
use crate::types::{GarmentType, SizeChart, SizeRow};
use crate::vocabulary::display_name;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// 採寸値（キー → cm）
pub type UserMeasurements = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitCategory {
    Tight,
    Right,
    Loose,
    Oversized,
    TooBig,
    TooSmall,
}

/// 1項目分の判定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementFit {
    pub key: String,
    /// 半周補正後の値
    pub garment_value: f64,
    pub body_value: f64,
    pub diff: f64,
    pub category: FitCategory,
    pub score: f64,
}

/// 1サイズ分の判定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeFit {
    pub size: String,
    pub score: f64,
    pub fit_category: FitCategory,
    pub details: Vec<MeasurementFit>,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeSummary {
    pub size: String,
    pub fit_category: FitCategory,
    pub score: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub right_fit: Option<SizeFit>,
    pub baggy_fit: Option<SizeFit>,
    pub all_sizes: Vec<SizeSummary>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginType {
    #[default]
    Size,
    Cm,
    Percent,
}

impl std::str::FromStr for MarginType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "size" => Ok(MarginType::Size),
            "cm" => Ok(MarginType::Cm),
            "percent" => Ok(MarginType::Percent),
            _ => Err(format!("Unknown baggy margin type: {}. Use size, cm or percent", s)),
        }
    }
}

/// ゆったりサイズの余裕
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaggyMargin {
    #[serde(rename = "type")]
    pub margin_type: MarginType,
    pub value: f64,
}

impl Default for BaggyMargin {
    fn default() -> Self {
        Self {
            margin_type: MarginType::Size,
            value: 1.0,
        }
    }
}

/// 1項目の適合度
///
/// # Arguments
/// * `garment_value` - 仕上がり寸法（補正済み）
/// * `body_value` - ヌード寸法
/// * `ease` - ゆとり量
pub fn fit(garment_value: f64, body_value: f64, ease: &EaseAllowance) -> (FitCategory, f64) {
    let diff = garment_value - body_value;
    if diff < ease.min {
        let score = (0.5 - (ease.min - diff) * 0.1).max(0.0);
        return (FitCategory::Tight, score);
    }
    if diff <= ease.ideal {
        let span = ease.ideal - ease.min;
        let score = if span > 0.0 { 0.7 + 0.3 * (diff - ease.min) / span } else { 1.0 };
        return (FitCategory::Right, score);
    }
    if diff <= ease.max {
        let span = ease.max - ease.ideal;
        let score = if span > 0.0 { 1.0 - 0.2 * (diff - ease.ideal) / span } else { 1.0 };
        return (FitCategory::Loose, score);
    }
    let score = (0.8 - (diff - ease.max) * 0.05).max(0.3);
    (FitCategory::Oversized, score)
}

/// 平置き寸法を周囲寸法に直す
///
/// 胸囲・胴囲・腰囲で、体の寸法に対する比が小さいか絶対値が閾値未満なら2倍にする。
pub fn effective_garment_value(key: &str, garment_value: f64, body_value: f64, rule: &HalfMeasurementRule) -> f64 {
    let Some(threshold) = rule.threshold(key) else {
        return garment_value;
    };
    let ratio_low = body_value > 0.0 && garment_value / body_value < rule.ratio;
    if ratio_low || garment_value < threshold {
        garment_value * 2.0
    } else {
        garment_value
    }
}

/// 平均点と大小の向きから全体の区分を決める
fn overall_category(score: f64, bigger: bool) -> FitCategory {
    match (score, bigger) {
        (s, _) if s >= 0.85 => FitCategory::Right,
        (s, true) if s >= 0.70 => FitCategory::Loose,
        (s, false) if s >= 0.70 => FitCategory::Tight,
        (s, true) if s >= 0.50 => FitCategory::Oversized,
        (s, false) if s >= 0.50 => FitCategory::Tight,
        (_, true) => FitCategory::TooBig,
        (_, false) => FitCategory::TooSmall,
    }
}

/// 1サイズを採点する
pub fn score_size(row: &SizeRow, user: &UserMeasurements, table: &EaseTable, settings: &FitSettings) -> SizeFit {
    let mut details = Vec::new();
    let mut notes = Vec::new();
    let mut bigger = 0usize;
    let mut smaller = 0usize;

    for (key, &body) in user {
        let (Some(raw), Some(allowance)) = (row.get(key), ease::lookup(table, key)) else {
            continue;
        };
        let garment = effective_garment_value(key, raw, body, &settings.half_measurement);
        let diff = garment - body;
        let (category, score) = fit(garment, body, allowance);

        if diff > 0.0 {
            bigger += 1;
        } else if diff < 0.0 {
            smaller += 1;
        }
        match category {
            FitCategory::Tight => notes.push(format!("{} may be tight", display_name(key))),
            FitCategory::Oversized => notes.push(format!("{} may be very loose", display_name(key))),
            _ => {}
        }
        details.push(MeasurementFit {
            key: key.clone(),
            garment_value: garment,
            body_value: body,
            diff,
            category,
            score,
        });
    }

    let score = if details.is_empty() {
        notes.push("No comparable measurements".to_string());
        0.0
    } else {
        details.iter().map(|d| d.score).sum::<f64>() / details.len() as f64
    };

    SizeFit {
        size: row.size.clone(),
        score,
        fit_category: overall_category(score, bigger >= smaller),
        details,
        notes,
    }
}

/// 推薦を計算する
///
/// # Arguments
/// * `chart` - 復元済みのサイズ表（`rows` を使う）
/// * `user` - 採寸値
/// * `garment_type` - ゆとり量の表の選択
/// * `margin` - ゆったりサイズの余裕
/// * `settings` - 補正の閾値・同点時の方針・ゆとり量の上書き
pub fn recommend(
    chart: &SizeChart,
    user: &UserMeasurements,
    garment_type: GarmentType,
    margin: &BaggyMargin,
    settings: &FitSettings,
) -> Recommendation {
    let rows = &chart.rows;
    if rows.is_empty() {
        return Recommendation::default();
    }
    let table = settings.ease_table(garment_type);

    let mut ranked: Vec<(usize, SizeFit)> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| (i, score_size(row, user, &table, settings)))
        .collect();
    ranked.sort_by(|(ia, a), (ib, b)| {
        let by_score = b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal);
        let by_index = if settings.prefer_larger_on_tie { ib.cmp(ia) } else { ia.cmp(ib) };
        by_score.then(by_index)
    });

    let (right_index, right_fit) = ranked[0].clone();
    let fit_for = |index: usize| ranked.iter().find(|(i, _)| *i == index).map(|(_, f)| f.clone());

    let baggy_index = match margin.margin_type {
        MarginType::Size => baggy_by_size(rows, right_index, margin.value),
        MarginType::Cm | MarginType::Percent => {
            baggy_by_measurement(rows, user, garment_type, margin, &settings.half_measurement)
        }
    };
    let baggy_fit = baggy_index
        .and_then(fit_for)
        .or_else(|| ranked.get(1).map(|(_, f)| f.clone()));

    tracing::debug!(
        right = %right_fit.size,
        baggy = baggy_fit.as_ref().map(|f| f.size.as_str()).unwrap_or("-"),
        "推薦サイズ"
    );

    Recommendation {
        all_sizes: ranked
            .iter()
            .map(|(_, f)| SizeSummary {
                size: f.size.clone(),
                fit_category: f.fit_category,
                score: f.score,
            })
            .collect(),
        right_fit: Some(right_fit),
        baggy_fit,
    }
}

/// N サイズ上の行
///
/// 次のサイズをN回たどり、表に無ければサイズ順でN個先の行を使う。
/// N が0以下なら見つからない扱い。
fn baggy_by_size(rows: &[SizeRow], right_index: usize, steps: f64) -> Option<usize> {
    let steps = steps.round();
    if steps.is_nan() || steps < 1.0 {
        return None;
    }
    // 行数を超える分はどのみち表に無い
    let steps = steps.min(rows.len() as f64) as usize;
    let start = &rows[right_index].size;

    let mut label = Some(start.clone());
    for _ in 0..steps {
        label = label.and_then(|l| sizes::next_size(&l));
        if label.is_none() {
            break;
        }
    }
    if let Some(label) = label {
        if let Some(found) = rows.iter().position(|r| sizes::same_size(&r.size, &label)) {
            return Some(found);
        }
    }

    let labels: Vec<&str> = rows.iter().map(|r| r.size.as_str()).collect();
    let order = sizes::sorted_indices(&labels);
    let position = order.iter().position(|&i| i == right_index)?;
    order.get(position.checked_add(steps)?).copied()
}

/// 基準項目（上衣は胸囲、下衣は胴囲）が目標値に最も近い行
fn baggy_by_measurement(
    rows: &[SizeRow],
    user: &UserMeasurements,
    garment_type: GarmentType,
    margin: &BaggyMargin,
    rule: &HalfMeasurementRule,
) -> Option<usize> {
    let key = garment_type.primary_key();
    let body = *user.get(key)?;
    let target = match margin.margin_type {
        MarginType::Percent => body * (1.0 + margin.value / 100.0),
        _ => body + margin.value,
    };

    let mut best: Option<(usize, f64)> = None;
    for (i, row) in rows.iter().enumerate() {
        let Some(raw) = row.get(key) else {
            continue;
        };
        let distance = (effective_garment_value(key, raw, body, rule) - target).abs();
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((i, distance));
        }
    }
    best.map(|(i, _)| i)
}
