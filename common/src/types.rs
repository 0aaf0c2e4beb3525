//! サイズ表の型定義
//!
//! CLIと推薦リクエストで共有される型:
//! - SizeRow: 1サイズ分の計測値
//! - SizeTable: 複数表（上下セット等）の1枚
//! - SizeChart: 復元結果全体（最終出力）

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 衣類の種別
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GarmentType {
    /// 上衣
    #[default]
    Top,
    /// 下衣
    Bottom,
}

impl GarmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GarmentType::Top => "top",
            GarmentType::Bottom => "bottom",
        }
    }

    /// 不明な値は上衣として扱う
    pub fn parse_or_top(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// ゆったりサイズ選定の基準になる計測キー
    pub fn primary_key(&self) -> &'static str {
        match self {
            GarmentType::Top => "chest",
            GarmentType::Bottom => "waist",
        }
    }
}

impl std::str::FromStr for GarmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(GarmentType::Top),
            "bottom" => Ok(GarmentType::Bottom),
            _ => Err(format!("Unknown garment type: {}. Use top or bottom", s)),
        }
    }
}

impl std::fmt::Display for GarmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 1サイズ分の行
///
/// JSONでは `{"size": "S", "chest": 100, ...}` のフラットな形になる。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeRow {
    pub size: String,
    #[serde(flatten)]
    pub measurements: BTreeMap<String, f64>,
}

impl SizeRow {
    pub fn new(size: impl Into<String>) -> Self {
        Self {
            size: size.into(),
            measurements: BTreeMap::new(),
        }
    }

    pub fn with(mut self, key: &str, value: f64) -> Self {
        self.measurements.insert(key.to_string(), value);
        self
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.measurements.get(key).copied()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: f64) {
        self.measurements.insert(key.into(), value);
    }

    pub fn key_count(&self) -> usize {
        self.measurements.len()
    }

    /// サイズ名と1つ以上の計測値を持つか
    pub fn is_valid(&self) -> bool {
        !self.size.trim().is_empty() && !self.measurements.is_empty()
    }
}

/// 複数表のうちの1枚
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeTable {
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<SizeRow>,
    #[serde(default)]
    pub garment_type: GarmentType,
}

/// サイズ表の復元結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeChart {
    #[serde(default)]
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<SizeRow>,
    #[serde(default)]
    pub tables: Vec<SizeTable>,
    #[serde(default)]
    pub raw_text: String,
    #[serde(default)]
    pub translated_text: String,
}

impl SizeChart {
    /// 何も見つからなかった場合の空の表
    pub fn empty(raw_text: &str, translated_text: &str) -> Self {
        Self {
            raw_text: raw_text.to_string(),
            translated_text: translated_text.to_string(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.tables.is_empty()
    }

    /// ヘッダーと全行に現れる計測キー（出現順・重複なし）
    pub fn measurement_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        let row_keys = self.rows.iter().flat_map(|r| r.measurements.keys());
        for key in self.headers.iter().chain(row_keys) {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }
        keys
    }
}
