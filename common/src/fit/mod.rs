//! 採寸値とサイズ表の照合
//!
//! 補正の閾値・同点時の方針・ゆとり量はすべて `FitSettings` で差し替えられる。

pub mod ease;
pub mod scorer;

use crate::types::GarmentType;
use crate::vocabulary::base_key;
use ease::EaseTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use ease::EaseAllowance;
pub use scorer::{
    fit, recommend, BaggyMargin, FitCategory, MarginType, MeasurementFit, Recommendation, SizeFit, SizeSummary,
    UserMeasurements,
};

/// 平置き（半周）寸法の判定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HalfMeasurementRule {
    /// 仕上がり寸法 / ヌード寸法 がこれ未満なら半周とみなす
    pub ratio: f64,
    /// キーごとの絶対値の閾値（この表にあるキーだけ補正する）
    pub thresholds: BTreeMap<String, f64>,
}

impl Default for HalfMeasurementRule {
    fn default() -> Self {
        Self {
            ratio: 0.7,
            thresholds: [("chest", 70.0), ("waist", 50.0), ("hip", 50.0)]
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        }
    }
}

impl HalfMeasurementRule {
    pub fn threshold(&self, key: &str) -> Option<f64> {
        self.thresholds
            .get(key)
            .or_else(|| self.thresholds.get(base_key(key)))
            .copied()
    }
}

/// 種別ごとのゆとり量の上書き
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EaseOverrides {
    #[serde(default)]
    pub top: EaseTable,
    #[serde(default)]
    pub bottom: EaseTable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitSettings {
    #[serde(default)]
    pub half_measurement: HalfMeasurementRule,
    /// 同点なら大きいサイズを優先する
    #[serde(default = "default_true")]
    pub prefer_larger_on_tie: bool,
    #[serde(default)]
    pub ease_overrides: EaseOverrides,
}

fn default_true() -> bool {
    true
}

impl Default for FitSettings {
    fn default() -> Self {
        Self {
            half_measurement: HalfMeasurementRule::default(),
            prefer_larger_on_tie: true,
            ease_overrides: EaseOverrides::default(),
        }
    }
}

impl FitSettings {
    /// 既定の表に上書きを重ねたゆとり量
    pub fn ease_table(&self, garment_type: GarmentType) -> EaseTable {
        let overrides = match garment_type {
            GarmentType::Top => &self.ease_overrides.top,
            GarmentType::Bottom => &self.ease_overrides.bottom,
        };
        let mut table = ease::default_table(garment_type).clone();
        table.extend(overrides.iter().map(|(k, v)| (k.clone(), *v)));
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_merges() {
        let mut settings = FitSettings::default();
        settings
            .ease_overrides
            .top
            .insert("chest".into(), EaseAllowance::new(2.0, 6.0, 14.0));
        let table = settings.ease_table(GarmentType::Top);
        assert_eq!(table["chest"], EaseAllowance::new(2.0, 6.0, 14.0));
        assert!(table.contains_key("shoulder"));
        assert_eq!(settings.ease_table(GarmentType::Bottom), *ease::default_table(GarmentType::Bottom));
    }

    #[test]
    fn test_settings_from_partial_json() {
        let settings: FitSettings = serde_json::from_str(r#"{"halfMeasurement":{"ratio":0.6,"thresholds":{}}}"#).unwrap();
        assert!(settings.prefer_larger_on_tie);
        assert_eq!(settings.half_measurement.ratio, 0.6);
        assert_eq!(settings.half_measurement.threshold("chest"), None);
    }

    #[test]
    fn test_threshold_suffixed_key() {
        let rule = HalfMeasurementRule::default();
        assert_eq!(rule.threshold("waist2"), Some(50.0));
        assert_eq!(rule.threshold("sleeve"), None);
    }
}
