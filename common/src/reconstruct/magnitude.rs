//! キーワードのない数値行の推定
//!
//! 平均値の大きさから計測項目を推定する。範囲は実例から決めたもので、
//! 子供服や大きいサイズでは外れることがある。設定で差し替えられる。

use crate::vocabulary::unique_key;
use serde::{Deserialize, Serialize};

/// 平均値の範囲 [min, max) と候補キー（優先順）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagnitudeRule {
    pub min: f64,
    pub max: f64,
    pub candidates: Vec<String>,
}

impl MagnitudeRule {
    fn new(min: f64, max: f64, candidates: &[&str]) -> Self {
        Self {
            min,
            max,
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
        }
    }

    fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagnitudeRules {
    pub rules: Vec<MagnitudeRule>,
    /// どの範囲にも入らない場合のキー
    pub fallback_key: String,
}

impl Default for MagnitudeRules {
    fn default() -> Self {
        Self {
            rules: vec![
                MagnitudeRule::new(90.0, 200.0, &["pantsLength", "hip", "chest"]),
                MagnitudeRule::new(60.0, 90.0, &["length", "waist", "hip"]),
                MagnitudeRule::new(50.0, 60.0, &["sleeve", "thigh"]),
                MagnitudeRule::new(35.0, 50.0, &["shoulder", "thigh"]),
                MagnitudeRule::new(22.0, 35.0, &["rise", "thigh", "legOpening"]),
                MagnitudeRule::new(10.0, 22.0, &["legOpening", "hem"]),
            ],
            fallback_key: "measurement".to_string(),
        }
    }
}

impl MagnitudeRules {
    /// 値の並びから計測キーを推定する
    ///
    /// 範囲内の候補のうち未使用の最初のものを返す。全て使用済みなら
    /// 先頭の候補に連番を付ける。
    pub fn infer_key(&self, values: &[f64], used: &[String]) -> String {
        if values.is_empty() {
            return unique_key(&self.fallback_key, used);
        }
        let average = values.iter().sum::<f64>() / values.len() as f64;

        for rule in self.rules.iter().filter(|r| r.contains(average)) {
            if let Some(free) = rule.candidates.iter().find(|c| !used.contains(c)) {
                return free.clone();
            }
            if let Some(first) = rule.candidates.first() {
                return unique_key(first, used);
            }
        }
        unique_key(&self.fallback_key, used)
    }
}
