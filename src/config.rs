use crate::error::{Result, SizeChartError};
use serde::{Deserialize, Serialize};
use sizechart_common::{FitSettings, ParseSettings};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// 表の復元（数値行の推定範囲）
    #[serde(default)]
    pub parse: ParseSettings,
    /// 照合（ゆとり量の上書き・半周判定・同点時の方針）
    #[serde(default)]
    pub fit: FitSettings,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(config_path)
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SizeChartError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("sizechart").join("config.json"))
    }

    /// 範囲やゆとり量の矛盾を検出する
    pub fn validate(&self) -> Result<()> {
        for rule in &self.parse.magnitude.rules {
            if rule.min >= rule.max {
                return Err(SizeChartError::Config(format!(
                    "推定範囲が不正です: {} - {}",
                    rule.min, rule.max
                )));
            }
            if rule.candidates.is_empty() {
                return Err(SizeChartError::Config(format!(
                    "推定範囲 {} - {} に候補キーがありません",
                    rule.min, rule.max
                )));
            }
        }

        let half = &self.fit.half_measurement;
        if half.ratio <= 0.0 || half.ratio >= 1.0 {
            return Err(SizeChartError::Config(format!("半周判定の比率が不正です: {}", half.ratio)));
        }

        let overrides = self.fit.ease_overrides.top.iter().chain(&self.fit.ease_overrides.bottom);
        for (key, ease) in overrides {
            if !(ease.min <= ease.ideal && ease.ideal <= ease.max) {
                return Err(SizeChartError::Config(format!(
                    "ゆとり量が不正です ({}): min <= ideal <= max を満たしていません",
                    key
                )));
            }
        }
        Ok(())
    }
}
