//! ゆとり量（仕上がり寸法 − ヌード寸法）の表
//!
//! 値はすべてcm。`min` 未満はきつく、`ideal` が最も合い、`max` を超えると大きすぎる。

use crate::types::GarmentType;
use crate::vocabulary::base_key;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EaseAllowance {
    pub min: f64,
    pub ideal: f64,
    pub max: f64,
}

impl EaseAllowance {
    pub const fn new(min: f64, ideal: f64, max: f64) -> Self {
        Self { min, ideal, max }
    }
}

/// 計測キー → ゆとり量
pub type EaseTable = BTreeMap<String, EaseAllowance>;

fn table(entries: &[(&str, EaseAllowance)]) -> EaseTable {
    entries.iter().map(|(k, e)| (k.to_string(), *e)).collect()
}

lazy_static! {
    static ref TOP_EASE: EaseTable = table(&[
        ("chest", EaseAllowance::new(0.0, 2.0, 8.0)),
        ("shoulder", EaseAllowance::new(-1.0, 1.0, 3.0)),
        ("sleeve", EaseAllowance::new(-2.0, 0.0, 3.0)),
        ("length", EaseAllowance::new(-3.0, 0.0, 4.0)),
        ("waist", EaseAllowance::new(0.0, 2.0, 10.0)),
        ("hip", EaseAllowance::new(0.0, 2.0, 8.0)),
        ("hem", EaseAllowance::new(0.0, 4.0, 12.0)),
    ]);

    static ref BOTTOM_EASE: EaseTable = table(&[
        ("waist", EaseAllowance::new(-2.0, 0.0, 4.0)),
        ("hip", EaseAllowance::new(0.0, 3.0, 8.0)),
        ("thigh", EaseAllowance::new(0.0, 3.0, 8.0)),
        ("inseam", EaseAllowance::new(-3.0, 0.0, 3.0)),
        ("length", EaseAllowance::new(-3.0, 0.0, 4.0)),
        ("pantsLength", EaseAllowance::new(-3.0, 0.0, 4.0)),
        ("legOpening", EaseAllowance::new(-2.0, 2.0, 8.0)),
        ("hem", EaseAllowance::new(-2.0, 2.0, 8.0)),
        ("rise", EaseAllowance::new(-2.0, 0.0, 3.0)),
    ]);
}

/// 種別ごとの既定のゆとり量
pub fn default_table(garment_type: GarmentType) -> &'static EaseTable {
    match garment_type {
        GarmentType::Top => &TOP_EASE,
        GarmentType::Bottom => &BOTTOM_EASE,
    }
}

/// キーに対応するゆとり量（`length2` は `length` の値を使う）
pub fn lookup<'a>(table: &'a EaseTable, key: &str) -> Option<&'a EaseAllowance> {
    table.get(key).or_else(|| table.get(base_key(key)))
}
