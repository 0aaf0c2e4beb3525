//! OCRテキストからのサイズ表復元
//!
//! ## 処理フロー
//! 1. OCRの誤認識を補正（全角→半角、`$`/`S`→`5` など）
//! 2. 中国語の用語を英語に置き換える
//! 3. `Size S M L` 型の見出しで区切られた複数表を探す
//! 4. 見つからなければ単一表の戦略を順に試し、得点の最も高い結果を採る
//!
//! どの段階も失敗で止まらない。何も読めなければ空の表を返す。

pub mod column_based;
pub mod column_grouped;
pub mod magnitude;
pub mod multi_table;
pub mod numeric;
pub mod ocr_recovery;
pub mod positional;
pub mod row_based;
pub mod text;

use crate::dictionary;
use crate::ocr_fix::fix_ocr_errors;
use crate::sizes;
use crate::types::{SizeChart, SizeRow};
use magnitude::MagnitudeRules;
use serde::{Deserialize, Serialize};

/// 復元の設定
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseSettings {
    /// キーワードの無い数値行を推定する範囲
    #[serde(default)]
    pub magnitude: MagnitudeRules,
}

/// 1つの戦略が組み立てた表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<SizeRow>,
}

impl ParsedTable {
    /// 行を整えて表として採用できるか判定する
    ///
    /// 空の行と重複サイズを除き、サイズ順に並べ、実際に値のある列だけを
    /// 見出しに残す。`min_rows` 行に満たなければ `None`。
    pub fn accept(headers: Vec<String>, rows: Vec<SizeRow>, min_rows: usize) -> Option<Self> {
        let mut kept: Vec<SizeRow> = Vec::new();
        for row in rows.into_iter().filter(SizeRow::is_valid) {
            if kept.iter().any(|r| sizes::same_size(&r.size, &row.size)) {
                continue;
            }
            kept.push(row);
        }
        if kept.len() < min_rows {
            return None;
        }
        sizes::sort_rows_by_size(&mut kept);

        let mut present: Vec<String> = Vec::new();
        for key in headers {
            if !present.contains(&key) && kept.iter().any(|r| r.get(&key).is_some()) {
                present.push(key);
            }
        }
        Some(Self {
            headers: present,
            rows: kept,
        })
    }

    /// 行数 × 先頭行の計測数
    pub fn score(&self) -> usize {
        self.rows.len() * self.rows.first().map(SizeRow::key_count).unwrap_or(0)
    }

    /// 最も得点の高い候補（同点なら先のもの）
    pub fn best<I>(candidates: I) -> Option<Self>
    where
        I: IntoIterator<Item = Option<Self>>,
    {
        let mut best: Option<Self> = None;
        for candidate in candidates.into_iter().flatten() {
            let better = match &best {
                Some(current) => candidate.score() > current.score(),
                None => true,
            };
            if better {
                best = Some(candidate);
            }
        }
        best
    }
}

/// 単一表の戦略
type Strategy = fn(&str, &ParseSettings) -> Option<ParsedTable>;

/// 優先順
const STRATEGIES: &[(&str, Strategy)] = &[
    ("column_grouped", column_grouped::parse),
    ("ocr_recovery", ocr_recovery::parse),
    ("numeric", numeric::parse),
    ("row_based", row_based::parse),
    ("column_based", column_based::parse),
    ("positional", positional::parse),
];

/// 既定の設定で復元する
pub fn reconstruct(raw: Option<&str>) -> SizeChart {
    reconstruct_with(raw, &ParseSettings::default())
}

/// 設定を指定して復元する
///
/// # Arguments
/// * `raw` - OCRテキスト（`None` や空白のみなら空の表）
/// * `settings` - 数値行の推定範囲など
pub fn reconstruct_with(raw: Option<&str>, settings: &ParseSettings) -> SizeChart {
    let raw = raw.unwrap_or_default();
    if raw.trim().is_empty() {
        return SizeChart::empty(raw, "");
    }

    let fixed = fix_ocr_errors(raw);
    let translated = dictionary::translate(&fixed);
    let mut chart = SizeChart::empty(raw, &translated);

    let tables = multi_table::detect_tables(&translated, &settings.magnitude);
    if let Some(first) = tables.first() {
        tracing::info!(tables = tables.len(), "見出し区切りの表を検出");
        chart.headers = first.headers.clone();
        chart.rows = first.rows.clone();
        chart.tables = tables;
        return chart;
    }

    let candidates = STRATEGIES.iter().map(|&(name, strategy)| {
        let table = strategy(&translated, settings);
        if let Some(table) = &table {
            tracing::debug!(strategy = name, rows = table.rows.len(), score = table.score(), "候補");
        }
        table
    });

    match ParsedTable::best(candidates) {
        Some(table) => {
            tracing::info!(rows = table.rows.len(), score = table.score(), "サイズ表を復元");
            chart.headers = table.headers;
            chart.rows = table.rows;
        }
        None => tracing::info!("サイズ表が見つからない"),
    }
    chart
}
