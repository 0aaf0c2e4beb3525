//! 小さい表のOCR欠落の復元
//!
//! よくある2つの欠落を補う:
//! 1. 最小サイズのラベルが丸ごと落ち、値だけが見出し行の直後に残る
//!    → 最初のラベル付き行の1つ下のサイズ（通常は `S`）とみなす
//! 2. 隣り合う2サイズの値が1行に交互に混ざり、片方のラベルが無い
//!    → 偶数番目を元のサイズ、奇数番目を次のサイズに振り分ける
//!
//! どちらの復元も起きなければ何も返さない（通常の行形式は別の戦略が読む）。

use super::text;
use super::{ParseSettings, ParsedTable};
use crate::sizes;
use crate::vocabulary::{self, Measurement};

const MIN_ROWS: usize = 3;

/// 連続するキーワードだけの行を見出しとして読む
fn find_header(lines: &[&str]) -> Option<(usize, Vec<Measurement>)> {
    let start = lines.iter().position(|l| text::header_keys(l).is_some())?;
    let mut keys = Vec::new();
    let mut end = start;
    while let Some(found) = lines.get(end).and_then(|l| text::header_keys(l)) {
        keys.extend(found);
        end += 1;
    }
    (keys.len() >= 2).then_some((end, keys))
}

pub fn parse(text: &str, _settings: &ParseSettings) -> Option<ParsedTable> {
    let lines = text::lines(text);
    let (body_start, measurements) = find_header(&lines)?;
    let keys = text::unique_keys(&measurements);
    let width = keys.len();

    let body = &lines[body_start..];
    let present: Vec<String> = body
        .iter()
        .filter_map(|l| sizes::leading_letter_size(l).map(|(size, _)| size))
        .collect();

    let mut rows: Vec<(String, Vec<f64>)> = Vec::new();
    let mut unlabeled: Option<Vec<f64>> = None;
    let mut recovered = false;

    for (offset, line) in body.iter().enumerate() {
        if vocabulary::is_ignored_line(line) {
            continue;
        }

        if let Some((size, rest)) = sizes::leading_letter_size(line) {
            let numbers = text::extract_numbers(rest);
            if numbers.is_empty() {
                continue;
            }
            if numbers.len() >= width * 2 {
                if let Some(next) = sizes::next_size(&size) {
                    if !present.iter().any(|p| sizes::same_size(p, &next)) {
                        let (evens, odds) = split_interleaved(&numbers[..width * 2]);
                        tracing::debug!(size = %size, next = %next, "交互に混ざった2サイズを分離");
                        rows.push((size, evens));
                        rows.push((next, odds));
                        recovered = true;
                        continue;
                    }
                }
            }
            rows.push((size, numbers));
            continue;
        }

        // 見出し直後のラベル無し数値行
        if offset == 0 && rows.is_empty() {
            let numbers = text::extract_numbers(line);
            if numbers.len() >= width {
                unlabeled = Some(numbers);
            }
        }
    }

    if let Some(values) = unlabeled {
        let label = rows
            .first()
            .and_then(|(first, _)| sizes::previous_size(first))
            .unwrap_or_else(|| "S".to_string());
        if !rows.iter().any(|(size, _)| sizes::same_size(size, &label)) {
            tracing::debug!(size = %label, "ラベルの欠けた最小サイズを補完");
            rows.insert(0, (label, values));
            recovered = true;
        }
    }

    if !recovered {
        return None;
    }

    let mut table_rows = Vec::new();
    for (size, values) in &rows {
        if table_rows.iter().any(|r: &crate::types::SizeRow| sizes::same_size(&r.size, size)) {
            continue;
        }
        table_rows.push(text::row_from_values(size, &keys, values));
    }
    ParsedTable::accept(keys, table_rows, MIN_ROWS)
}

/// 偶数番目と奇数番目に分ける
fn split_interleaved(values: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let evens = values.iter().step_by(2).copied().collect();
    let odds = values.iter().skip(1).step_by(2).copied().collect();
    (evens, odds)
}
