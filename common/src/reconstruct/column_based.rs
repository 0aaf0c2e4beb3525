//! 列形式・インライン形式・縦並び形式
//!
//! - 列形式: `S M L XL` の見出し行の後に、計測項目ごとの値行が続く
//! - インライン形式: `Chest S:100 M:104 L:108` のように計測行にサイズと値が並ぶ
//! - 縦並び形式: サイズ名だけの行の後に、そのサイズの値が続く
//!
//! 3つを試して最も得点の高いものを返す。

use super::row_based::DEFAULT_KEYS;
use super::text::{self, Column};
use super::{ParseSettings, ParsedTable};
use crate::sizes;
use crate::types::SizeRow;
use crate::vocabulary::{self, unique_key, Measurement};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::VecDeque;

lazy_static! {
    /// `S:100` / `M 104` / `XL：112`
    static ref PAIR_RE: Regex = Regex::new(
        r"(?i)\b(XXXL|XXL|XXS|[2-5]XL|XS|XL|S|M|L)\s*[:：=]?\s*(\d{2,3}(?:\.\d+)?)\b"
    )
    .unwrap();
}

pub fn parse(text: &str, settings: &ParseSettings) -> Option<ParsedTable> {
    let lines = text::lines(text);
    ParsedTable::best([
        column_layout(&lines, settings),
        inline_layout(&lines),
        vertical_layout(&lines),
    ])
}

/// サイズ見出し行＋計測ごとの値行
fn column_layout(lines: &[&str], settings: &ParseSettings) -> Option<ParsedTable> {
    let index = lines.iter().position(|l| text::size_only_line(l).is_some())?;
    let labels = text::size_only_line(lines[index])?;

    let mut columns: Vec<Column> = Vec::new();
    let mut queue: VecDeque<Measurement> = VecDeque::new();

    // 見出しより前のキーワードだけの行も列名の候補にする
    for line in &lines[..index] {
        if let Some(keys) = text::header_keys(line) {
            queue.extend(keys);
        }
    }

    for line in &lines[index + 1..] {
        if vocabulary::is_ignored_line(line) {
            continue;
        }
        let segments = vocabulary::keyword_segments(line);
        if segments.is_empty() {
            let numbers = text::extract_numbers(line);
            if numbers.is_empty() {
                continue;
            }
            let used = text::used_keys(&columns);
            let key = match queue.pop_front() {
                Some(m) => unique_key(m.key(), &used),
                None if numbers.len() >= labels.len() => settings.magnitude.infer_key(&numbers, &used),
                None => continue,
            };
            columns.push(Column::new(key, numbers));
            continue;
        }

        for (m, rest) in segments {
            let numbers = text::extract_numbers(rest);
            if numbers.is_empty() {
                queue.push_back(m);
                continue;
            }
            let used = text::used_keys(&columns);
            columns.push(Column::new(unique_key(m.key(), &used), numbers));
        }
    }

    let rows = text::rows_from_columns(&labels, &columns);
    let headers = columns.iter().map(|c| c.key.clone()).collect();
    ParsedTable::accept(headers, rows, 2)
}

/// 計測行に `<SIZE> <値>` の組が並ぶ形式
fn inline_layout(lines: &[&str]) -> Option<ParsedTable> {
    let mut headers: Vec<String> = Vec::new();
    let mut rows: Vec<SizeRow> = Vec::new();

    for line in lines {
        if vocabulary::is_ignored_line(line) {
            continue;
        }
        for (m, rest) in vocabulary::keyword_segments(line) {
            let pairs: Vec<(String, f64)> = PAIR_RE
                .captures_iter(rest)
                .filter_map(|caps| {
                    let value = caps[2].parse::<f64>().ok()?;
                    Some((sizes::normalize_label(&caps[1]), value))
                })
                .collect();
            if pairs.len() < 2 {
                continue;
            }

            let key = unique_key(m.key(), &headers);
            for (size, value) in pairs {
                match rows.iter_mut().find(|r| sizes::same_size(&r.size, &size)) {
                    Some(row) => {
                        if row.get(&key).is_none() {
                            row.insert(key.clone(), value);
                        }
                    }
                    None => rows.push(SizeRow::new(size).with(&key, value)),
                }
            }
            headers.push(key);
        }
    }

    ParsedTable::accept(headers, rows, 2)
}

/// 縦並びの1サイズ分
struct Block {
    size: Option<String>,
    keyed: Vec<(Measurement, f64)>,
    trailing: Vec<f64>,
}

impl Block {
    fn new(size: Option<String>) -> Self {
        Self {
            size,
            keyed: Vec::new(),
            trailing: Vec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.keyed.is_empty() && self.trailing.is_empty()
    }

    fn into_row(self, size: String, keys: &[String]) -> SizeRow {
        let mut row = SizeRow::new(size);
        let mut used: Vec<String> = Vec::new();
        for (m, value) in self.keyed {
            let key = unique_key(m.key(), &used);
            row.insert(key.clone(), value);
            used.push(key);
        }
        for (key, value) in keys.iter().zip(&self.trailing) {
            if row.get(key).is_none() {
                row.insert(key.clone(), *value);
            }
        }
        row
    }
}

/// サイズ名の行の後に値が続く形式
fn vertical_layout(lines: &[&str]) -> Option<ParsedTable> {
    let mut header: Option<Vec<Measurement>> = None;
    let mut blocks: Vec<Block> = Vec::new();
    let mut current = Block::new(None);

    for line in lines {
        if vocabulary::is_ignored_line(line) {
            continue;
        }

        let body = match sizes::leading_letter_size(line) {
            Some((size, rest)) => {
                blocks.push(std::mem::replace(&mut current, Block::new(Some(size))));
                rest
            }
            None => line,
        };

        let segments = vocabulary::keyword_segments(body);
        if segments.is_empty() {
            current.trailing.extend(text::extract_numbers(body));
            continue;
        }
        let mut any_value = false;
        for (m, rest) in segments {
            if let Some(value) = text::extract_numbers(rest).first() {
                current.keyed.push((m, *value));
                any_value = true;
            }
        }
        if !any_value && current.size.is_none() && blocks.iter().all(|b| b.size.is_none()) {
            if let Some(found) = text::header_keys(line) {
                header.get_or_insert_with(Vec::new).extend(found);
            }
        }
    }
    blocks.push(current);

    let keys = text::unique_keys(header.as_deref().unwrap_or(&DEFAULT_KEYS));
    let labeled: Vec<&Block> = blocks.iter().filter(|b| b.size.is_some()).collect();
    if labeled.len() < 2 {
        return None;
    }

    let mut rows: Vec<SizeRow> = Vec::new();
    let mut leading: Option<Block> = None;
    for block in blocks {
        match block.size.clone() {
            Some(size) => {
                // 値の個数が列数と合わない末尾の数値は採らない
                let trailing_ok = block.trailing.is_empty() || block.trailing.len() == keys.len();
                let block = if trailing_ok {
                    block
                } else {
                    Block {
                        trailing: Vec::new(),
                        ..block
                    }
                };
                if block.is_empty() || rows.iter().any(|r| sizes::same_size(&r.size, &size)) {
                    continue;
                }
                rows.push(block.into_row(size, &keys));
            }
            None if !block.keyed.is_empty() => leading = Some(block),
            None => {}
        }
    }

    // 最初のラベルより前の計測行はラベルの欠けた `S` とみなす
    if let Some(block) = leading {
        if !rows.iter().any(|r| sizes::same_size(&r.size, "S")) {
            tracing::debug!("ラベルの無い先頭ブロックを S として補完");
            rows.insert(0, block.into_row("S".to_string(), &keys));
        }
    }

    let mut headers: Vec<String> = Vec::new();
    for row in &rows {
        for key in row.measurements.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }
    let ordered: Vec<String> = keys
        .iter()
        .filter(|k| headers.contains(k))
        .cloned()
        .chain(headers.iter().filter(|k| !keys.contains(k)).cloned())
        .collect();
    ParsedTable::accept(ordered, rows, 2)
}
