//! 列グループ形式
//!
//! サイズ名が先に縦に並び、その後に計測項目ごとの値がサイズ順に続く形式。
//!
//! ```text
//! S(36)
//! M(38)
//! L(40)
//! Chest
//! 100
//! 104
//! 108
//! ```
//!
//! OCRが `M` を `1` と読むことがあるため、`S` の直後の `1` は `M` として扱う。

use super::text::{self, Column};
use super::{ParseSettings, ParsedTable};
use crate::sizes;
use crate::vocabulary::{self, unique_key};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// 単独のサイズ名（括弧内の別表記は任意）
    static ref LABEL_RE: Regex = Regex::new(
        r"^(?i)(XXXL|XXL|XXS|[2-5]XL|XS|XL|S|M|L|1)\s*(?:[(\[][A-Za-z0-9/.\- ]*[)\]])?$"
    )
    .unwrap();
}

/// 1行がサイズ名なら正規化して返す
fn parse_label(line: &str, previous: Option<&String>) -> Option<String> {
    let caps = LABEL_RE.captures(line.trim())?;
    let label = sizes::normalize_label(&caps[1]);
    if label == "1" {
        return match previous {
            Some(prev) if prev == "S" => Some("M".to_string()),
            _ => None,
        };
    }
    Some(label)
}

pub fn parse(text: &str, _settings: &ParseSettings) -> Option<ParsedTable> {
    let lines = text::lines(text);
    let mut labels: Vec<String> = Vec::new();
    let mut columns: Vec<Column> = Vec::new();
    let mut current: Option<Column> = None;
    let mut seen_keyword = false;

    for line in lines {
        if !seen_keyword {
            if let Some(label) = parse_label(line, labels.last()) {
                if !labels.iter().any(|l| sizes::same_size(l, &label)) {
                    labels.push(label);
                }
                continue;
            }
            if let Some(group) = text::size_only_line(line) {
                for label in group {
                    if !labels.iter().any(|l| sizes::same_size(l, &label)) {
                        labels.push(label);
                    }
                }
                continue;
            }
        }

        if vocabulary::is_ignored_line(line) {
            continue;
        }

        let segments = vocabulary::keyword_segments(line);
        if !segments.is_empty() {
            if labels.len() < 2 {
                return None;
            }
            seen_keyword = true;
            for (m, rest) in segments {
                if let Some(done) = current.take() {
                    columns.push(done);
                }
                let used = text::used_keys(&columns);
                current = Some(Column::new(unique_key(m.key(), &used), text::extract_numbers(rest)));
            }
            continue;
        }

        if let Some(column) = current.as_mut() {
            column.values.extend(text::extract_numbers(line));
        }
    }
    if let Some(done) = current.take() {
        columns.push(done);
    }

    columns.retain(|c| !c.values.is_empty());
    if labels.len() < 2 || columns.is_empty() {
        return None;
    }

    let rows = text::rows_from_columns(&labels, &columns);
    let headers = columns.iter().map(|c| c.key.clone()).collect();
    ParsedTable::accept(headers, rows, 2)
}
