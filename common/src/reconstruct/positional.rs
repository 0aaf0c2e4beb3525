//! 位置合わせによる最終手段
//!
//! 単独のサイズ名と数値を含む行を別々に集め、出現順で対応させる。
//! 数値行の数がサイズ数と同じなら1行1サイズ、そうでなければ1行1計測項目とみなす。

use super::row_based::DEFAULT_KEYS;
use super::text::{self, Column};
use super::{ParseSettings, ParsedTable};
use crate::sizes;
use crate::vocabulary::{self, unique_key, Measurement};

/// 数値を含む1行（行内のキーワードがあれば一緒に持つ）
struct NumberLine {
    keyword: Option<Measurement>,
    values: Vec<f64>,
}

pub fn parse(text: &str, settings: &ParseSettings) -> Option<ParsedTable> {
    let mut labels: Vec<String> = Vec::new();
    let mut header: Vec<Measurement> = Vec::new();
    let mut number_lines: Vec<NumberLine> = Vec::new();

    for line in text::lines(text) {
        if vocabulary::is_ignored_line(line) {
            continue;
        }
        for token in text::tokens(line) {
            if sizes::is_letter_size(token) {
                let label = sizes::normalize_label(token);
                if !labels.iter().any(|l| sizes::same_size(l, &label)) {
                    labels.push(label);
                }
            }
        }

        let values = text::extract_numbers(line);
        if values.is_empty() {
            if let Some(keys) = text::header_keys(line) {
                header.extend(keys);
            }
            continue;
        }
        number_lines.push(NumberLine {
            keyword: vocabulary::first_keyword(line),
            values,
        });
    }

    if labels.len() < 2 || number_lines.is_empty() {
        return None;
    }

    if number_lines.len() == labels.len() {
        // 1行1サイズ
        let measurements = if header.is_empty() { DEFAULT_KEYS.to_vec() } else { header };
        let keys = text::unique_keys(&measurements);
        let rows = labels
            .iter()
            .zip(&number_lines)
            .map(|(label, line)| text::row_from_values(label, &keys, &line.values))
            .collect();
        return ParsedTable::accept(keys, rows, 2);
    }

    // 1行1計測項目
    let mut queue = header.into_iter();
    let mut columns: Vec<Column> = Vec::new();
    for line in number_lines {
        let used = text::used_keys(&columns);
        let key = match line.keyword.or_else(|| queue.next()) {
            Some(m) => unique_key(m.key(), &used),
            None => settings.magnitude.infer_key(&line.values, &used),
        };
        columns.push(Column::new(key, line.values));
    }
    let rows = text::rows_from_columns(&labels, &columns);
    let headers = columns.iter().map(|c| c.key.clone()).collect();
    ParsedTable::accept(headers, rows, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Option<ParsedTable> {
        parse(text, &ParseSettings::default())
    }

    #[test]
    fn test_row_major() {
        let text = "sizes: S / M\nmeasurements 44 100 68 60\nnext 45 104 70 62";
        let table = run(text).expect("表が見つからない");
        assert_eq!(table.rows[0].size, "S");
        assert_eq!(table.rows[0].get("chest"), Some(100.0));
        assert_eq!(table.rows[1].get("sleeve"), Some(62.0));
    }

    #[test]
    fn test_column_major() {
        let text = "available in S, M, L\nChest: 100 / 104 / 108\nLength: 68 / 70 / 72";
        let table = run(text).expect("表が見つからない");
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[2].get("chest"), Some(108.0));
        assert_eq!(table.rows[1].get("length"), Some(70.0));
    }

    #[test]
    fn test_needs_two_sizes() {
        assert!(run("S only\n100 104").is_none());
    }
}
