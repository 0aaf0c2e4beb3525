//! 行形式
//!
//! 各行がサイズ名で始まり、その後に値が並ぶ最も素直な形式。
//! 列の割り当ては先に現れるキーワード見出しに従い、見出しが無ければ
//! `shoulder, chest, length, sleeve` の順とみなす。

use super::text;
use super::{ParseSettings, ParsedTable};
use crate::sizes;
use crate::types::SizeRow;
use crate::vocabulary::{self, Measurement};

/// 見出しが無いときの列順
pub const DEFAULT_KEYS: [Measurement; 4] = [
    Measurement::Shoulder,
    Measurement::Chest,
    Measurement::Length,
    Measurement::Sleeve,
];

pub fn parse(text: &str, _settings: &ParseSettings) -> Option<ParsedTable> {
    let mut header: Option<Vec<Measurement>> = None;
    let mut rows: Vec<SizeRow> = Vec::new();

    for line in text::lines(text) {
        if vocabulary::is_ignored_line(line) {
            continue;
        }
        if let Some((size, rest)) = sizes::leading_letter_size(line) {
            let values = text::extract_numbers(rest);
            if values.is_empty() || rows.iter().any(|r| sizes::same_size(&r.size, &size)) {
                continue;
            }
            let keys = text::unique_keys(header.as_deref().unwrap_or(&DEFAULT_KEYS));
            rows.push(text::row_from_values(&size, &keys, &values));
        } else if rows.is_empty() {
            if let Some(found) = text::header_keys(line) {
                if found.len() >= 2 {
                    header = Some(found);
                }
            }
        }
    }

    let keys = text::unique_keys(header.as_deref().unwrap_or(&DEFAULT_KEYS));
    ParsedTable::accept(keys, rows, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Option<ParsedTable> {
        parse(text, &ParseSettings::default())
    }

    #[test]
    fn test_rows_with_header() {
        let text = "Size Chest Length Sleeve\nS 100 68 60\nM 104 70 62\nL 108 72 64";
        let table = run(text).expect("表が見つからない");
        assert_eq!(table.headers, vec!["chest", "length", "sleeve"]);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[1].get("length"), Some(70.0));
    }

    #[test]
    fn test_rows_default_order() {
        let text = "S 44 100 68 60\nM 45 104 70 62";
        let table = run(text).expect("表が見つからない");
        assert_eq!(table.rows[0].get("shoulder"), Some(44.0));
        assert_eq!(table.rows[0].get("chest"), Some(100.0));
        assert_eq!(table.rows[1].get("sleeve"), Some(62.0));
    }

    #[test]
    fn test_rows_sorted_and_uppercased() {
        let text = "Chest Length\nxl 112 74\ns 100 68\nm 104 70";
        let table = run(text).expect("表が見つからない");
        let sizes: Vec<&str> = table.rows.iter().map(|r| r.size.as_str()).collect();
        assert_eq!(sizes, vec!["S", "M", "XL"]);
    }

    #[test]
    fn test_partial_rows_kept() {
        let text = "Chest Length Sleeve\nS 100 68\nM 104 70 62";
        let table = run(text).expect("表が見つからない");
        assert_eq!(table.rows[0].get("sleeve"), None);
        assert_eq!(table.rows[1].get("sleeve"), Some(62.0));
    }

    #[test]
    fn test_single_row_rejected() {
        assert!(run("S 100 68").is_none());
    }
}
