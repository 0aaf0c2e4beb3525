//! 数字サイズ形式
//!
//! サイズが文字ではなく小さい整数（1〜9）やEU表記（44〜58）の表。
//! 改行が失われて1行になったOCR出力は、キーワードの前で改行し直してから読む。

use super::row_based::DEFAULT_KEYS;
use super::text::{self, Column};
use super::{ParseSettings, ParsedTable};
use crate::sizes::{self, SizeScale};
use crate::vocabulary::{self, unique_key, Measurement};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LEADING_NUMBER_RE: Regex = Regex::new(r"^\s*(\d{1,2})\b(.*)$").unwrap();
}

/// 改行の失われた行を、キーワードと `size` の前で区切り直す
///
/// 数値を伴うキーワードが無い行（見出し行など）はそのまま残す。
pub fn reflow(text: &str) -> String {
    let mut out: Vec<String> = Vec::new();
    for line in text.lines() {
        let has_valued_keyword = vocabulary::keyword_segments(line)
            .iter()
            .any(|(_, rest)| !text::extract_numbers(rest).is_empty());
        if !has_valued_keyword {
            out.push(line.to_string());
            continue;
        }

        let mut breaks: Vec<usize> = vocabulary::find_keywords(line)
            .into_iter()
            .map(|(start, _, _)| start)
            .chain(vocabulary::size_word_positions(line))
            .filter(|&p| p > 0)
            .collect();
        breaks.sort_unstable();
        breaks.dedup();

        let mut last = 0;
        for pos in breaks {
            out.push(line[last..pos].trim().to_string());
            last = pos;
        }
        out.push(line[last..].trim().to_string());
    }
    out.retain(|l| !l.is_empty());
    out.join("\n")
}

/// 数字のサイズ見出し行（`46 48 50 52` や `Size 1 2 3`）
fn numeric_header(line: &str) -> Option<Vec<String>> {
    if vocabulary::first_keyword(line).is_some() {
        return None;
    }
    let body = match vocabulary::size_word_end(line) {
        Some(end) => &line[end..],
        None => line,
    };
    let toks = text::tokens(body);
    if toks.len() < 2 {
        return None;
    }
    let ranks: Option<Vec<(SizeScale, u32)>> = toks
        .iter()
        .map(|t| {
            if t.chars().all(|c| c.is_ascii_digit()) {
                sizes::size_rank(t)
            } else {
                None
            }
        })
        .collect();
    let ranks = ranks?;
    let scale = ranks[0].0;
    if ranks.iter().any(|(s, _)| *s != scale) {
        return None;
    }
    let labels = text::distinct(toks.iter().map(|t| t.to_string()).collect());
    (labels.len() >= 2).then_some(labels)
}

/// サイズ見出し行＋計測行（列ごと）
fn header_layout(lines: &[&str]) -> Option<ParsedTable> {
    let index = lines.iter().position(|l| numeric_header(l).is_some())?;
    let labels = numeric_header(lines[index])?;

    let mut columns: Vec<Column> = Vec::new();
    let mut pending: Option<Measurement> = None;
    for line in &lines[index + 1..] {
        if vocabulary::is_ignored_line(line) {
            continue;
        }
        let segments = vocabulary::keyword_segments(line);
        if segments.is_empty() {
            if let Some(m) = pending.take() {
                let numbers = text::extract_numbers(line);
                let used = text::used_keys(&columns);
                columns.push(Column::new(unique_key(m.key(), &used), numbers));
            }
            continue;
        }
        for (m, rest) in segments {
            let numbers = text::extract_numbers(rest);
            if numbers.is_empty() {
                pending = Some(m);
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

/// 行頭のサイズ番号＋値（`46 100 68 44`）
fn leading_numeric_size(line: &str) -> Option<(String, SizeScale, Vec<f64>)> {
    let caps = LEADING_NUMBER_RE.captures(line)?;
    let label = caps[1].to_string();
    let (scale, _) = sizes::size_rank(&label)?;
    let values = text::extract_numbers(&caps[2]);
    if values.is_empty() {
        return None;
    }
    Some((label, scale, values))
}

/// 1行1サイズの形式
fn row_layout(lines: &[&str]) -> Option<ParsedTable> {
    let mut header: Option<Vec<Measurement>> = None;
    let mut rows = Vec::new();
    let mut scale: Option<SizeScale> = None;

    for line in lines {
        if vocabulary::is_ignored_line(line) {
            continue;
        }
        if let Some((label, row_scale, values)) = leading_numeric_size(line) {
            if *scale.get_or_insert(row_scale) != row_scale {
                continue;
            }
            let keys = text::unique_keys(header.as_deref().unwrap_or(&DEFAULT_KEYS));
            if rows.iter().any(|r: &crate::types::SizeRow| r.size == label) {
                continue;
            }
            rows.push(text::row_from_values(&label, &keys, &values));
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

pub fn parse(text: &str, _settings: &ParseSettings) -> Option<ParsedTable> {
    let reflowed = reflow(text);
    let lines = text::lines(&reflowed);
    ParsedTable::best([header_layout(&lines), row_layout(&lines)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Option<ParsedTable> {
        parse(text, &ParseSettings::default())
    }

    #[test]
    fn test_reflow_single_line() {
        let text = "Size 1 2 3 Chest 100 104 108 Length 68 70 72";
        assert_eq!(reflow(text), "Size 1 2 3\nChest 100 104 108\nLength 68 70 72");
    }

    #[test]
    fn test_reflow_keeps_header() {
        assert_eq!(reflow("Size Chest Length\n46 100 68"), "Size Chest Length\n46 100 68");
    }

    #[test]
    fn test_single_line_small_sizes() {
        let table = run("Size 1 2 3 Chest 100 104 108 Length 68 70 72").expect("表が見つからない");
        let sizes: Vec<&str> = table.rows.iter().map(|r| r.size.as_str()).collect();
        assert_eq!(sizes, vec!["1", "2", "3"]);
        assert_eq!(table.rows[2].get("length"), Some(72.0));
    }

    #[test]
    fn test_eu_header_without_size_word() {
        let table = run("46 48 50\nWaist 72 76 80\nHip 96 100 104").expect("表が見つからない");
        assert_eq!(table.rows[1].size, "48");
        assert_eq!(table.rows[1].get("hip"), Some(100.0));
    }

    #[test]
    fn test_eu_rows() {
        let text = "Size Chest Length Shoulder\n46 100 68 44\n48 104 70 45\n50 108 72 46";
        let table = run(text).expect("表が見つからない");
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0].size, "46");
        assert_eq!(table.rows[0].get("chest"), Some(100.0));
        assert_eq!(table.rows[2].get("shoulder"), Some(46.0));
    }

    #[test]
    fn test_rows_default_keys() {
        let table = run("1 44 100 68 60\n2 45 104 70 61").expect("表が見つからない");
        assert_eq!(table.rows[0].get("shoulder"), Some(44.0));
        assert_eq!(table.rows[1].get("sleeve"), Some(61.0));
    }

    #[test]
    fn test_letter_rows_ignored() {
        assert!(run("S 100 68\nM 104 70").is_none());
    }
}
