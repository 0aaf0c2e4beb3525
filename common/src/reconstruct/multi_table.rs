//! 複数表の検出
//!
//! `Size S M L XL` のような見出し行が現れるたびに新しい表が始まる。
//! 上下セットの画像では上衣と下衣の表が続けて並ぶことが多い。
//!
//! ## 処理フロー
//! 1. `size` とサイズ名2つ以上を含む行を見出しとして探す
//! 2. 見出しから次の見出しまでを1区間として計測行を集める
//! 3. 位置でサイズと値を対応させ、2行以上できた区間を表として採用

use super::magnitude::MagnitudeRules;
use super::text::{self, Column};
use crate::classifier;
use crate::sizes;
use crate::types::SizeTable;
use crate::vocabulary::{self, unique_key, Measurement};

/// 最初の見出しの前に遡って読む行数（見出しが先に来る表のため）
const PRE_HEADER_WINDOW: usize = 3;

/// 見出し行ならサイズ列を返す
///
/// サイズ名は `size` の後ろ、最初の計測キーワードより前から読む。
pub fn size_header(line: &str) -> Option<Vec<String>> {
    let start = vocabulary::size_word_end(line)?;
    let region = &line[start..];
    let end = vocabulary::find_keywords(region)
        .first()
        .map(|(s, _, _)| *s)
        .unwrap_or(region.len());
    let region = &region[..end];

    let letters = text::distinct(text::letter_size_tokens(region));
    if letters.len() >= 2 {
        return Some(letters);
    }
    let numeric = text::distinct(text::numeric_size_tokens(region));
    (numeric.len() >= 2).then_some(numeric)
}

/// 見出し行の最初のキーワード以降
fn header_tail(line: &str) -> Option<&str> {
    let start = vocabulary::size_word_end(line)?;
    let (offset, _, _) = *vocabulary::find_keywords(&line[start..]).first()?;
    Some(&line[start + offset..])
}

/// テキスト全体から表を検出する
pub fn detect_tables(text: &str, rules: &MagnitudeRules) -> Vec<SizeTable> {
    let lines = text::lines(text);
    let headers: Vec<(usize, Vec<String>)> = lines
        .iter()
        .enumerate()
        .filter_map(|(i, line)| size_header(line).map(|sizes| (i, sizes)))
        .collect();

    let mut tables = Vec::new();
    for (n, (index, sizes)) in headers.iter().enumerate() {
        let end = headers.get(n + 1).map(|(i, _)| *i).unwrap_or(lines.len());
        let start = if n == 0 {
            index.saturating_sub(PRE_HEADER_WINDOW)
        } else {
            *index
        };

        // 見出し行に続けて書かれた計測値（改行が失われたOCR）
        let tail = header_tail(lines[*index]);
        let body: Vec<&str> = lines[start..*index]
            .iter()
            .copied()
            .chain(tail)
            .chain(lines[index + 1..end].iter().copied())
            .collect();

        if let Some(table) = parse_segment(sizes, &body, rules) {
            tracing::debug!(
                segment = n,
                rows = table.rows.len(),
                garment_type = %table.garment_type,
                "複数表の区間を採用"
            );
            tables.push(table);
        }
    }
    tables
}

/// 1区間を表に組み立てる
fn parse_segment(sizes: &[String], body: &[&str], rules: &MagnitudeRules) -> Option<SizeTable> {
    let mut columns: Vec<Column> = Vec::new();
    let mut pending: Option<Measurement> = None;

    for line in body {
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
            if let Some(m) = pending.take() {
                columns.push(Column::new(unique_key(m.key(), &used), numbers));
            } else if numbers.len() >= sizes.len() {
                let key = rules.infer_key(&numbers, &used);
                columns.push(Column::new(key, numbers));
            }
            continue;
        }

        for (m, rest) in segments {
            let numbers = text::extract_numbers(rest);
            if numbers.is_empty() {
                pending = Some(m);
            } else {
                pending = None;
                let used = text::used_keys(&columns);
                columns.push(Column::new(unique_key(m.key(), &used), numbers));
            }
        }
    }

    let mut rows = text::rows_from_columns(sizes, &columns);
    if rows.len() < 2 {
        return None;
    }
    sizes::sort_rows_by_size(&mut rows);

    let headers: Vec<String> = columns
        .iter()
        .filter(|c| rows.iter().any(|r| r.get(&c.key).is_some()))
        .map(|c| c.key.clone())
        .collect();
    let garment_type = classifier::segment_garment_type(headers.iter().map(String::as_str));

    Some(SizeTable {
        headers,
        rows,
        garment_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GarmentType;

    #[test]
    fn test_size_header() {
        assert_eq!(
            size_header("Size S M L XL"),
            Some(vec!["S".into(), "M".into(), "L".into(), "XL".into()])
        );
        assert_eq!(size_header("Size 46 48 50"), Some(vec!["46".into(), "48".into(), "50".into()]));
        assert_eq!(size_header("Size Chest Length"), None);
        assert_eq!(size_header("S M L XL"), None);
        assert_eq!(size_header("Size S"), None);
    }

    #[test]
    fn test_header_stops_at_keyword() {
        assert_eq!(
            size_header("Size 1 2 3 Shoulder 44 46 48"),
            Some(vec!["1".into(), "2".into(), "3".into()])
        );
    }

    #[test]
    fn test_values_on_header_line() {
        let text = "Size 1 2 3 Chest 100 104 108 Length 68 70 72";
        let tables = detect_tables(text, &MagnitudeRules::default());
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows[2].size, "3");
        assert_eq!(tables[0].rows[2].get("length"), Some(72.0));
    }

    #[test]
    fn test_single_segment() {
        let text = "Size S M L XL\nChest 100 104 108 112\nLength 68 70 72 74";
        let tables = detect_tables(text, &MagnitudeRules::default());
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows.len(), 4);
        assert_eq!(tables[0].headers, vec!["chest", "length"]);
        assert_eq!(tables[0].rows[3].size, "XL");
        assert_eq!(tables[0].rows[3].get("length"), Some(74.0));
        assert_eq!(tables[0].garment_type, GarmentType::Top);
    }

    #[test]
    fn test_descending_header_sorted() {
        let text = "Size XL L M S\nChest 112 108 104 100";
        let tables = detect_tables(text, &MagnitudeRules::default());
        let sizes: Vec<&str> = tables[0].rows.iter().map(|r| r.size.as_str()).collect();
        assert_eq!(sizes, vec!["S", "M", "L", "XL"]);
        assert_eq!(tables[0].rows[0].get("chest"), Some(100.0));
        assert_eq!(tables[0].rows[3].get("chest"), Some(112.0));
    }

    #[test]
    fn test_top_and_bottom() {
        let text = "Size S M L XL\nShoulder 44 45 46 48\nChest 100 104 108 112\n\
                    Size S M L XL\nWaist 68 72 76 80\nHip 94 98 102 106\nPants Length 98 100 102 104";
        let tables = detect_tables(text, &MagnitudeRules::default());
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].garment_type, GarmentType::Top);
        assert_eq!(tables[1].garment_type, GarmentType::Bottom);
        assert_eq!(tables[1].rows[0].get("pantsLength"), Some(98.0));
    }

    #[test]
    fn test_pending_keyword() {
        let text = "Size S M L\nChest\n100 104 108\nLength 68 70 72";
        let tables = detect_tables(text, &MagnitudeRules::default());
        assert_eq!(tables[0].rows[1].get("chest"), Some(104.0));
    }

    #[test]
    fn test_unlabeled_line_inferred() {
        let text = "Size S M L\nChest 100 104 108\n44 45 46";
        let tables = detect_tables(text, &MagnitudeRules::default());
        assert_eq!(tables[0].rows[0].get("shoulder"), Some(44.0));
    }

    #[test]
    fn test_short_unlabeled_line_skipped() {
        let text = "Size S M L\nChest 100 104 108\n44 45";
        let tables = detect_tables(text, &MagnitudeRules::default());
        assert_eq!(tables[0].headers, vec!["chest"]);
    }

    #[test]
    fn test_ignores_height_lines() {
        let text = "Size S M L\nHeight 155 160 165\nChest 100 104 108";
        let tables = detect_tables(text, &MagnitudeRules::default());
        assert_eq!(tables[0].headers, vec!["chest"]);
    }

    #[test]
    fn test_pre_header_window() {
        let text = "Chest 100 104 108\nSize S M L\nLength 68 70 72";
        let tables = detect_tables(text, &MagnitudeRules::default());
        assert_eq!(tables[0].rows[0].get("chest"), Some(100.0));
        assert_eq!(tables[0].rows[0].get("length"), Some(68.0));
    }

    #[test]
    fn test_segment_needs_two_rows() {
        let text = "Size S M L\nChest 100";
        assert!(detect_tables(text, &MagnitudeRules::default()).is_empty());
    }
}
