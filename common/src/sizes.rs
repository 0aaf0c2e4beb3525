//! サイズ表記の順序付け
//!
//! サイズは次の3系統のどれかに属する:
//! - 文字サイズ `XXS..5XL`
//! - 小さい整数 `1..9`
//! - EU表記の偶数 `44..58`
//!
//! 系統をまたぐ比較は定義しない（`None` を返す）。

use crate::types::SizeRow;
use std::cmp::Ordering;

/// 文字サイズの並び（小さい順）
pub const LETTER_SIZES: &[&str] = &["XXS", "XS", "S", "M", "L", "XL", "XXL", "XXXL", "4XL", "5XL"];

/// 先頭一致の判定用（長いものから）
const LETTER_PREFIXES: &[&str] = &[
    "XXXL", "XXXXL", "XXL", "XXS", "2XL", "3XL", "4XL", "5XL", "2XS", "XS", "XL", "S", "M", "L",
];

const SMALL_RANGE: (u32, u32) = (1, 9);
const EU_RANGE: (u32, u32) = (44, 58);

/// サイズの系統
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeScale {
    Letter,
    Small,
    Eu,
}

/// 別表記を正規形に寄せる（2XL → XXL など）
fn canonical_letter(upper: &str) -> &str {
    match upper {
        "2XL" => "XXL",
        "3XL" | "XXXL" => "XXXL",
        "XXXXL" => "4XL",
        "2XS" => "XXS",
        other => other,
    }
}

fn letter_rank(label: &str) -> Option<usize> {
    let upper = label.trim().to_uppercase();
    let canonical = canonical_letter(&upper);
    LETTER_SIZES.iter().position(|s| *s == canonical)
}

/// サイズの系統と系統内の順位
pub fn size_rank(label: &str) -> Option<(SizeScale, u32)> {
    if let Some(rank) = letter_rank(label) {
        return Some((SizeScale::Letter, rank as u32));
    }
    let n: u32 = label.trim().parse().ok()?;
    if (SMALL_RANGE.0..=SMALL_RANGE.1).contains(&n) {
        Some((SizeScale::Small, n))
    } else if (EU_RANGE.0..=EU_RANGE.1).contains(&n) && n % 2 == 0 {
        Some((SizeScale::Eu, n))
    } else {
        None
    }
}

pub fn is_letter_size(token: &str) -> bool {
    letter_rank(token).is_some()
}

pub fn is_size_token(token: &str) -> bool {
    size_rank(token).is_some()
}

/// 表示用に正規化（前後空白除去・大文字化）
pub fn normalize_label(label: &str) -> String {
    label.trim().to_uppercase()
}

/// 2つのサイズを比較する。系統が異なれば `None`
pub fn compare_sizes(a: &str, b: &str) -> Option<Ordering> {
    let (scale_a, rank_a) = size_rank(a)?;
    let (scale_b, rank_b) = size_rank(b)?;
    if scale_a != scale_b {
        return None;
    }
    Some(rank_a.cmp(&rank_b))
}

/// 同じサイズを指しているか（2XL と XXL は同じ）
pub fn same_size(a: &str, b: &str) -> bool {
    match compare_sizes(a, b) {
        Some(ordering) => ordering == Ordering::Equal,
        None => normalize_label(a) == normalize_label(b),
    }
}

/// 1つ上のサイズ
pub fn next_size(label: &str) -> Option<String> {
    let (scale, rank) = size_rank(label)?;
    match scale {
        SizeScale::Letter => LETTER_SIZES.get(rank as usize + 1).map(|s| s.to_string()),
        SizeScale::Small => (rank < SMALL_RANGE.1).then(|| (rank + 1).to_string()),
        SizeScale::Eu => (rank + 2 <= EU_RANGE.1).then(|| (rank + 2).to_string()),
    }
}

/// 1つ下のサイズ
pub fn previous_size(label: &str) -> Option<String> {
    let (scale, rank) = size_rank(label)?;
    match scale {
        SizeScale::Letter => rank
            .checked_sub(1)
            .and_then(|r| LETTER_SIZES.get(r as usize))
            .map(|s| s.to_string()),
        SizeScale::Small => (rank > SMALL_RANGE.0).then(|| (rank - 1).to_string()),
        SizeScale::Eu => (rank >= EU_RANGE.0 + 2).then(|| (rank - 2).to_string()),
    }
}

/// 行頭の文字サイズを読み取り、残りの文字列と一緒に返す
///
/// `M 104 70` → `("M", " 104 70")`。直後が英字なら単語の一部とみなして無視する
/// （`Length` の `L` など）。
pub fn leading_letter_size(line: &str) -> Option<(String, &str)> {
    let trimmed = line.trim_start_matches(|c: char| !c.is_ascii_alphanumeric());
    for prefix in LETTER_PREFIXES {
        let Some(head) = trimmed.get(..prefix.len()) else {
            continue;
        };
        if !head.eq_ignore_ascii_case(prefix) {
            continue;
        }
        let rest = &trimmed[prefix.len()..];
        if rest.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
            continue;
        }
        return Some((normalize_label(head), rest));
    }
    None
}

/// サイズ順に並べたときの添字列（安定）
///
/// 全て文字サイズなら文字サイズ順、全て整数なら数値順。
/// どちらでもなければ元の順序のまま。
pub fn sorted_indices(labels: &[&str]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..labels.len()).collect();

    if !labels.is_empty() && labels.iter().all(|l| is_letter_size(l)) {
        indices.sort_by_key(|&i| letter_rank(labels[i]).unwrap_or(usize::MAX));
        return indices;
    }

    let numbers: Option<Vec<u32>> = labels.iter().map(|l| l.trim().parse().ok()).collect();
    if let Some(numbers) = numbers {
        indices.sort_by_key(|&i| numbers[i]);
    }
    indices
}

/// 行をサイズ順に並べ替える
pub fn sort_rows_by_size(rows: &mut Vec<SizeRow>) {
    let labels: Vec<&str> = rows.iter().map(|r| r.size.as_str()).collect();
    let order = sorted_indices(&labels);
    let mut taken: Vec<Option<SizeRow>> = std::mem::take(rows).into_iter().map(Some).collect();
    rows.extend(order.into_iter().filter_map(|i| taken[i].take()));
}
