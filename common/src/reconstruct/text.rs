//! 行・数値・トークンの切り出し

use crate::sizes;
use crate::types::SizeRow;
use crate::vocabulary::{self, unique_key, Measurement};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NUMBER_RE: Regex = Regex::new(r"\d+(?:\.\d+)?").unwrap();
    static ref TOKEN_RE: Regex = Regex::new(r"[A-Za-z0-9]+").unwrap();
}

/// 計測値とみなす整数部の桁数
const VALUE_DIGITS: (usize, usize) = (2, 3);

/// 空行を除いた行
pub fn lines(text: &str) -> Vec<&str> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).collect()
}

/// 2〜3桁のセンチ値を抽出する
pub fn extract_numbers(text: &str) -> Vec<f64> {
    NUMBER_RE
        .find_iter(text)
        .filter_map(|m| {
            let digits = m.as_str().split('.').next().unwrap_or("").len();
            if digits < VALUE_DIGITS.0 || digits > VALUE_DIGITS.1 {
                return None;
            }
            m.as_str().parse::<f64>().ok()
        })
        .collect()
}

/// 英数字のトークン
pub fn tokens(text: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// 文字サイズのトークン（大文字化・順序維持）
pub fn letter_size_tokens(text: &str) -> Vec<String> {
    tokens(text)
        .into_iter()
        .filter(|t| sizes::is_letter_size(t))
        .map(sizes::normalize_label)
        .collect()
}

/// 重複を除く（順序維持）
pub fn distinct(labels: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for label in labels {
        if !seen.iter().any(|s| sizes::same_size(s, &label)) {
            seen.push(label);
        }
    }
    seen
}

/// 行内の数字トークンをサイズ系統ごとに読む（EU優先、次に小さい整数）
pub fn numeric_size_tokens(text: &str) -> Vec<String> {
    let numeric: Vec<&str> = tokens(text)
        .into_iter()
        .filter(|t| t.chars().all(|c| c.is_ascii_digit()))
        .collect();
    let eu: Vec<String> = numeric
        .iter()
        .filter(|t| matches!(sizes::size_rank(t), Some((sizes::SizeScale::Eu, _))))
        .map(|t| t.to_string())
        .collect();
    if distinct(eu.clone()).len() >= 2 {
        return eu;
    }
    numeric
        .iter()
        .filter(|t| matches!(sizes::size_rank(t), Some((sizes::SizeScale::Small, _))))
        .map(|t| t.to_string())
        .collect()
}

/// 行全体がサイズ名だけで構成されているときのサイズ列
///
/// `S M L XL` や `Size S M L XL` を対象にする。数字を含む行は対象外。
pub fn size_only_line(line: &str) -> Option<Vec<String>> {
    let body = match vocabulary::size_word_end(line) {
        Some(end) if line[..end].trim().eq_ignore_ascii_case("size") => &line[end..],
        _ => line,
    };
    let toks = tokens(body);
    if toks.is_empty() || !toks.iter().all(|t| sizes::is_letter_size(t)) {
        return None;
    }
    let labels = distinct(toks.into_iter().map(sizes::normalize_label).collect());
    (labels.len() >= 2).then_some(labels)
}

/// キーワードだけの見出し行から列キーを得る（数字を含む行は対象外）
pub fn header_keys(line: &str) -> Option<Vec<Measurement>> {
    if !extract_numbers(line).is_empty() {
        return None;
    }
    let found: Vec<Measurement> = vocabulary::find_keywords(line)
        .into_iter()
        .map(|(_, _, m)| m)
        .collect();
    (!found.is_empty()).then_some(found)
}

/// 列キーを連番付きで重複なしにする
pub fn unique_keys(measurements: &[Measurement]) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for m in measurements {
        let key = unique_key(m.key(), &keys);
        keys.push(key);
    }
    keys
}

/// 1計測項目分の値（サイズ順）
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub key: String,
    pub values: Vec<f64>,
}

impl Column {
    pub fn new(key: String, values: Vec<f64>) -> Self {
        Self { key, values }
    }
}

/// 使用済みキーの一覧
pub fn used_keys(columns: &[Column]) -> Vec<String> {
    columns.iter().map(|c| c.key.clone()).collect()
}

/// 列データを行に組み直す（N番目のサイズ ↔ N番目の値）
pub fn rows_from_columns(labels: &[String], columns: &[Column]) -> Vec<SizeRow> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let mut row = SizeRow::new(label.clone());
            for column in columns {
                if let Some(value) = column.values.get(i) {
                    row.insert(column.key.clone(), *value);
                }
            }
            row
        })
        .filter(SizeRow::is_valid)
        .collect()
}

/// 値の並びを列キーに割り当てて1行を作る
pub fn row_from_values(label: &str, keys: &[String], values: &[f64]) -> SizeRow {
    let mut row = SizeRow::new(label);
    for (key, value) in keys.iter().zip(values) {
        row.insert(key.clone(), *value);
    }
    row
}
