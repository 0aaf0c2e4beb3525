//! OCR誤認識の修正
//!
//! 構造解析・翻訳の前に適用する。数字の抽出すべてに影響するため、
//! ここで直せるものはここで直す。
//!
//! - 全角→半角（数字・英字・記号）
//! - `$` ↔ `5`（`$3` → `53`, `6$` → `65`）
//! - `S` ↔ `5`（`S5` → `55`）
//! - 数字に挟まれた `O` → `0`、`l`/`I` → `1`

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref DOLLAR_BEFORE_RE: Regex = Regex::new(r"\$(\d)").unwrap();
    static ref DOLLAR_AFTER_RE: Regex = Regex::new(r"(\d)\$").unwrap();
    static ref S_BEFORE_RE: Regex = Regex::new(r"\bS(\d)\b").unwrap();
    static ref S_AFTER_RE: Regex = Regex::new(r"\b(\d)S\b").unwrap();
    static ref O_BETWEEN_RE: Regex = Regex::new(r"(\d)[oO](\d)").unwrap();
    static ref L_BETWEEN_RE: Regex = Regex::new(r"(\d)[lI](\d)").unwrap();
}

/// 全角→半角
fn to_half_width(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '０'..='９' => ((c as u32) - '０' as u32 + '0' as u32) as u8 as char,
            'Ａ'..='Ｚ' => ((c as u32) - 'Ａ' as u32 + 'A' as u32) as u8 as char,
            'ａ'..='ｚ' => ((c as u32) - 'ａ' as u32 + 'a' as u32) as u8 as char,
            '．' => '.',
            '，' => ',',
            '：' => ':',
            '（' => '(',
            '）' => ')',
            '／' => '/',
            '－' => '-',
            '　' => ' ',
            _ => c,
        })
        .collect()
}

/// 挟まれた文字の置換は重なりを取りこぼすので2回かける
fn replace_between(re: &Regex, text: &str, digit: &str) -> String {
    let replacement = format!("${{1}}{}${{2}}", digit);
    let once = re.replace_all(text, replacement.as_str()).to_string();
    re.replace_all(&once, replacement.as_str()).to_string()
}

/// OCRの文字化けを修正する
pub fn fix_ocr_errors(text: &str) -> String {
    let mut result = to_half_width(text);

    result = DOLLAR_BEFORE_RE.replace_all(&result, "5${1}").to_string();
    result = DOLLAR_AFTER_RE.replace_all(&result, "${1}5").to_string();
    result = S_BEFORE_RE.replace_all(&result, "5${1}").to_string();
    result = S_AFTER_RE.replace_all(&result, "${1}5").to_string();
    result = replace_between(&O_BETWEEN_RE, &result, "0");
    result = replace_between(&L_BETWEEN_RE, &result, "1");

    result
}
