//! 計測項目の語彙
//!
//! 翻訳後テキストに現れるキーワードと正規キーの対応表。
//! 表は「具体的なものを先に」並べてあり、`pants length` が `length` より優先される。

use lazy_static::lazy_static;
use regex::Regex;

/// 計測項目（正規キー）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Measurement {
    Chest,
    Shoulder,
    Sleeve,
    Length,
    Waist,
    Hip,
    Thigh,
    Inseam,
    Hem,
    LegOpening,
    PantsLength,
    Rise,
}

impl Measurement {
    pub const ALL: [Measurement; 12] = [
        Measurement::Chest,
        Measurement::Shoulder,
        Measurement::Sleeve,
        Measurement::Length,
        Measurement::Waist,
        Measurement::Hip,
        Measurement::Thigh,
        Measurement::Inseam,
        Measurement::Hem,
        Measurement::LegOpening,
        Measurement::PantsLength,
        Measurement::Rise,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Measurement::Chest => "chest",
            Measurement::Shoulder => "shoulder",
            Measurement::Sleeve => "sleeve",
            Measurement::Length => "length",
            Measurement::Waist => "waist",
            Measurement::Hip => "hip",
            Measurement::Thigh => "thigh",
            Measurement::Inseam => "inseam",
            Measurement::Hem => "hem",
            Measurement::LegOpening => "legOpening",
            Measurement::PantsLength => "pantsLength",
            Measurement::Rise => "rise",
        }
    }

    /// メモ表示用の名前
    pub fn label(&self) -> &'static str {
        match self {
            Measurement::Chest => "Chest",
            Measurement::Shoulder => "Shoulder",
            Measurement::Sleeve => "Sleeve",
            Measurement::Length => "Length",
            Measurement::Waist => "Waist",
            Measurement::Hip => "Hip",
            Measurement::Thigh => "Thigh",
            Measurement::Inseam => "Inseam",
            Measurement::Hem => "Hem",
            Measurement::LegOpening => "Leg opening",
            Measurement::PantsLength => "Pants length",
            Measurement::Rise => "Rise",
        }
    }

    /// キーから逆引き。`length2` のような連番付きキーは元のキーとして扱う
    pub fn from_key(key: &str) -> Option<Self> {
        let base = base_key(key);
        Self::ALL.iter().copied().find(|m| m.key() == base)
    }

    /// 上衣を示す項目か
    pub fn is_top(&self) -> bool {
        matches!(self, Measurement::Chest | Measurement::Shoulder | Measurement::Sleeve)
    }

    /// 下衣を示す項目か
    pub fn is_bottom(&self) -> bool {
        matches!(
            self,
            Measurement::Waist
                | Measurement::Hip
                | Measurement::Thigh
                | Measurement::Inseam
                | Measurement::LegOpening
                | Measurement::PantsLength
                | Measurement::Rise
        )
    }
}

/// キーワード → 正規キー
const KEYWORDS: &[(&str, Measurement)] = &[
    ("pants length", Measurement::PantsLength),
    ("trouser length", Measurement::PantsLength),
    ("outseam", Measurement::PantsLength),
    ("leg opening", Measurement::LegOpening),
    ("foot opening", Measurement::LegOpening),
    ("leg width", Measurement::LegOpening),
    ("ankle", Measurement::LegOpening),
    ("front rise", Measurement::Rise),
    ("back rise", Measurement::Rise),
    ("rise", Measurement::Rise),
    ("inseam", Measurement::Inseam),
    ("inside leg", Measurement::Inseam),
    ("thigh", Measurement::Thigh),
    ("waist", Measurement::Waist),
    ("hips?", Measurement::Hip),
    ("hem", Measurement::Hem),
    ("sleeve length", Measurement::Sleeve),
    ("sleeves?", Measurement::Sleeve),
    ("shoulder width", Measurement::Shoulder),
    ("shoulders?", Measurement::Shoulder),
    ("chest", Measurement::Chest),
    ("bust", Measurement::Chest),
    ("body length", Measurement::Length),
    ("clothes length", Measurement::Length),
    ("front length", Measurement::Length),
    ("back length", Measurement::Length),
    ("length", Measurement::Length),
    ("front", Measurement::Length),
];

/// 計測値ではない数字を含む行（身長・体重・推奨など）
const IGNORED_WORDS: &[&str] = &[
    "height", "weight", "recommended", "suggested", "suitable", "tolerance",
];

/// 数字に続く重さの単位
const WEIGHT_UNITS: &[&str] = &["kg", "jin", "lbs"];

lazy_static! {
    /// キーワードごとに1つのキャプチャグループを持つ
    static ref KEYWORD_RE: Regex = {
        let alternatives: Vec<String> = KEYWORDS
            .iter()
            .map(|(pattern, _)| format!("({})", pattern))
            .collect();
        Regex::new(&format!(r"(?i)\b(?:{})", alternatives.join("|"))).unwrap()
    };
    static ref IGNORED_RE: Regex = Regex::new(&format!(
        r"(?i)\b(?:{})\b|\d\s*(?:{})\b",
        IGNORED_WORDS.join("|"),
        WEIGHT_UNITS.join("|")
    ))
    .unwrap();
    static ref SIZE_WORD_RE: Regex = Regex::new(r"(?i)\bsize\b").unwrap();
}

/// 連番を除いたキー（`length2` → `length`）
pub fn base_key(key: &str) -> &str {
    key.trim_end_matches(|c: char| c.is_ascii_digit())
}

/// 重複しないキーを作る（`length` が使用済みなら `length2`）
pub fn unique_key(base: &str, used: &[String]) -> String {
    if !used.iter().any(|k| k == base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{}{}", base, n))
        .find(|candidate| !used.contains(candidate))
        .unwrap_or_else(|| base.to_string())
}

/// メモ表示用の名前。語彙にないキーは先頭だけ大文字にする
pub fn display_name(key: &str) -> String {
    if let Some(m) = Measurement::from_key(key) {
        return m.label().to_string();
    }
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// 行内のキーワードを位置順に返す（開始位置, 終了位置, 項目）
pub fn find_keywords(line: &str) -> Vec<(usize, usize, Measurement)> {
    KEYWORD_RE
        .captures_iter(line)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let index = (1..caps.len()).find(|&i| caps.get(i).is_some())?;
            let (_, kind) = KEYWORDS.get(index - 1)?;
            Some((whole.start(), whole.end(), *kind))
        })
        .collect()
}

pub fn first_keyword(line: &str) -> Option<Measurement> {
    find_keywords(line).first().map(|(_, _, m)| *m)
}

pub fn has_keyword(text: &str) -> bool {
    KEYWORD_RE.is_match(text)
}

/// 行をキーワードごとに区切り、各キーワードの後ろの文字列と組にする
///
/// `Chest 100 104 Length 68 70` → `[(Chest, " 100 104 "), (Length, " 68 70")]`
pub fn keyword_segments(line: &str) -> Vec<(Measurement, &str)> {
    let found = find_keywords(line);
    found
        .iter()
        .enumerate()
        .map(|(i, (_, end, m))| {
            let next_start = found.get(i + 1).map(|(s, _, _)| *s).unwrap_or(line.len());
            (*m, &line[*end..next_start])
        })
        .collect()
}

/// 身長・体重などの行か
pub fn is_ignored_line(line: &str) -> bool {
    IGNORED_RE.is_match(line)
}

/// `size` という単語の位置（終了位置）
pub fn size_word_end(line: &str) -> Option<usize> {
    SIZE_WORD_RE.find(line).map(|m| m.end())
}

pub fn size_word_positions(line: &str) -> Vec<usize> {
    SIZE_WORD_RE.find_iter(line).map(|m| m.start()).collect()
}
