//! 中国語→英語の置換辞書
//!
//! 文脈を見ずに、長い語から順に置換する（`大腿围` を `腿围` より先に）。

use lazy_static::lazy_static;

const DICTIONARY: &[(&str, &str)] = &[
    ("尺码", "Size"),
    ("尺寸", "Size"),
    ("码数", "Size"),
    ("号型", "Size"),
    ("码", "Size"),
    ("均码", "One Size"),
    ("胸围", "Chest"),
    ("胸宽", "Chest"),
    ("肩宽", "Shoulder"),
    ("袖长", "Sleeve"),
    ("衣长", "Length"),
    ("后中长", "Length"),
    ("身长", "Length"),
    ("前长", "Front Length"),
    ("腰围", "Waist"),
    ("臀围", "Hip"),
    ("大腿围", "Thigh"),
    ("腿围", "Thigh"),
    ("横裆", "Thigh"),
    ("内长", "Inseam"),
    ("内裆长", "Inseam"),
    ("下摆", "Hem"),
    ("摆围", "Hem"),
    ("脚口", "Leg Opening"),
    ("裤脚", "Leg Opening"),
    ("裤长", "Pants Length"),
    ("外长", "Pants Length"),
    ("前裆", "Front Rise"),
    ("前浪", "Front Rise"),
    ("后裆", "Back Rise"),
    ("厘米", "cm"),
    ("公分", "cm"),
    ("上衣", "Top"),
    ("裤子", "Pants"),
    ("身高", "Height"),
    ("体重", "Weight"),
    ("公斤", "kg"),
    ("斤", "jin"),
    ("建议", "Recommended"),
    ("适合", "Suitable"),
    ("误差", "Tolerance"),
    ("单位", "Unit"),
    ("平铺", "Flat"),
    ("测量", "Measured"),
];

/// 計測項目を表す語（サイズ表判定用）
const MEASUREMENT_TERMS: &[&str] = &[
    "胸围", "胸宽", "肩宽", "袖长", "衣长", "后中长", "身长", "前长", "腰围", "臀围", "大腿围",
    "腿围", "横裆", "内长", "内裆长", "下摆", "摆围", "脚口", "裤脚", "裤长", "外长", "前裆", "前浪",
];

lazy_static! {
    /// 長い語から順（同じ長さは辞書順）
    static ref SORTED: Vec<(&'static str, &'static str)> = {
        let mut entries = DICTIONARY.to_vec();
        entries.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then_with(|| a.0.cmp(b.0))
        });
        entries
    };
}

/// 行ごとに連続する空白を1つにまとめる
fn collapse_whitespace(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 既知の中国語をすべて英語に置き換える
pub fn translate(text: &str) -> String {
    let mut result = text.to_string();
    for (zh, en) in SORTED.iter() {
        if result.contains(zh) {
            result = result.replace(zh, &format!(" {} ", en));
        }
    }
    collapse_whitespace(&result)
}

/// 中国語の計測項目を含むか
pub fn has_measurement_term(text: &str) -> bool {
    MEASUREMENT_TERMS.iter().any(|term| text.contains(term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_line() {
        assert_eq!(translate("尺码 S M L XL"), "Size S M L XL");
        assert_eq!(translate("胸围100 104 108"), "Chest 100 104 108");
    }

    #[test]
    fn test_longest_first() {
        assert_eq!(translate("大腿围 60"), "Thigh 60");
        assert_eq!(translate("内裆长 76"), "Inseam 76");
        assert_eq!(translate("均码"), "One Size");
    }

    #[test]
    fn test_keeps_lines() {
        let text = "尺码 S M\n肩宽 44 45\n\n衣长 68 70";
        assert_eq!(translate(text), "Size S M\nShoulder 44 45\n\nLength 68 70");
    }

    #[test]
    fn test_untranslated_text_kept() {
        assert_eq!(translate("Chest  100   104"), "Chest 100 104");
    }

    #[test]
    fn test_has_measurement_term() {
        assert!(has_measurement_term("尺码表 胸围"));
        assert!(!has_measurement_term("尺码表"));
    }
}
