//! OCRテキストの一括解析
//!
//! 各ファイルの解析は入力だけで決まるので、rayon で並列に処理する。

pub mod cache;

pub use cache::CacheFile;

use crate::error::Result;
use crate::scanner::OcrFile;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sizechart_common::{ocr_response, OcrResponse, ParseSettings};
use std::path::Path;

/// 1ファイル分の解析結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub file_name: String,
    #[serde(flatten)]
    pub response: OcrResponse,
}

/// 読み込み済みのテキストを解析する
fn parse_one(file: &OcrFile, text: &str, settings: &ParseSettings) -> ParseResult {
    let response = ocr_response(Some(text), settings);
    tracing::debug!(
        file = %file.file_name,
        rows = response.structured.rows.len(),
        tables = response.structured.tables.len(),
        "解析完了"
    );
    ParseResult {
        file_name: file.file_name.clone(),
        response,
    }
}

pub fn parse_files(files: &[OcrFile], settings: &ParseSettings) -> Result<Vec<ParseResult>> {
    files
        .par_iter()
        .map(|file| {
            let text = file.read()?;
            Ok(parse_one(file, &text, settings))
        })
        .collect()
}

/// キャッシュを使って解析する
///
/// - キャッシュにあるテキストはキャッシュから取得
/// - ないものだけ解析してキャッシュに追加し、保存する
pub fn parse_files_with_cache(files: &[OcrFile], folder: &Path, settings: &ParseSettings) -> Result<Vec<ParseResult>> {
    let mut cache = CacheFile::load(folder);

    let mut texts = Vec::with_capacity(files.len());
    for file in files {
        let text = file.read()?;
        let hash = cache::compute_text_hash(&text);
        texts.push((text, hash));
    }

    let hits = texts.iter().filter(|(_, hash)| cache.get(hash).is_some()).count();
    tracing::info!(hits, total = files.len(), "キャッシュ照合");

    let results: Vec<ParseResult> = files
        .par_iter()
        .zip(texts.par_iter())
        .map(|(file, (text, hash))| match cache.get(hash) {
            Some(response) => ParseResult {
                file_name: file.file_name.clone(),
                response: response.clone(),
            },
            None => parse_one(file, text, settings),
        })
        .collect();

    for (result, (_, hash)) in results.iter().zip(&texts) {
        if cache.get(hash).is_none() {
            cache.insert(hash.clone(), result.file_name.clone(), result.response.clone());
        }
    }
    cache.save(folder)?;

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_files_keeps_order() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "Size S M L\nChest 100 104 108").unwrap();
        fs::write(dir.path().join("b.txt"), "hello").unwrap();

        let files = scanner::scan_folder(dir.path()).unwrap();
        let results = parse_files(&files, &ParseSettings::default()).unwrap();
        assert_eq!(results[0].file_name, "a.txt");
        assert_eq!(results[0].response.structured.rows.len(), 3);
        assert_eq!(results[1].file_name, "b.txt");
        assert!(!results[1].response.is_size_guide);
    }

    #[test]
    fn test_parse_result_flat_json() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "Size S M\nChest 100 104").unwrap();
        let files = scanner::scan_folder(dir.path()).unwrap();
        let results = parse_files(&files, &ParseSettings::default()).unwrap();

        let json = serde_json::to_value(&results[0]).unwrap();
        assert_eq!(json["fileName"], "a.txt");
        assert_eq!(json["isSizeGuide"], true);
        assert!(json["structured"]["rows"].is_array());
    }
}
