//! キャッシュ機能テスト
//!
//! 復元結果キャッシュの動作を検証

use sizechart_common::{ocr_response, OcrResponse, ParseSettings};
use sizechart_rust::analyzer::cache::{compute_text_hash, CacheFile};
use sizechart_rust::analyzer::parse_files_with_cache;
use sizechart_rust::scanner;
use tempfile::tempdir;

fn response(text: &str) -> OcrResponse {
    ocr_response(Some(text), &ParseSettings::default())
}

/// 空のキャッシュファイル
#[test]
fn test_cache_file_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let cache = CacheFile::load(dir.path());

    assert_eq!(cache.len(), 0);
    assert!(cache.is_empty());
}

/// キャッシュの保存と読み込み
#[test]
fn test_cache_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut cache = CacheFile::load(dir.path());
    let text = "Size S M L\nChest 100 104 108";
    cache.insert(compute_text_hash(text), "a.txt".to_string(), response(text));
    cache.save(dir.path()).expect("キャッシュ保存失敗");

    let loaded = CacheFile::load(dir.path());
    assert_eq!(loaded.len(), 1);

    let cached = loaded.get(&compute_text_hash(text)).expect("キャッシュが見つからない");
    assert_eq!(cached.structured.rows.len(), 3);
    assert_eq!(cached.raw_text, text);
}

/// キャッシュの上書き
#[test]
fn test_cache_overwrite() {
    let dir = tempdir().expect("Failed to create temp dir");

    let mut cache = CacheFile::load(dir.path());
    cache.insert("same_hash".to_string(), "a.txt".to_string(), response("hello"));
    cache.insert("same_hash".to_string(), "a.txt".to_string(), response("Size S M\nChest 100 104"));

    let cached = cache.get("same_hash").expect("キャッシュが見つからない");
    assert_eq!(cached.structured.rows.len(), 2);
    assert_eq!(cache.len(), 1);
}

/// キャッシュファイルが破損している場合
#[test]
fn test_cache_corrupted_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(CacheFile::cache_path(dir.path()), "{ invalid json }").unwrap();

    let cache = CacheFile::load(dir.path());
    assert!(cache.is_empty());
}

/// バージョン違いのキャッシュは捨てる
#[test]
fn test_cache_version_mismatch() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(CacheFile::cache_path(dir.path()), r#"{"version":99,"entries":{}}"#).unwrap();

    let cache = CacheFile::load(dir.path());
    assert!(cache.is_empty());
}

/// キャッシュ削除
#[test]
fn test_cache_clear() {
    let dir = tempdir().expect("Failed to create temp dir");
    assert!(!CacheFile::clear(dir.path()).unwrap());

    CacheFile::default().save(dir.path()).unwrap();
    assert!(CacheFile::clear(dir.path()).unwrap());
    assert!(!CacheFile::cache_path(dir.path()).exists());
}

/// 一括解析でキャッシュが作られ、2回目はキャッシュから同じ結果を返す
#[test]
fn test_parse_with_cache_roundtrip() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("a.txt"), "Size S M L\nChest 100 104 108").unwrap();
    std::fs::write(dir.path().join("b.txt"), "Chest Length\nS 100 68\nM 104 70").unwrap();
    let files = scanner::scan_folder(dir.path()).unwrap();

    let first = parse_files_with_cache(&files, dir.path(), &ParseSettings::default()).unwrap();
    let cache = CacheFile::load(dir.path());
    assert_eq!(cache.len(), 2);

    let second = parse_files_with_cache(&files, dir.path(), &ParseSettings::default()).unwrap();
    assert_eq!(first, second);
    assert_eq!(second[1].file_name, "b.txt");
    assert_eq!(second[1].response.structured.rows.len(), 2);
}
