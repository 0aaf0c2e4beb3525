use crate::error::{Result, SizeChartError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// OCRテキストファイル
#[derive(Debug, Clone)]
pub struct OcrFile {
    pub path: PathBuf,
    pub file_name: String,
}

impl OcrFile {
    fn new(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            file_name,
        }
    }

    pub fn read(&self) -> Result<String> {
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

const TEXT_EXTENSIONS: &[&str] = &["txt", "TXT", "ocr"];

fn is_text_extension(ext: &str) -> bool {
    TEXT_EXTENSIONS.contains(&ext)
}

/// フォルダ直下のOCRテキストを列挙する
pub fn scan_folder(folder: &Path) -> Result<Vec<OcrFile>> {
    if !folder.is_dir() {
        return Err(SizeChartError::FolderNotFound(folder.display().to_string()));
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1)  // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        if let Some(ext) = path.extension() {
            if is_text_extension(&ext.to_string_lossy()) {
                files.push(OcrFile::new(path));
            }
        }
    }

    // ファイル名でソート
    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(files)
}

/// ファイル1つ、またはフォルダ内の全ファイル
pub fn scan_input(input: &Path) -> Result<Vec<OcrFile>> {
    if input.is_file() {
        return Ok(vec![OcrFile::new(input)]);
    }
    if input.is_dir() {
        return scan_folder(input);
    }
    Err(SizeChartError::FileNotFound(input.display().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_text_extension() {
        assert!(is_text_extension("txt"));
        assert!(is_text_extension("TXT"));
        assert!(is_text_extension("ocr"));
        assert!(!is_text_extension("jpg"));
        assert!(!is_text_extension("json"));
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(matches!(result, Err(SizeChartError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_folder_sorted() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("c.txt"), "Size S M").unwrap();
        fs::write(dir.path().join("a.txt"), "Size S M").unwrap();
        fs::write(dir.path().join("b.ocr"), "Size S M").unwrap();
        fs::write(dir.path().join("chart.json"), "{}").unwrap();

        let result = scan_folder(dir.path()).unwrap();
        let names: Vec<&str> = result.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.ocr", "c.txt"]);
    }

    #[test]
    fn test_scan_input_single_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("one.json");
        fs::write(&path, "Chest 100").unwrap();

        let result = scan_input(&path).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].read().unwrap(), "Chest 100");
    }

    #[test]
    fn test_scan_input_missing() {
        let result = scan_input(Path::new("/nonexistent/file.txt"));
        assert!(matches!(result, Err(SizeChartError::FileNotFound(_))));
    }
}
