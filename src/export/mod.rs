use crate::error::{Result, SizeChartError};
use sizechart_common::export::excel_core::generate_chart_excel_buffer;
use sizechart_common::{OcrResponse, SizeChart};
use std::path::{Path, PathBuf};

/// 出力先がフォルダ（または拡張子なし）なら入力名から xlsx のパスを作る
pub fn output_path_for(input: &Path, output: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("sizechart");
    match output {
        Some(path) if path.is_dir() || path.extension().is_none() => path.join(format!("{}.xlsx", stem)),
        Some(path) => path.to_path_buf(),
        None => input.with_extension("xlsx"),
    }
}

/// サイズ表JSON（`parse` の出力でも可）を読み込む
pub fn load_chart(path: &Path) -> Result<SizeChart> {
    if !path.exists() {
        return Err(SizeChartError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&content)?;

    if value.get("structured").is_some() {
        let response: OcrResponse = serde_json::from_value(value)?;
        return Ok(response.to_chart());
    }
    Ok(serde_json::from_value(value)?)
}

pub fn export_excel(chart: &SizeChart, output_path: &Path) -> Result<()> {
    let buffer = generate_chart_excel_buffer(chart)?;
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, buffer)?;
    Ok(())
}
