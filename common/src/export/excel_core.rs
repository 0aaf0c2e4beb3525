//! Excel生成（共通ライブラリ）
//!
//! 復元したサイズ表を1表1シートで書き出す。複数表が無ければ `rows` を1シートにする。

use crate::error::{Error, Result};
use crate::types::{SizeChart, SizeRow};
use crate::vocabulary::display_name;
use rust_xlsxwriter::*;

/// サイズ列の幅（文字数）
const SIZE_COL_WIDTH: f64 = 8.0;
/// 計測列の幅（文字数）
const VALUE_COL_WIDTH: f64 = 12.0;

/// rust_xlsxwriter のエラーを文脈付きの `Error::Export` にする
fn export_error(context: &'static str) -> impl Fn(XlsxError) -> Error {
    move |e| Error::Export(format!("{}: {}", context, e))
}

/// 書き出す1シート分
struct Sheet<'a> {
    name: String,
    headers: &'a [String],
    rows: &'a [SizeRow],
}

fn sheets(chart: &SizeChart) -> Vec<Sheet<'_>> {
    if chart.tables.is_empty() {
        return vec![Sheet {
            name: "1".to_string(),
            headers: &chart.headers,
            rows: &chart.rows,
        }];
    }
    chart
        .tables
        .iter()
        .enumerate()
        .map(|(i, table)| Sheet {
            name: format!("{} {}", i + 1, table.garment_type),
            headers: &table.headers,
            rows: &table.rows,
        })
        .collect()
}

/// 見出しに無いが行にあるキーも列にする
fn columns(headers: &[String], rows: &[SizeRow]) -> Vec<String> {
    let mut keys: Vec<String> = headers.to_vec();
    for row in rows {
        for key in row.measurements.keys() {
            if !keys.contains(key) {
                keys.push(key.clone());
            }
        }
    }
    keys
}

/// Excelをバッファに生成
///
/// # Arguments
/// * `chart` - 復元済みのサイズ表
pub fn generate_chart_excel_buffer(chart: &SizeChart) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();

    let header_format = Format::new()
        .set_bold()
        .set_font_size(10.0)
        .set_font_color(Color::RGB(0x555555))
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xAAAAAA));

    let size_format = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    let value_format = Format::new()
        .set_num_format("0.0")
        .set_align(FormatAlign::Right)
        .set_border(FormatBorder::Hair)
        .set_border_color(Color::RGB(0xCCCCCC));

    for sheet in sheets(chart) {
        let keys = columns(sheet.headers, sheet.rows);
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .map_err(export_error("シート名設定エラー"))?;

        worksheet
            .set_column_width(0, SIZE_COL_WIDTH)
            .map_err(export_error("列幅設定エラー"))?;
        worksheet
            .write_string_with_format(0, 0, "Size", &header_format)
            .map_err(export_error("見出し書き込みエラー"))?;

        for (c, key) in keys.iter().enumerate() {
            let col = (c + 1) as u16;
            worksheet
                .set_column_width(col, VALUE_COL_WIDTH)
                .map_err(export_error("列幅設定エラー"))?;
            worksheet
                .write_string_with_format(0, col, display_name(key), &header_format)
                .map_err(export_error("見出し書き込みエラー"))?;
        }

        for (r, row) in sheet.rows.iter().enumerate() {
            let line = (r + 1) as u32;
            worksheet
                .write_string_with_format(line, 0, &row.size, &size_format)
                .map_err(export_error("サイズ書き込みエラー"))?;
            for (c, key) in keys.iter().enumerate() {
                if let Some(value) = row.get(key) {
                    worksheet
                        .write_number_with_format(line, (c + 1) as u16, value, &value_format)
                        .map_err(export_error("値書き込みエラー"))?;
                }
            }
        }
    }

    // バッファに書き出し
    workbook
        .save_to_buffer()
        .map_err(export_error("Excel保存エラー"))
}
