use csv::{QuoteStyle, WriterBuilder};

use crate::models::AppError;

use super::sheets::Sheet;

const UTF8_BOM: &str = "\u{FEFF}";

/// 1シートをCSV文字列に変換する
///
/// Excel で韓国語が文字化けしないよう先頭に UTF-8 BOM を付ける。
pub fn export_csv(sheet: &Sheet) -> Result<String, AppError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(&sheet.headers)?;
    for row in &sheet.rows {
        writer.write_record(row.iter().map(|cell| cell.display()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| AppError::new(format!("CSVバッファ取得エラー: {err}")))?;
    let body = String::from_utf8(bytes)
        .map_err(|err| AppError::new(format!("UTF-8変換エラー: {err}")))?;

    Ok(format!("{UTF8_BOM}{body}"))
}
