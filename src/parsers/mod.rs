mod builder;
mod csv;
mod excel;
pub mod ocr;

use std::path::Path;

use tracing::info;

use crate::models::{AppError, RawRow};
use crate::storage::files::read_text_file;

pub use builder::build_raw_rows;
pub use ocr::{parse_ocr_text, sanitize_ocr_text};

/// 入力ファイルから図面BOMの行を読み込む
///
/// 拡張子で形式を判定する（.json/.txt: OCR応答、.csv、.xlsx/.xls）。
pub fn parse_input_file(path: &Path) -> Result<Vec<RawRow>, AppError> {
    if !path.exists() {
        return Err(AppError::new(format!(
            "ファイルが見つかりません: {}",
            path.display()
        )));
    }

    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .ok_or_else(|| AppError::new("ファイル拡張子を判定できませんでした。"))?;

    let rows = match ext.as_str() {
        "json" | "txt" => parse_ocr_text(&read_text_file(path)?)?,
        "csv" => csv::parse_csv_file(path)?,
        "xlsx" | "xls" => excel::parse_excel_file(path)?,
        other => {
            return Err(AppError::new(format!(
                "サポートされていないファイル形式です: {}",
                other
            )))
        }
    };

    info!(path = %path.display(), rows = rows.len(), "入力ファイルを読み込みました");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_input_file_dispatches_on_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"DESCRIPTION":"SHAFT","QTY":"2"}}]"#).unwrap();

        let rows = parse_input_file(file.path()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].description.as_deref(), Some("SHAFT"));
    }

    #[test]
    fn test_parse_input_file_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        let err = parse_input_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("png"));
    }

    #[test]
    fn test_parse_input_file_missing() {
        assert!(parse_input_file(Path::new("/nonexistent/bom.json")).is_err());
    }
}
