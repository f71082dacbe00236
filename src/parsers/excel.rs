use std::path::Path;

use calamine::{open_workbook_auto, DataType, Range, Reader};
use tracing::debug;

use crate::models::{AppError, RawRow};

use super::build_raw_rows;

/// ブック内で最初に名称列を持つシートから行を読み込む
pub fn parse_excel_file(path: &Path) -> Result<Vec<RawRow>, AppError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|err| AppError::new(format!("Excelファイルの読み込みに失敗しました: {err}")))?;

    let sheet_names = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(AppError::new("ワークシートが見つかりませんでした。"));
    }

    let mut last_error = None;
    for name in &sheet_names {
        let range = match workbook.worksheet_range(name) {
            Some(Ok(range)) => range,
            Some(Err(err)) => {
                last_error = Some(AppError::new(format!(
                    "ワークシート'{name}'の解析に失敗しました: {err}"
                )));
                continue;
            }
            None => continue,
        };

        match build_raw_rows(range_to_rows(&range)) {
            Ok(rows) => {
                debug!(sheet = %name, rows = rows.len(), "BOMシートを検出しました");
                return Ok(rows);
            }
            Err(err) => last_error = Some(err),
        }
    }

    Err(last_error.unwrap_or_else(|| AppError::new("BOMシートが見つかりませんでした。")))
}

fn range_to_rows(range: &Range<DataType>) -> Vec<Vec<String>> {
    range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect()
}

fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::Empty | DataType::Error(_) => String::new(),
        DataType::String(s) => s.trim().to_string(),
        // 数量セルは 4.0 のような浮動小数で入ることが多い
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{f:.0}"),
        DataType::Int(v) => v.to_string(),
        other => other.to_string(),
    }
}
