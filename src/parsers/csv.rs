use std::path::Path;

use csv::ReaderBuilder;

use crate::models::{AppError, RawRow};

use super::build_raw_rows;

pub fn parse_csv_file(path: &Path) -> Result<Vec<RawRow>, AppError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|err| AppError::new(format!("CSVの読み込みに失敗しました: {err}")))?;

    let mut rows = Vec::new();
    for record in reader
        .records()
        .map(|result| result.map(|rec| rec.iter().map(strip_utf8_bom).collect()))
    {
        let row: Vec<String> =
            record.map_err(|err| AppError::new(format!("CSVの解析に失敗しました: {err}")))?;
        rows.push(row);
    }

    build_raw_rows(rows)
}

fn strip_utf8_bom(cell: &str) -> String {
    cell.trim_start_matches('\u{FEFF}').to_string()
}
