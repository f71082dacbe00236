use std::collections::HashMap;

use crate::models::{AppError, RawRow};
use crate::utils::header::{guess_column_role, normalize_header, ColumnRole};

/// 表形式の行（先頭の非空行がヘッダー）から図面BOMの行を組み立てる
pub fn build_raw_rows(rows: Vec<Vec<String>>) -> Result<Vec<RawRow>, AppError> {
    let mut iter = rows.into_iter().skip_while(|row| is_blank_row(row));

    let header = iter
        .next()
        .ok_or_else(|| AppError::new("BOMデータ内に有効なヘッダー行が見つかりませんでした。"))?;

    let mut columns: HashMap<ColumnRole, usize> = HashMap::new();
    for (idx, name) in header.iter().enumerate() {
        if let Some(role) = guess_column_role(&normalize_header(name)) {
            columns.entry(role).or_insert(idx);
        }
    }

    if !columns.contains_key(&ColumnRole::Description) {
        return Err(AppError::new(
            "名称（DESCRIPTION / 명칭）の列が見つかりませんでした。",
        ));
    }

    let cell = |row: &[String], role: ColumnRole| -> Option<String> {
        columns
            .get(&role)
            .and_then(|idx| row.get(*idx))
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let raw_rows = iter
        .filter(|row| !is_blank_row(row))
        .map(|row| RawRow {
            description: cell(&row, ColumnRole::Description),
            material: cell(&row, ColumnRole::Material),
            specification: cell(&row, ColumnRole::Specification),
            remarks: cell(&row, ColumnRole::Remarks),
            qty: cell(&row, ColumnRole::Qty),
        })
        .collect();

    Ok(raw_rows)
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_build_raw_rows_maps_columns() {
        let rows = vec![
            row(&["", "", ""]),
            row(&["NO", "명칭", "재료", "규격", "수량"]),
            row(&["1", "SHAFT", "S45C", "Ø30x200", "2"]),
            row(&["", "", "", "", ""]),
            row(&["2", "HEX BOLT, NUT", "", "M10", "8"]),
        ];

        let raw = build_raw_rows(rows).unwrap();

        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].description.as_deref(), Some("SHAFT"));
        assert_eq!(raw[0].material.as_deref(), Some("S45C"));
        assert_eq!(raw[0].qty.as_deref(), Some("2"));
        assert_eq!(raw[1].material, None);
        assert_eq!(raw[1].remarks, None);
    }

    #[test]
    fn test_abbreviated_headers_map_columns() {
        let rows = vec![
            row(&["DESCRIPTION", "MAT'L", "SPEC.", "Q'TY"]),
            row(&["SIDE COVER", "SS400", "T6", "2"]),
        ];

        let raw = build_raw_rows(rows).unwrap();

        assert_eq!(raw[0].material.as_deref(), Some("SS400"));
        assert_eq!(raw[0].specification.as_deref(), Some("T6"));
        assert_eq!(raw[0].qty.as_deref(), Some("2"));
    }

    #[test]
    fn test_missing_description_column_is_error() {
        let rows = vec![row(&["MATERIAL", "QTY"]), row(&["SS400", "1"])];
        assert!(build_raw_rows(rows).is_err());
    }
}
