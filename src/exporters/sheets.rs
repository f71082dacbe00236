use crate::models::ProcessedTables;
use crate::utils::text::text_width;

pub const GROUP_REGISTRATION_SHEET: &str = "품목그룹등록";
pub const SEMI_FINISHED_SHEET: &str = "표준반제품등록";
pub const STANDARD_BOM_SHEET: &str = "표준BOM";

const MIN_COLUMN_WIDTH: usize = 10;
const MAX_COLUMN_WIDTH: usize = 60;
const COLUMN_PADDING: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(u32),
}

impl Cell {
    pub fn display(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Number(value) => value.to_string(),
        }
    }
}

/// 出力用の1シート分のデータ
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// 列幅（文字数）。ヘッダーと各セルの最大幅に余白を足し、上限で切る
    pub fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(idx, header)| {
                let widest_cell = self
                    .rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| text_width(&cell.display()) + COLUMN_PADDING)
                    .max()
                    .unwrap_or(0);
                let header_width = text_width(header).max(MIN_COLUMN_WIDTH) + COLUMN_PADDING;
                header_width.max(widest_cell).min(MAX_COLUMN_WIDTH)
            })
            .collect()
    }
}

/// 3テーブルをシート順（품목그룹등록, 표준반제품등록, 표준BOM）に並べる
pub fn tables_to_sheets(tables: &ProcessedTables) -> Vec<Sheet> {
    let groups = Sheet {
        name: GROUP_REGISTRATION_SHEET,
        headers: vec!["품목그룹명", "추천 상위품목", "예상품목그룹번호", "구분"],
        rows: tables
            .group_registrations
            .iter()
            .map(|row| {
                vec![
                    Cell::Text(row.group_name.clone()),
                    Cell::Text(row.parent_item.clone()),
                    Cell::Text(row.group_number.clone()),
                    Cell::Text(row.classification.label().to_string()),
                ]
            })
            .collect(),
    };

    let semi_finished = Sheet {
        name: SEMI_FINISHED_SHEET,
        headers: vec!["품목그룹명", "파트 아이템 규격", "단위"],
        rows: tables
            .semi_finished_registrations
            .iter()
            .map(|row| {
                vec![
                    Cell::Text(row.group_name.clone()),
                    Cell::Text(row.part_spec.clone()),
                    Cell::Text(row.unit.clone()),
                ]
            })
            .collect(),
    };

    let bom = Sheet {
        name: STANDARD_BOM_SHEET,
        headers: vec!["LEVEL", "품목그룹명", "규격", "수량"],
        rows: tables
            .standard_bom
            .iter()
            .map(|row| {
                vec![
                    Cell::Text(row.level.to_string()),
                    Cell::Text(row.group_name.clone()),
                    Cell::Text(row.spec.clone()),
                    Cell::Number(row.quantity),
                ]
            })
            .collect(),
    };

    vec![groups, semi_finished, bom]
}
