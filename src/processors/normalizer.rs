use std::num::IntErrorKind;

use crate::models::RawRow;

/// 空白除去・数量解析済みの入力行
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub description: String,
    pub material: String,
    pub specification: String,
    pub remarks: String,
    pub quantity: u32,
}

impl NormalizedRow {
    /// 材質・規格・備考のうち空でないものを ", " で連結した規格文字列
    pub fn combined_spec(&self) -> String {
        combine_spec(&self.material, &self.specification, &self.remarks)
    }
}

/// OCR行を正規化する。名称が空（または "N/A"）の行は `None`
pub fn normalize_row(row: &RawRow) -> Option<NormalizedRow> {
    let description = trimmed(&row.description);
    if description.is_empty() || description == "N/A" {
        return None;
    }

    Some(NormalizedRow {
        description,
        material: trimmed(&row.material),
        specification: trimmed(&row.specification),
        remarks: trimmed(&row.remarks),
        quantity: parse_quantity(row.qty.as_deref().unwrap_or("")),
    })
}

pub fn combine_spec(material: &str, specification: &str, remarks: &str) -> String {
    [material, specification, remarks]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

/// 先頭の整数部分を数量として読む（"4 EA" → 4）
///
/// 正の整数でなければ 1。u32 に収まらない桁数は u32::MAX に丸める。
pub fn parse_quantity(raw: &str) -> u32 {
    let trimmed = raw.trim();
    let digits: String = trimmed
        .strip_prefix('+')
        .unwrap_or(trimmed)
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    match digits.parse::<u32>() {
        Ok(quantity) if quantity > 0 => quantity,
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => u32::MAX,
        _ => 1,
    }
}

fn trimmed(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}
