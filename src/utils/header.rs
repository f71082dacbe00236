use super::text::fullwidth_to_halfwidth;

/// ヘッダー文字列を正規化（全角→半角、空白除去、小文字化）
pub fn normalize_header(raw: &str) -> String {
    fullwidth_to_halfwidth(raw)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase()
}

/// 図面BOMの列の役割
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    Description,
    Material,
    Specification,
    Remarks,
    Qty,
}

/// ヘッダーから列の役割を推定する
///
/// "명칭 (DESCRIPTION)" のように韓国語と英語が併記されたヘッダーにも対応する。
pub fn guess_column_role(normalized: &str) -> Option<ColumnRole> {
    if matches_description_header(normalized) {
        Some(ColumnRole::Description)
    } else if matches_material_header(normalized) {
        Some(ColumnRole::Material)
    } else if matches_specification_header(normalized) {
        Some(ColumnRole::Specification)
    } else if matches_remarks_header(normalized) {
        Some(ColumnRole::Remarks)
    } else if matches_qty_header(normalized) {
        Some(ColumnRole::Qty)
    } else {
        None
    }
}

pub fn matches_description_header(normalized: &str) -> bool {
    // 完全一致パターン（最優先）
    if normalized == "description"
        || normalized == "desc"
        || normalized == "name"
        || normalized == "partname"
        || normalized == "명칭"
        || normalized == "품명"
    {
        return true;
    }

    normalized.contains("description")
        || normalized.contains("명칭")
        || normalized.contains("품명")
}

pub fn matches_material_header(normalized: &str) -> bool {
    if normalized == "material" || normalized == "mat" || normalized == "mat'l" {
        return true;
    }

    normalized.contains("material")
        || normalized.contains("재료")
        || normalized.contains("재질")
}

pub fn matches_specification_header(normalized: &str) -> bool {
    if normalized == "specification" || normalized == "size" {
        return true;
    }

    // "spec." "spec'n" のような略記も含む
    normalized.starts_with("spec") || normalized.contains("규격")
}

pub fn matches_remarks_header(normalized: &str) -> bool {
    if normalized == "remark"
        || normalized == "remarks"
        || normalized == "note"
        || normalized == "notes"
    {
        return true;
    }

    normalized.contains("remark") || normalized.contains("비고")
}

pub fn matches_qty_header(normalized: &str) -> bool {
    if normalized == "qty"
        || normalized == "q'ty"
        || normalized == "quantity"
        || normalized == "수량"
    {
        return true;
    }

    normalized.contains("qty")
        || normalized.contains("quantity")
        || normalized.contains("수량")
}
