use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use thiserror::Error;

/// OCRで抽出された図面BOMの1行
///
/// 値は文字列・数値・null のいずれでも受け付ける（OCRはQTYを数値で返すことがある）。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(rename = "DESCRIPTION", default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(rename = "MATERIAL", default, deserialize_with = "lenient_text")]
    pub material: Option<String>,
    #[serde(rename = "SPECIFICATION", default, deserialize_with = "lenient_text")]
    pub specification: Option<String>,
    #[serde(rename = "REMARKS", default, deserialize_with = "lenient_text")]
    pub remarks: Option<String>,
    #[serde(rename = "QTY", default, deserialize_with = "lenient_text")]
    pub qty: Option<String>,
}

impl RawRow {
    pub fn new(
        description: impl Into<String>,
        material: Option<&str>,
        specification: Option<&str>,
        remarks: Option<&str>,
        qty: Option<&str>,
    ) -> Self {
        Self {
            description: Some(description.into()),
            material: material.map(str::to_string),
            specification: specification.map(str::to_string),
            remarks: remarks.map(str::to_string),
            qty: qty.map(str::to_string),
        }
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// 品目区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "반제품")]
    SemiFinished,
    #[serde(rename = "구매품")]
    Purchased,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SemiFinished => "반제품",
            Self::Purchased => "구매품",
        }
    }

    pub fn bom_level(&self) -> BomLevel {
        match self {
            Self::SemiFinished => BomLevel::L3,
            Self::Purchased => BomLevel::L4,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BomLevel {
    L3,
    L4,
}

impl fmt::Display for BomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::L3 => write!(f, "L3"),
            Self::L4 => write!(f, "L4"),
        }
    }
}

/// 複合名称の分割後に得られる処理単位
#[derive(Debug, Clone, PartialEq)]
pub struct SubItem {
    pub description: String,
    pub material: String,
    pub specification: String,
    pub remarks: String,
    pub quantity: u32,
    pub classification: Classification,
}

/// 品目グループ番号の採番キー（品目グループ名 + 規格）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub group_name: String,
    pub combined_spec: String,
}

impl GroupKey {
    pub fn new(group_name: impl Into<String>, combined_spec: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            combined_spec: combined_spec.into(),
        }
    }
}

/// 품목그룹등록 シートの1行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRegistrationRow {
    #[serde(rename = "품목그룹명")]
    pub group_name: String,
    #[serde(rename = "추천상위품목")]
    pub parent_item: String,
    #[serde(rename = "예상품목그룹번호")]
    pub group_number: String,
    #[serde(rename = "구분")]
    pub classification: Classification,
    #[serde(skip)]
    pub material: String,
    #[serde(skip)]
    pub specification: String,
    #[serde(skip)]
    pub remarks: String,
}

/// 표준반제품등록 シートの1行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemiFinishedRow {
    #[serde(rename = "품목그룹명")]
    pub group_name: String,
    #[serde(rename = "파트아이템규격")]
    pub part_spec: String,
    #[serde(rename = "단위")]
    pub unit: String,
}

/// 표준BOM シートの1行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardBomRow {
    #[serde(rename = "LEVEL")]
    pub level: BomLevel,
    #[serde(rename = "품목그룹명")]
    pub group_name: String,
    #[serde(rename = "규격")]
    pub spec: String,
    #[serde(rename = "수량")]
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessedTables {
    #[serde(rename = "품목그룹등록")]
    pub group_registrations: Vec<GroupRegistrationRow>,
    #[serde(rename = "표준반제품등록")]
    pub semi_finished_registrations: Vec<SemiFinishedRow>,
    #[serde(rename = "표준BOM")]
    pub standard_bom: Vec<StandardBomRow>,
}

impl ProcessedTables {
    pub fn is_empty(&self) -> bool {
        self.group_registrations.is_empty()
            && self.semi_finished_registrations.is_empty()
            && self.standard_bom.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Message(String),

    #[error("ファイル入出力エラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSVエラー: {0}")]
    Csv(#[from] csv::Error),

    #[error("設定エラー: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    pub fn new(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_row_accepts_numbers_and_nulls() {
        let json = r#"{"DESCRIPTION":"SHAFT","MATERIAL":null,"QTY":4}"#;
        let row: RawRow = serde_json::from_str(json).unwrap();
        assert_eq!(row.description.as_deref(), Some("SHAFT"));
        assert_eq!(row.material, None);
        assert_eq!(row.specification, None);
        assert_eq!(row.qty.as_deref(), Some("4"));
    }

    #[test]
    fn test_classification_labels() {
        assert_eq!(Classification::SemiFinished.to_string(), "반제품");
        assert_eq!(Classification::Purchased.bom_level(), BomLevel::L4);
        assert_eq!(
            serde_json::to_string(&Classification::Purchased).unwrap(),
            "\"구매품\""
        );
    }
}
