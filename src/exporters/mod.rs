pub mod csv;
pub mod sheets;
pub mod workbook;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDateTime;
use tracing::info;

use crate::models::{AppError, ProcessedTables};
use crate::storage::files::write_output_file;
use crate::utils::text::sanitize_file_component;

pub use sheets::{tables_to_sheets, Cell, Sheet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// 3シートを1ファイルにまとめた XML スプレッドシート
    Workbook,
    /// シートごとのCSV
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_uppercase().as_str() {
            "XML" | "WORKBOOK" => Ok(Self::Workbook),
            "CSV" => Ok(Self::Csv),
            "JSON" => Ok(Self::Json),
            other => Err(AppError::new(format!(
                "未対応のエクスポート形式です: {}",
                other
            ))),
        }
    }
}

/// 出力ファイル名の基本部分（例: "2025_06_01_14_30_MIXER_ERP품목"）
pub fn export_file_stem(parent_group_hint: &str, now: NaiveDateTime) -> String {
    let hint = parent_group_hint.trim();
    let safe_hint = if hint.is_empty() {
        "BOM".to_string()
    } else {
        sanitize_file_component(hint)
    };
    format!("{}_{}_ERP품목", now.format("%Y_%m_%d_%H_%M"), safe_hint)
}

/// ERPテーブルをファイルに出力する
///
/// # 引数
/// * `tables` - 出力する3テーブル
/// * `parent_group_hint` - 上位品目グループ（ファイル名に使用）
/// * `format` - 出力形式
/// * `output_dir` - 出力先ディレクトリ
/// * `now` - ファイル名に付ける日時
///
/// # 戻り値
/// 書き出したファイルのパス
pub fn export_tables(
    tables: &ProcessedTables,
    parent_group_hint: &str,
    format: ExportFormat,
    output_dir: &Path,
    now: NaiveDateTime,
) -> Result<Vec<PathBuf>, AppError> {
    if tables.is_empty() {
        return Err(AppError::new(
            "エクスポートするデータがありません。先にテーブルを生成してください。",
        ));
    }

    let stem = export_file_stem(parent_group_hint, now);
    let mut written = Vec::new();

    match format {
        ExportFormat::Workbook => {
            let path = output_dir.join(format!("{}.xml", stem));
            let content = workbook::write_workbook(&tables_to_sheets(tables))?;
            write_output_file(&path, &content)?;
            written.push(path);
        }
        ExportFormat::Csv => {
            for sheet in tables_to_sheets(tables) {
                let path = output_dir.join(format!("{}_{}.csv", stem, sheet.name));
                let content = csv::export_csv(&sheet)?;
                write_output_file(&path, content.as_bytes())?;
                written.push(path);
            }
        }
        ExportFormat::Json => {
            let path = output_dir.join(format!("{}.json", stem));
            let content = serde_json::to_string_pretty(tables)?;
            write_output_file(&path, content.as_bytes())?;
            written.push(path);
        }
    }

    for path in &written {
        info!(path = %path.display(), "エクスポートしました");
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawRow;
    use crate::processors::build_erp_tables;
    use crate::rules::RuleSet;
    use chrono::NaiveDate;

    fn fixed_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap()
    }

    fn sample_tables() -> ProcessedTables {
        let rows = vec![
            RawRow::new("MIXING BLADE", Some("SUS304"), Some("T10"), None, Some("2")),
            RawRow::new("HEX BOLT, SW, NUT", None, Some("M10x30"), None, Some("4")),
        ];
        build_erp_tables(&rows, "MIXER", &RuleSet::default())
    }

    #[test]
    fn test_export_file_stem() {
        assert_eq!(
            export_file_stem("MIXER/BATCH", fixed_time()),
            "2025_06_01_09_05_MIXER_BATCH_ERP품목"
        );
        assert_eq!(export_file_stem("  ", fixed_time()), "2025_06_01_09_05_BOM_ERP품목");
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("xml".parse::<ExportFormat>().unwrap(), ExportFormat::Workbook);
        assert_eq!(" CSV ".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_export_workbook_file() {
        let dir = tempfile::tempdir().unwrap();
        let written = export_tables(
            &sample_tables(),
            "MIXER",
            ExportFormat::Workbook,
            dir.path(),
            fixed_time(),
        )
        .unwrap();

        assert_eq!(written.len(), 1);
        assert!(written[0].ends_with("2025_06_01_09_05_MIXER_ERP품목.xml"));
        let xml = std::fs::read_to_string(&written[0]).unwrap();
        assert_eq!(xml.matches("<Worksheet ").count(), 3);
        assert!(xml.contains("IB3606"));
    }

    #[test]
    fn test_export_csv_writes_one_file_per_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let written = export_tables(
            &sample_tables(),
            "",
            ExportFormat::Csv,
            &dir.path().join("out"),
            fixed_time(),
        )
        .unwrap();

        assert_eq!(written.len(), 3);
        assert!(written[2].ends_with("2025_06_01_09_05_BOM_ERP품목_표준BOM.csv"));
        let bom = std::fs::read_to_string(&written[2]).unwrap();
        assert_eq!(bom.lines().count(), 5);
    }

    #[test]
    fn test_export_json_round_trips_tables() {
        let dir = tempfile::tempdir().unwrap();
        let tables = sample_tables();
        let written =
            export_tables(&tables, "MIXER", ExportFormat::Json, dir.path(), fixed_time()).unwrap();

        let content = std::fs::read_to_string(&written[0]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["표준BOM"].as_array().unwrap().len(), 4);
        assert_eq!(value["품목그룹등록"][0]["구분"], "반제품");
    }

    #[test]
    fn test_export_empty_tables_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = export_tables(
            &ProcessedTables::default(),
            "",
            ExportFormat::Json,
            dir.path(),
            fixed_time(),
        );
        assert!(result.is_err());
    }
}
