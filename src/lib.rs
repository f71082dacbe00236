pub mod config;
pub mod logging;
pub mod models;
pub mod rules;
pub mod utils;

pub mod exporters;
pub mod matchers;
pub mod parsers;
pub mod processors;
pub mod storage;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use crate::config::AppConfig;
use crate::exporters::ExportFormat;
use crate::models::{AppError, Classification, ProcessedTables};
use crate::processors::ErpTableBuilder;
use crate::rules::RuleSet;

/// ルール辞書を読み込む。パスがなければ既定ルール
pub fn load_rules(path: Option<&Path>) -> Result<RuleSet, AppError> {
    match path {
        Some(path) => storage::load_rule_set(path),
        None => Ok(RuleSet::default()),
    }
}

/// 入力ファイル群から ERP テーブルを生成する
///
/// 全ファイルの行を指定順に連結し、1回の実行（同じ採番系列）として処理する。
///
/// # 引数
/// * `inputs` - OCR応答（.json/.txt）または表形式（.csv/.xlsx）のファイル
/// * `parent_group_hint` - 上位品目グループ（任意）
/// * `rules` - 分類・採番ルール
///
/// # 戻り値
/// 품목그룹등록 / 표준반제품등록 / 표준BOM の3テーブル
pub fn build_tables_from_files(
    inputs: &[PathBuf],
    parent_group_hint: &str,
    rules: &RuleSet,
) -> Result<ProcessedTables, AppError> {
    let mut builder = ErpTableBuilder::new(rules, parent_group_hint);
    for input in inputs {
        let rows = parsers::parse_input_file(input)?;
        builder.push_rows(&rows);
    }
    Ok(builder.finish())
}

/// 1つの名称に対する判定結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPreview {
    pub description: String,
    pub classification: Classification,
    pub group_name: String,
    pub parent_item: String,
}

/// 名称を分割・分類し、品目グループ名と推奨上位品目を返す（採番はしない）
///
/// # 引数
/// * `description` - 品目名称
/// * `parent_group_hint` - 上位品目グループ（任意）
/// * `rules` - 分類ルール
///
/// # 戻り値
/// 分割後の各品目の判定結果
pub fn preview_item(
    description: &str,
    parent_group_hint: &str,
    rules: &RuleSet,
) -> Vec<ItemPreview> {
    processors::fastener::split_fastener_description(description.trim(), rules)
        .into_iter()
        .map(|part| {
            let classification = matchers::classify_item(&part, rules);
            ItemPreview {
                group_name: matchers::group_name_for(&part, classification, parent_group_hint),
                parent_item: matchers::recommend_parent_item(
                    &part,
                    classification,
                    parent_group_hint,
                    rules,
                )
                .to_string(),
                classification,
                description: part,
            }
        })
        .collect()
}

#[derive(Parser)]
#[command(
    name = "bomerp",
    about = "Convert CAD BOM tables into ERP registration sheets",
    version
)]
struct Cli {
    /// Rule dictionary (JSON) overriding the built-in rules
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the three ERP tables and export them
    Build {
        /// OCR response (.json/.txt) or table (.csv/.xlsx) files, processed as one run
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Parent item group (e.g. MIXER, TANK)
        #[arg(long)]
        hint: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Output format: xml, csv or json
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Show how a single description is split, classified and grouped
    Classify {
        description: String,

        /// Parent item group
        #[arg(long)]
        hint: Option<String>,
    },

    /// Print the active rule dictionary as JSON, or save it to a file
    Rules {
        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().context("設定の読み込みに失敗しました")?;
    logging::init_logging(&config.logging)?;

    let rules_path = cli.rules.clone().or_else(|| {
        (!config.rules.path.is_empty()).then(|| PathBuf::from(&config.rules.path))
    });
    let rules = load_rules(rules_path.as_deref())?;

    match cli.command {
        Commands::Build {
            inputs,
            hint,
            output_dir,
            format,
        } => {
            let hint = hint.unwrap_or_else(|| config.parent_group_hint.clone());
            let format: ExportFormat = format
                .as_deref()
                .unwrap_or(config.export.format.as_str())
                .parse()?;
            let output_dir =
                output_dir.unwrap_or_else(|| PathBuf::from(&config.export.output_dir));

            let tables = build_tables_from_files(&inputs, &hint, &rules)?;
            println!("품목그룹등록: {}", tables.group_registrations.len());
            println!("표준반제품등록: {}", tables.semi_finished_registrations.len());
            println!("표준BOM: {}", tables.standard_bom.len());

            let now = chrono::Local::now().naive_local();
            let written = exporters::export_tables(&tables, &hint, format, &output_dir, now)?;
            for path in written {
                println!("{}", path.display());
            }
        }
        Commands::Classify { description, hint } => {
            let hint = hint.unwrap_or_else(|| config.parent_group_hint.clone());
            let previews = preview_item(&description, &hint, &rules);
            println!("{}", serde_json::to_string_pretty(&previews)?);
        }
        Commands::Rules { output } => match output {
            Some(path) => {
                storage::save_rule_set(&path, &rules)?;
                info!(path = %path.display(), "ルール辞書を保存しました");
            }
            None => println!("{}", serde_json::to_string_pretty(&rules)?),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_build_tables_from_files_shares_numbering_across_inputs() {
        let mut first = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            first,
            r#"[{{"DESCRIPTION":"SIDE COVER","MATERIAL":"SS400","SPECIFICATION":"T6","QTY":"1"}},
               {{"DESCRIPTION":"MOTOR","SPECIFICATION":"3.7kW","QTY":"1"}}]"#
        )
        .unwrap();

        let mut second = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(
            second,
            "DESCRIPTION,MATERIAL,SPECIFICATION,REMARKS,QTY\nSIDE COVER,SS400,T6,,2\nSHAFT,S45C,,,1\n"
        )
        .unwrap();

        let inputs = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        let tables = build_tables_from_files(&inputs, "MIXER", &RuleSet::default()).unwrap();

        let numbers: Vec<&str> = tables
            .group_registrations
            .iter()
            .map(|row| row.group_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["IB3606", "PZ01-001", "IB3607"]);
        assert_eq!(tables.semi_finished_registrations.len(), 2);
        assert_eq!(tables.standard_bom.len(), 4);
    }

    #[test]
    fn test_build_tables_from_files_propagates_parse_errors() {
        let mut bad = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(bad, "no table here").unwrap();

        let result = build_tables_from_files(&[bad.path().to_path_buf()], "", &RuleSet::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_preview_item_splits_fasteners() {
        let previews = preview_item("HEX BOLT, SW, NUT", "MIXER", &RuleSet::default());

        assert_eq!(previews.len(), 3);
        assert_eq!(previews[1].description, "SW (SPRING WASHER)");
        assert!(previews
            .iter()
            .all(|p| p.classification == Classification::Purchased && p.parent_item == "RR01"));
        assert_eq!(previews[0].group_name, "HEX BOLT");
    }

    #[test]
    fn test_preview_item_semi_finished_group_name() {
        let previews = preview_item("MIXING BLADE", "MIXER", &RuleSet::default());
        assert_eq!(previews[0].group_name, "MIXER / MIXING BLADE");
        assert_eq!(previews[0].parent_item, "MB");
    }

    #[test]
    fn test_load_rules_defaults_without_path() {
        assert_eq!(load_rules(None).unwrap(), RuleSet::default());
    }
}
