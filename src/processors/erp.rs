use std::collections::HashSet;

use tracing::{debug, info};

use crate::matchers::{classify_item, group_name_for, recommend_parent_item};
use crate::models::{
    Classification, GroupKey, GroupRegistrationRow, ProcessedTables, RawRow, SemiFinishedRow,
    StandardBomRow, SubItem,
};
use crate::rules::RuleSet;

use super::fastener::split_fastener_description;
use super::normalizer::{normalize_row, NormalizedRow};
use super::numbering::AllocatorState;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RegistrationKey {
    group_name: String,
    material: String,
    specification: String,
    remarks: String,
    classification: Classification,
}

/// OCR行から ERP 登録用の3テーブルを組み立てる
///
/// 1つのビルダーが1回の実行に相当し、採番状態と重複判定を保持する。
/// 複数画像の行を続けて `push_rows` すれば同じ採番系列で処理される。
pub struct ErpTableBuilder<'a> {
    rules: &'a RuleSet,
    parent_group_hint: String,
    state: AllocatorState,
    tables: ProcessedTables,
    registered_groups: HashSet<RegistrationKey>,
    registered_semi_finished: HashSet<GroupKey>,
    skipped_rows: usize,
}

impl<'a> ErpTableBuilder<'a> {
    pub fn new(rules: &'a RuleSet, parent_group_hint: &str) -> Self {
        Self {
            rules,
            parent_group_hint: parent_group_hint.trim().to_string(),
            state: AllocatorState::new(),
            tables: ProcessedTables::default(),
            registered_groups: HashSet::new(),
            registered_semi_finished: HashSet::new(),
            skipped_rows: 0,
        }
    }

    pub fn push_rows(&mut self, rows: &[RawRow]) {
        for row in rows {
            self.push_row(row);
        }
    }

    pub fn push_row(&mut self, row: &RawRow) {
        let Some(normalized) = normalize_row(row) else {
            self.skipped_rows += 1;
            debug!("名称が空の行をスキップしました");
            return;
        };

        let combined_spec = normalized.combined_spec();
        for description in split_fastener_description(&normalized.description, self.rules) {
            let item = self.sub_item(&normalized, description);
            self.push_sub_item(&item, &combined_spec);
        }
    }

    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    pub fn finish(self) -> ProcessedTables {
        info!(
            groups = self.tables.group_registrations.len(),
            semi_finished = self.tables.semi_finished_registrations.len(),
            bom_lines = self.tables.standard_bom.len(),
            skipped = self.skipped_rows,
            "ERPテーブルを生成しました"
        );
        self.tables
    }

    fn sub_item(&self, row: &NormalizedRow, description: String) -> SubItem {
        let classification = classify_item(&description, self.rules);
        SubItem {
            description,
            material: row.material.clone(),
            specification: row.specification.clone(),
            remarks: row.remarks.clone(),
            quantity: row.quantity,
            classification,
        }
    }

    fn push_sub_item(&mut self, item: &SubItem, combined_spec: &str) {
        let group_name = group_name_for(
            &item.description,
            item.classification,
            &self.parent_group_hint,
        );
        let parent_item = recommend_parent_item(
            &item.description,
            item.classification,
            &self.parent_group_hint,
            self.rules,
        );
        let key = GroupKey::new(group_name.clone(), combined_spec);
        let group_number = self
            .state
            .allocate(&key, item.classification, parent_item, self.rules);

        debug!(
            description = %item.description,
            classification = %item.classification,
            parent_item,
            group_number = %group_number,
            "品目を処理しました"
        );

        let registration_key = RegistrationKey {
            group_name: group_name.clone(),
            material: item.material.clone(),
            specification: item.specification.clone(),
            remarks: item.remarks.clone(),
            classification: item.classification,
        };
        if self.registered_groups.insert(registration_key) {
            self.tables.group_registrations.push(GroupRegistrationRow {
                group_name: group_name.clone(),
                parent_item: parent_item.to_string(),
                group_number,
                classification: item.classification,
                material: item.material.clone(),
                specification: item.specification.clone(),
                remarks: item.remarks.clone(),
            });
        }

        if item.classification == Classification::SemiFinished
            && self.registered_semi_finished.insert(key)
        {
            self.tables.semi_finished_registrations.push(SemiFinishedRow {
                group_name: group_name.clone(),
                part_spec: combined_spec.to_string(),
                unit: self.rules.default_unit.clone(),
            });
        }

        self.tables.standard_bom.push(StandardBomRow {
            level: item.classification.bom_level(),
            group_name,
            spec: combined_spec.to_string(),
            quantity: item.quantity,
        });
    }
}

/// 1回分の入力行から3テーブルを生成する
///
/// # 引数
/// * `rows` - OCRで抽出した行
/// * `parent_group_hint` - 上位品目グループ（任意）
/// * `rules` - 分類・採番ルール
///
/// # 戻り値
/// 품목그룹등록 / 표준반제품등록 / 표준BOM の3テーブル
pub fn build_erp_tables(
    rows: &[RawRow],
    parent_group_hint: &str,
    rules: &RuleSet,
) -> ProcessedTables {
    let mut builder = ErpTableBuilder::new(rules, parent_group_hint);
    builder.push_rows(rows);
    builder.finish()
}
