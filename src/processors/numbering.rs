use std::collections::HashMap;

use crate::models::{Classification, GroupKey};
use crate::rules::RuleSet;

/// 1回のテーブル生成中だけ保持する採番状態
///
/// 接頭辞ごとの次番号と、採番済みキーのキャッシュを持つ。実行ごとに新しく作る。
#[derive(Debug, Default)]
pub struct AllocatorState {
    counters: HashMap<String, u64>,
    assigned: HashMap<GroupKey, String>,
}

impl AllocatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 品目グループ番号を採番する
    ///
    /// 同じキーには常に同じ番号を返す。
    ///
    /// # 引数
    /// * `key` - 品目グループ名 + 規格
    /// * `classification` - 品目区分
    /// * `prefix_code` - 推奨上位品目コード
    /// * `rules` - 接頭辞・開始番号の表
    ///
    /// # 戻り値
    /// 반제품は "IB3606"、구매품は "RR01-001" の形式
    pub fn allocate(
        &mut self,
        key: &GroupKey,
        classification: Classification,
        prefix_code: &str,
        rules: &RuleSet,
    ) -> String {
        if let Some(number) = self.assigned.get(key) {
            return number.clone();
        }

        let number = match classification {
            Classification::SemiFinished => {
                let base_prefix = rules.number_prefix(prefix_code);
                let sequence =
                    self.next_sequence(base_prefix, || u64::from(rules.number_start(prefix_code)));
                format!("{}{:04}", base_prefix, sequence)
            }
            Classification::Purchased => {
                let sequence = self.next_sequence(prefix_code, || 1);
                format!("{}-{:03}", prefix_code, sequence)
            }
        };

        self.assigned.insert(key.clone(), number.clone());
        number
    }

    fn next_sequence(&mut self, counter_key: &str, seed: impl FnOnce() -> u64) -> u64 {
        let counter = self
            .counters
            .entry(counter_key.to_string())
            .or_insert_with(seed);
        let current = *counter;
        *counter = counter.saturating_add(1);
        current
    }
}
