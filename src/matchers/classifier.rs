use crate::models::Classification;
use crate::rules::RuleSet;

use super::helpers::contains_any;

/// 名称から 반제품 / 구매품 を判定する
///
/// 구매품キーワードが優先される。どちらにも一致しない場合は 구매품。
pub fn classify_item(description: &str, rules: &RuleSet) -> Classification {
    let upper = description.to_uppercase();

    if contains_any(&upper, &rules.purchased_keywords) {
        return Classification::Purchased;
    }
    if contains_any(&upper, &rules.semi_finished_keywords) {
        return Classification::SemiFinished;
    }

    Classification::Purchased
}
