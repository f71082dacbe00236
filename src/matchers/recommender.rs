use crate::models::Classification;
use crate::rules::RuleSet;

use super::helpers::{contains_any, first_matching_code};

/// 推奨上位品目コード（ERPコード接頭辞）を決定する
///
/// # 引数
/// * `description` - 品目名称（分割・標準化済み）
/// * `classification` - 品目区分
/// * `parent_group_hint` - 利用者が入力した上位品目グループ（空でも可）
///
/// # 戻り値
/// ERPコード接頭辞（例: "MB", "RR01", "PZ01"）
pub fn recommend_parent_item<'a>(
    description: &str,
    classification: Classification,
    parent_group_hint: &str,
    rules: &'a RuleSet,
) -> &'a str {
    let upper_desc = description.to_uppercase();

    match classification {
        Classification::SemiFinished => {
            let upper_hint = parent_group_hint.trim().to_uppercase();
            if let Some(code) = rules.semi_finished_parent_for_hint(&upper_hint) {
                return code;
            }
            first_matching_code(&upper_desc, &rules.semi_finished_parents)
                .unwrap_or(rules.default_semi_finished_code.as_str())
        }
        Classification::Purchased => {
            if let Some(code) = first_matching_code(&upper_desc, &rules.purchased_parents) {
                return code;
            }
            if contains_any(&upper_desc, &rules.fastener_generic_tokens) {
                return rules.fastener_code.as_str();
            }
            rules.fallback_purchased_code.as_str()
        }
    }
}

/// 上位品目グループを付けた品目グループ名。구매품は名称のみ
pub fn group_name_for(
    description: &str,
    classification: Classification,
    parent_group_hint: &str,
) -> String {
    let hint = parent_group_hint.trim();
    match classification {
        Classification::SemiFinished if !hint.is_empty() => format!("{} / {}", hint, description),
        _ => description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::PrefixRule;

    #[test]
    fn test_hint_takes_priority_over_description() {
        let rules = RuleSet::default();
        let code = recommend_parent_item(
            "TANK SUPPORT",
            Classification::SemiFinished,
            " hopper ",
            &rules,
        );
        assert_eq!(code, "HP");
    }

    #[test]
    fn test_semi_finished_scans_description_then_defaults() {
        let rules = RuleSet::default();
        assert_eq!(
            recommend_parent_item("TANK COVER", Classification::SemiFinished, "LINE 2", &rules),
            "TK"
        );
        assert_eq!(
            recommend_parent_item("SHAFT", Classification::SemiFinished, "", &rules),
            "MB"
        );
    }

    #[test]
    fn test_purchased_lookup_order_and_fallbacks() {
        let rules = RuleSet::default();
        assert_eq!(
            recommend_parent_item("CIRCUIT BREAKER", Classification::Purchased, "", &rules),
            "PE13"
        );
        assert_eq!(
            recommend_parent_item("SAFETY PLC", Classification::Purchased, "", &rules),
            "PE01"
        );
        assert_eq!(
            recommend_parent_item("UNKNOWN WIDGET", Classification::Purchased, "", &rules),
            "PZ01"
        );
    }

    #[test]
    fn test_fastener_generic_fallback() {
        let mut rules = RuleSet::default();
        rules.purchased_parents = vec![PrefixRule {
            keyword: "PLC".to_string(),
            code: "PE01".to_string(),
        }];
        assert_eq!(
            recommend_parent_item("SET SCREW M6", Classification::Purchased, "", &rules),
            "RR01"
        );
    }

    #[test]
    fn test_group_name_for() {
        assert_eq!(
            group_name_for("MIXING BLADE", Classification::SemiFinished, " MIXER "),
            "MIXER / MIXING BLADE"
        );
        assert_eq!(
            group_name_for("MIXING BLADE", Classification::SemiFinished, ""),
            "MIXING BLADE"
        );
        assert_eq!(group_name_for("NUT", Classification::Purchased, "MIXER"), "NUT");
    }
}
