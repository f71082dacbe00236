use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::models::AppError;
use crate::rules::{NumberStarter, PrefixRule, RuleSet};

use super::files::{read_text_file, write_output_file};

/// ルール辞書（JSON）を読み込む。省略した項目は既定値
pub fn load_rule_set(path: &Path) -> Result<RuleSet, AppError> {
    let content = read_text_file(path)?;
    let rules: RuleSet = serde_json::from_str(&content)
        .map_err(|err| AppError::new(format!("ルール辞書の解析に失敗しました: {err}")))?;
    validate_rule_set(&rules)?;

    info!(path = %path.display(), "ルール辞書を読み込みました");
    Ok(rules)
}

pub fn save_rule_set(path: &Path, rules: &RuleSet) -> Result<(), AppError> {
    validate_rule_set(rules)?;
    let content = serde_json::to_string_pretty(rules)?;
    write_output_file(path, content.as_bytes())
}

/// 空のキーワード・重複キーワード・空の既定コードを拒否する
pub fn validate_rule_set(rules: &RuleSet) -> Result<(), AppError> {
    check_keywords("semiFinishedKeywords", &rules.semi_finished_keywords)?;
    check_keywords("purchasedKeywords", &rules.purchased_keywords)?;
    check_keywords("fastenerTriggers", &rules.fastener_triggers)?;
    check_keywords("fastenerGenericTokens", &rules.fastener_generic_tokens)?;
    check_prefix_rules("semiFinishedParents", &rules.semi_finished_parents)?;
    check_prefix_rules("purchasedParents", &rules.purchased_parents)?;

    check_number_starters(&rules.number_starters)?;

    let tokens: Vec<String> = rules
        .fastener_mappings
        .iter()
        .map(|mapping| mapping.token.clone())
        .collect();
    check_keywords("fastenerMappings", &tokens)?;

    for (name, value) in [
        ("defaultSemiFinishedCode", &rules.default_semi_finished_code),
        ("fastenerCode", &rules.fastener_code),
        ("fallbackPurchasedCode", &rules.fallback_purchased_code),
        ("defaultUnit", &rules.default_unit),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::new(format!("{}が空です。", name)));
        }
    }

    Ok(())
}

fn check_keywords(list_name: &str, keywords: &[String]) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for keyword in keywords {
        let normalized = keyword.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(AppError::new(format!("{}に空のキーワードがあります。", list_name)));
        }
        if !seen.insert(normalized) {
            return Err(AppError::new(format!(
                "{}のキーワード'{}'が重複しています。",
                list_name, keyword
            )));
        }
    }
    Ok(())
}

// 반제품番号は4桁（IB3606 など）
const MAX_SEMI_FINISHED_START: u32 = 9999;

fn check_number_starters(starters: &[NumberStarter]) -> Result<(), AppError> {
    for starter in starters {
        if starter.code.trim().is_empty() {
            return Err(AppError::new("numberStartersにコードが空の項目があります。"));
        }
        if !(1..=MAX_SEMI_FINISHED_START).contains(&starter.start) {
            return Err(AppError::new(format!(
                "numberStartersの'{}'の開始番号{}は1〜{}の範囲外です。",
                starter.code, starter.start, MAX_SEMI_FINISHED_START
            )));
        }
    }
    Ok(())
}

fn check_prefix_rules(list_name: &str, rules: &[PrefixRule]) -> Result<(), AppError> {
    let keywords: Vec<String> = rules.iter().map(|rule| rule.keyword.clone()).collect();
    check_keywords(list_name, &keywords)?;

    if let Some(rule) = rules.iter().find(|rule| rule.code.trim().is_empty()) {
        return Err(AppError::new(format!(
            "{}のキーワード'{}'にコードがありません。",
            list_name, rule.keyword
        )));
    }
    Ok(())
}
