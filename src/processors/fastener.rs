use crate::matchers::helpers::contains_any;
use crate::rules::RuleSet;

const DELIMITERS: [char; 2] = [',', '/'];

/// ボルト類の複合名称（例: "HEX BOLT, SW, NUT"）を個別の名称に分割する
///
/// 分割対象でない名称はそのまま1要素で返す。
pub fn split_fastener_description(description: &str, rules: &RuleSet) -> Vec<String> {
    let upper = description.to_uppercase();
    let triggered = contains_any(&upper, &rules.fastener_triggers) && upper.contains(DELIMITERS);

    if !triggered {
        return vec![description.to_string()];
    }

    let parts: Vec<String> = upper
        .split(DELIMITERS)
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .map(|part| {
            rules
                .normalized_fastener(part)
                .map(str::to_string)
                .unwrap_or_else(|| part.to_string())
        })
        .collect();

    if parts.is_empty() {
        return vec![description.to_string()];
    }

    parts
}
