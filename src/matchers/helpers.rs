use crate::rules::PrefixRule;

/// 大文字化済みの対象文字列にキーワードが含まれるか（部分一致）
pub fn contains_keyword(upper_target: &str, keyword: &str) -> bool {
    if keyword.is_empty() {
        return false;
    }
    upper_target.contains(&keyword.to_uppercase())
}

pub fn contains_any(upper_target: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .any(|keyword| contains_keyword(upper_target, keyword))
}

/// 宣言順で最初に一致したルールのコードを返す
pub fn first_matching_code<'a>(upper_target: &str, rules: &'a [PrefixRule]) -> Option<&'a str> {
    rules
        .iter()
        .find(|rule| contains_keyword(upper_target, &rule.keyword))
        .map(|rule| rule.code.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(keyword: &str, code: &str) -> PrefixRule {
        PrefixRule {
            keyword: keyword.to_string(),
            code: code.to_string(),
        }
    }

    #[test]
    fn test_contains_keyword_is_substring_match() {
        assert!(contains_keyword("SWITCH BOX", "sw"));
        assert!(contains_keyword("BOLTED PLATE", "BOLT"));
        assert!(!contains_keyword("PLATE", ""));
    }

    #[test]
    fn test_first_matching_code_respects_declaration_order() {
        let rules = vec![rule("BREAKER", "PE13"), rule("CIRCUIT BREAKER", "PE99")];
        assert_eq!(first_matching_code("CIRCUIT BREAKER 3P", &rules), Some("PE13"));
        assert_eq!(first_matching_code("RELAY", &rules), None);
    }
}
