use serde::{Deserialize, Serialize};

/// キーワード → ERPコード の対応（宣言順が優先順位）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixRule {
    pub keyword: String,
    pub code: String,
}

/// 推奨上位品目コード → 品目グループ番号の接頭辞
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberPrefix {
    pub code: String,
    pub prefix: String,
}

/// 推奨上位品目コード → 採番開始番号
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberStarter {
    pub code: String,
    pub start: u32,
}

/// 分割したボルト類名称の標準化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FastenerMapping {
    pub token: String,
    pub normalized: String,
}

/// 分類・推奨・採番・分割のルール一式
///
/// 既定値は `RuleSet::default()`。JSONで上書きする場合、省略した項目は既定値のまま残る。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleSet {
    pub semi_finished_keywords: Vec<String>,
    pub purchased_keywords: Vec<String>,
    pub semi_finished_parents: Vec<PrefixRule>,
    pub purchased_parents: Vec<PrefixRule>,
    pub number_prefixes: Vec<NumberPrefix>,
    pub number_starters: Vec<NumberStarter>,
    pub fastener_triggers: Vec<String>,
    pub fastener_mappings: Vec<FastenerMapping>,
    pub fastener_generic_tokens: Vec<String>,
    pub default_semi_finished_code: String,
    pub fastener_code: String,
    pub fallback_purchased_code: String,
    pub default_unit: String,
}

impl RuleSet {
    /// 상위품목그룹 入力と完全一致する半製品コード
    pub fn semi_finished_parent_for_hint(&self, upper_hint: &str) -> Option<&str> {
        if upper_hint.is_empty() {
            return None;
        }
        self.semi_finished_parents
            .iter()
            .find(|rule| rule.keyword.to_uppercase() == upper_hint)
            .map(|rule| rule.code.as_str())
    }

    /// 採番用の接頭辞。未登録のコードはそのまま接頭辞になる
    pub fn number_prefix<'a>(&'a self, code: &'a str) -> &'a str {
        self.number_prefixes
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.prefix.as_str())
            .unwrap_or(code)
    }

    pub fn number_start(&self, code: &str) -> u32 {
        self.number_starters
            .iter()
            .find(|entry| entry.code == code)
            .map(|entry| entry.start)
            .unwrap_or(1)
    }

    pub fn normalized_fastener(&self, token: &str) -> Option<&str> {
        self.fastener_mappings
            .iter()
            .find(|mapping| mapping.token.to_uppercase() == token)
            .map(|mapping| mapping.normalized.as_str())
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

fn prefix_rules(list: &[(&str, &str)]) -> Vec<PrefixRule> {
    list.iter()
        .map(|(keyword, code)| PrefixRule {
            keyword: keyword.to_string(),
            code: code.to_string(),
        })
        .collect()
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            semi_finished_keywords: words(&[
                // 機械部品
                "COVER", "HOUSING", "BUSHING", "SPACER", "SHAFT", "BLADE", "SLEEVE", "CAP", "PLATE",
                // フレーム・構造物
                "FRAME", "BRACKET", "BASE", "PANEL", "SUPPORT", "MOUNT",
                // チャンバー
                "CHAMBER", "NOZZLE", "FLANGE", "TUBE", "PIPE",
                // ミキシング
                "ROTOR", "IMPELLER", "MIXING BLADE", "AGITATOR",
                "GUIDE", "RING", "BLOCK", "STOPPER",
            ]),
            purchased_keywords: words(&[
                "BALL BEARING", "BEARING WASHER", "BEARING NUT", "OIL SEAL", "BUSH BEARING",
                // ボルト・ナット・ワッシャー（複合名称を含む）
                "HEX.BOLT", "HEX BOLT", "BOLT", "SW", "SPRING WASHER", "PW", "PLAIN WASHER", "NUT",
                "ANCHOR BOLT", "HEX SOCKET HEAD BOLT",
                "SENSOR", "MOTOR", "ENCODER", "SWITCH", "RELAY", "BREAKER",
                "CYLINDER", "VALVE", "COUPLING", "FITTING", "HOSE", "PUMP",
                "BELT", "CHAIN", "SPROCKET", "FILTER", "SEAL", "O-RING", "V-RING",
            ]),
            semi_finished_parents: prefix_rules(&[
                ("MIXER", "MB"),
                ("BATCH", "MB"),
                ("TANK", "TK"),
                ("HOPPER", "HP"),
            ]),
            purchased_parents: prefix_rules(&[
                ("PLC", "PE01"),
                ("HMI", "PE02"),
                ("INVERTER", "PE03"),
                ("SAFETY PLC", "PE04"),
                ("NOISE FILTER", "PE05"),
                ("BARCODE READER", "PE06"),
                ("UPS", "PE07"),
                ("CABLE", "PE08"),
                ("M/C", "PE09"),
                ("MAGNETIC CONTACTOR", "PE09"),
                ("SAFETY RELAY", "PE10"),
                ("SMPS", "PE11"),
                ("TERMINAL BLOCK", "PE12"),
                ("CIRCUIT BREAKER", "PE13"),
                ("BREAKER", "PE13"),
                ("TRANSFORMER", "PE14"),
                ("ETHERNET SWITCH", "PE15"),
                ("E&I SYSTEM", "PE16"),
                ("EXPLOSION PROOF BARRIER", "PE17"),
                ("ELECTRIC LABEL", "PE18"),
                ("DUCT", "PE19"),
                ("MACHINERY", "PM01"),
                ("PART", "PM02"),
                ("SEAL", "PM03"),
                ("GASKET", "PM03"),
                ("O-RING", "PM03"),
                ("V-RING", "PM03"),
                ("GAUGE", "PM04"),
                ("SENSOR", "PM04"),
                ("VALVE", "PN01"),
                ("INSULATION", "PN02"),
                ("IN-LINE ITEM", "PN03"),
                ("HANGER", "PN04"),
                ("SUPPORT", "PN04"),
                ("INSTRUMENT", "PN05"),
                ("OTHER PIPING", "PN06"),
                ("BOLT", "RR01"),
                ("NUT", "RR01"),
                ("WASHER", "RR01"),
                ("SCREW", "RR01"),
                ("FERRULE", "RR02"),
                ("FITTING", "RR03"),
                ("FLANGE", "RR04"),
                ("PIPE", "RR05"),
                ("TUBE", "RR05"),
                ("PLATE", "RR06"),
                ("SHAPE STEEL", "RR08"),
                ("ETC_RAW_MATERIAL", "RR99"),
                ("게이지", "CZ01"),
                ("수평기", "CZ02"),
                ("길이/두께 측정기", "CZ03"),
                ("기타계측기", "CZ04"),
                ("일반공구", "CZ05"),
                ("절삭/절단 공구", "CZ06"),
                ("포장재", "CZ07"),
                ("안전용품", "CZ08"),
                ("안전착용품", "CZ09"),
                ("연마자재", "CZ10"),
                ("용접자재", "CZ11"),
                ("용접봉", "CZ12"),
                ("가공자재", "CZ13"),
                ("워터젯자재", "CZ14"),
                ("윤활제/오일류", "CZ15"),
                ("윤활/오일 부품", "CZ16"),
                ("기타소모품", "CZ17"),
                ("개발용 소재", "CZ18"),
                ("기타구매품", "PZ01"),
            ]),
            number_prefixes: vec![
                NumberPrefix {
                    code: "MB".into(),
                    prefix: "IB".into(),
                },
                NumberPrefix {
                    code: "HP".into(),
                    prefix: "IH".into(),
                },
                NumberPrefix {
                    code: "TK".into(),
                    prefix: "IT".into(),
                },
            ],
            number_starters: vec![
                NumberStarter {
                    code: "MB".into(),
                    start: 3606,
                },
                NumberStarter {
                    code: "HP".into(),
                    start: 834,
                },
                NumberStarter {
                    code: "TK".into(),
                    start: 3385,
                },
            ],
            fastener_triggers: words(&["HEX BOLT", "HEX.BOLT", "HEX SOCKET HEAD BOLT"]),
            fastener_mappings: vec![
                ("HEX BOLT", "HEX BOLT"),
                ("HEX.BOLT", "HEX BOLT"),
                ("HEX SOCKET HEAD BOLT", "HEX SOCKET HEAD BOLT"),
                ("SW", "SW (SPRING WASHER)"),
                ("SPRING WASHER", "SW (SPRING WASHER)"),
                ("PW", "PW (PLAIN WASHER)"),
                ("PLAIN WASHER", "PW (PLAIN WASHER)"),
                ("NUT", "NUT"),
            ]
            .into_iter()
            .map(|(token, normalized)| FastenerMapping {
                token: token.to_string(),
                normalized: normalized.to_string(),
            })
            .collect(),
            fastener_generic_tokens: words(&["BOLT", "NUT", "WASHER", "SCREW"]),
            default_semi_finished_code: "MB".to_string(),
            fastener_code: "RR01".to_string(),
            fallback_purchased_code: "PZ01".to_string(),
            default_unit: "EA".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_lookup_is_exact() {
        let rules = RuleSet::default();
        assert_eq!(rules.semi_finished_parent_for_hint("TANK"), Some("TK"));
        assert_eq!(rules.semi_finished_parent_for_hint("MIXER LINE"), None);
        assert_eq!(rules.semi_finished_parent_for_hint(""), None);
    }

    #[test]
    fn test_number_tables() {
        let rules = RuleSet::default();
        assert_eq!(rules.number_prefix("HP"), "IH");
        assert_eq!(rules.number_prefix("QX"), "QX");
        assert_eq!(rules.number_start("TK"), 3385);
        assert_eq!(rules.number_start("QX"), 1);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let rules: RuleSet = serde_json::from_str(r#"{"defaultUnit":"PCS"}"#).unwrap();
        assert_eq!(rules.default_unit, "PCS");
        assert_eq!(rules.fastener_code, "RR01");
        assert_eq!(rules.purchased_parents, RuleSet::default().purchased_parents);
    }
}
