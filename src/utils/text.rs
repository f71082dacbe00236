/// ファイル名に使えない文字（\ / : * ? " < > |）を `_` に置き換える
pub fn sanitize_file_component(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect()
}

/// 列幅計算用の文字数
pub fn text_width(value: &str) -> usize {
    value.chars().count()
}

/// 全角英数字を半角に変換（列名の照合用）
pub fn fullwidth_to_halfwidth(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '\u{3000}' => ' ',
            '\u{FF01}'..='\u{FF5E}' => char::from_u32((c as u32) - 0xFEE0).unwrap_or(c),
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_component() {
        assert_eq!(sanitize_file_component("MIXER/BATCH:1"), "MIXER_BATCH_1");
        assert_eq!(sanitize_file_component("탱크 A"), "탱크 A");
    }

    #[test]
    fn test_fullwidth_to_halfwidth() {
        assert_eq!(fullwidth_to_halfwidth("ＱＴＹ"), "QTY");
        assert_eq!(fullwidth_to_halfwidth("수량\u{3000}"), "수량 ");
    }
}
