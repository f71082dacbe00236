use tracing::{debug, warn};

use crate::models::{AppError, RawRow};

/// OCR応答テキストを JSON 配列として読める形に整える
///
/// コードフェンス（```json ... ```）を外し、先頭の `[` と対応する `]` 以降を切り捨てる。
pub fn sanitize_ocr_text(raw: &str) -> String {
    let mut text = strip_code_fence(raw.trim()).to_string();

    if text.starts_with('[') {
        if let Some(end) = balanced_array_end(&text) {
            if end + 1 < text.len() {
                let dropped = text.len() - end - 1;
                debug!(dropped, "JSON配列の後ろの余分なテキストを削除しました");
                text.truncate(end + 1);
            }
        }
    }

    text
}

/// OCR応答テキストから行データを取り出す
pub fn parse_ocr_text(raw: &str) -> Result<Vec<RawRow>, AppError> {
    let text = sanitize_ocr_text(raw);

    let rows: Vec<RawRow> = serde_json::from_str(&text).map_err(|err| {
        warn!(length = text.len(), "OCR応答をJSONとして解析できませんでした");
        AppError::new(format!(
            "OCR応答が有効なJSON配列ではありません（{}文字）: {}",
            text.len(),
            err
        ))
    })?;

    debug!(rows = rows.len(), "OCR応答を解析しました");
    Ok(rows)
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return text;
    };

    // 言語名（```json）は同じ行にある
    let body = body.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    let inner = body.trim();
    if inner.is_empty() {
        text
    } else {
        inner
    }
}

fn balanced_array_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, c) in text.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_fence() {
        let raw = "```json\n[{\"DESCRIPTION\":\"SHAFT\"}]\n```";
        assert_eq!(sanitize_ocr_text(raw), "[{\"DESCRIPTION\":\"SHAFT\"}]");
    }

    #[test]
    fn test_sanitize_truncates_trailing_text() {
        let raw = "[{\"DESCRIPTION\":\"A\",\"REMARKS\":\"[1]\"}] trailing note";
        assert_eq!(
            sanitize_ocr_text(raw),
            "[{\"DESCRIPTION\":\"A\",\"REMARKS\":\"[1]\"}]"
        );
    }

    #[test]
    fn test_parse_ocr_text() {
        let raw = r#"```
[
  {"DESCRIPTION": "HEX BOLT, SW, NUT", "MATERIAL": null, "SPECIFICATION": "M10x30", "REMARKS": null, "QTY": "4"},
  {"DESCRIPTION": "MIXING BLADE", "MATERIAL": "SUS304", "SPECIFICATION": "T10", "REMARKS": "", "QTY": 2}
]
```"#;
        let rows = parse_ocr_text(raw).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].specification.as_deref(), Some("M10x30"));
        assert_eq!(rows[1].qty.as_deref(), Some("2"));
    }

    #[test]
    fn test_parse_ocr_text_rejects_non_json() {
        let err = parse_ocr_text("表を読み取れませんでした").unwrap_err();
        assert!(err.to_string().contains("JSON"));
    }
}
