use std::fs;
use std::path::Path;

use crate::models::AppError;

/// ファイルを書き込む（保存先ディレクトリがなければ作成する）
pub fn write_output_file(path: &Path, content: &[u8]) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                AppError::new(format!(
                    "保存先ディレクトリの作成に失敗しました: {} ({err})",
                    parent.display()
                ))
            })?;
        }
    }

    fs::write(path, content).map_err(|err| {
        AppError::new(format!(
            "ファイルの書き込みに失敗しました: {} ({err})",
            path.display()
        ))
    })?;

    Ok(())
}

pub fn read_text_file(path: &Path) -> Result<String, AppError> {
    if !path.exists() {
        return Err(AppError::new(format!(
            "ファイルが見つかりません: {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path).map_err(|err| {
        AppError::new(format!(
            "ファイルの読み込みに失敗しました: {} ({err})",
            path.display()
        ))
    })?;

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/file.txt");

        write_output_file(&path, "내용".as_bytes()).unwrap();

        assert_eq!(read_text_file(&path).unwrap(), "내용");
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_text_file(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }
}
