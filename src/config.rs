use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::models::AppError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub export: ExportConfig,
    pub rules: RulesConfig,
    /// 上位品目グループの既定値（CLIの --hint が優先）
    pub parent_group_hint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "text" または "json"
    pub format: String,
    /// 空なら標準エラー出力
    pub file_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_dir: String,
    /// "xml" / "csv" / "json"
    pub format: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// ルール辞書（JSON）のパス。空なら既定ルール
    pub path: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            file_path: String::new(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
            format: "xml".to_string(),
        }
    }
}

impl AppConfig {
    /// 既定値 → config/default → config/local → 環境変数（BOMERP_ 接頭辞）の順に読み込む
    pub fn load() -> Result<Self, AppError> {
        // .env があれば読み込む
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // 例: BOMERP_EXPORT__FORMAT=csv
            .add_source(
                Environment::with_prefix("BOMERP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
