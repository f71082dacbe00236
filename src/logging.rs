use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;
use crate::models::AppError;

/// ログ出力を初期化する。`RUST_LOG` があれば設定値より優先する
pub fn init_logging(config: &LoggingConfig) -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match (config.format.as_str(), config.file_path.is_empty()) {
        ("json", true) => registry
            .with(
                fmt::layer()
                    .json()
                    .with_span_events(FmtSpan::CLOSE)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        ("json", false) => {
            let file = open_log_file(&config.file_path)?;
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_span_events(FmtSpan::CLOSE)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        (_, true) => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init(),
        (_, false) => {
            let file = open_log_file(&config.file_path)?;
            registry
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
    };

    result.map_err(|err| AppError::new(format!("ログの初期化に失敗しました: {err}")))?;
    tracing::debug!("Logging initialized with level: {}", config.level);
    Ok(())
}

fn open_log_file(path: &str) -> Result<std::fs::File, AppError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|err| AppError::new(format!("ログファイルを開けませんでした: {path} ({err})")))
}
