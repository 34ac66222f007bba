//! 파일 로깅 설정.
//!
//! 대화형 메뉴가 터미널을 쓰므로 로그는 `~/.config/moodtune/logs/`에 날짜별 파일로 남긴다.

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{self, LoggingConfig};

const LOG_FILE_PREFIX: &str = "moodtune";
const DEFAULT_FILTER: &str = "moodtune=info,warn";

/// 로깅을 초기화한다.
///
/// 필터 우선순위: `RUST_LOG` > 설정 파일의 `logging.level` > 기본값.
/// 반환된 guard가 살아 있는 동안 로그가 기록된다.
pub fn init_logging(settings: &LoggingConfig) -> Result<WorkerGuard> {
    let log_dir = config::config_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = settings.level.as_deref().unwrap_or(DEFAULT_FILTER);
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    });

    let fmt_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(dir = %log_dir.display(), "로깅 초기화");
    Ok(guard)
}
