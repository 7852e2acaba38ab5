//! 로깅 유틸리티
//!
//! 로그 초기화 및 집계 진행 로그 함수 제공

use std::env;
use std::time::Duration;

use env_logger::Builder;
use log::LevelFilter;

use crate::error::AggregationError;

/// 레벨 문자열 파싱 (알 수 없는 값은 info)
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    }
}

/// 로깅 시스템 초기화
///
/// RUST_LOG 가 설정되어 있으면 설정 파일의 레벨보다 우선한다. 로그는 stderr 로만 출력된다.
pub fn init(default_level: &str) -> Result<(), AggregationError> {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());

    Builder::new()
        .filter_level(parse_level(&log_level))
        .format_timestamp_millis()
        .target(env_logger::Target::Stderr)
        .try_init()
        .map_err(|e| AggregationError::ConfigError(format!("Failed to initialise logger: {}", e)))?;

    log::debug!("로깅 시스템 초기화 완료: 레벨 = {}", log_level);

    Ok(())
}

/// 집계 시작 로그
pub fn log_run_start(source: &str) {
    log::info!("집계 시작: 입력 = {}", source);
}

/// 집계 진행 로그
pub fn log_progress(rows: u64, symbols: usize) {
    log::debug!("진행 중: {}행 처리 - 심볼 {}개", rows, symbols);
}

/// 집계 완료 로그
pub fn log_run_complete(rows: u64, symbols: usize, elapsed: Duration) {
    log::info!(
        "집계 완료: {}행 - 심볼 {}개 - 소요 {:.3}초",
        rows,
        symbols,
        elapsed.as_secs_f64()
    );
}

/// 오류 로그
pub fn log_error(context: &str, error: &AggregationError) {
    log::error!("오류 발생 - {}: {}", context, error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level(" warn "), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("verbose"), LevelFilter::Info);
    }
}
