//! 체결 가격 스트림 집계 라이브러리
//!
//! 시간순 CSV 가격 업데이트를 한 줄씩 읽어 심볼별 시가/종가/고가/저가, 단순 평균, VWAP 을 계산합니다.
//! 메모리 사용량은 입력 행 수가 아니라 심볼 수에 비례합니다.

pub mod aggregation;
pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod reader;
pub mod utils;

use std::io::{Read, Write};

// 핵심 타입 재노출
pub use crate::aggregation::{AggregationEngine, EngineState, SymbolTable};
pub use crate::config::Config;
pub use crate::error::{AggregationError, RowFault};
pub use crate::models::{SymbolStats, SymbolSummary, TradeEvent};
pub use crate::reader::{Row, RowReader};

/// 버전 정보
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 결과 타입 별칭
pub type Result<T> = std::result::Result<T, AggregationError>;

/// 입력을 끝까지 집계한다. 출력은 하지 않는다.
pub fn aggregate<R: Read>(input: R, config: &Config) -> Result<Vec<SymbolSummary>> {
    let reader = RowReader::from_reader(input, config.input.delimiter_byte()?);
    let mut engine = AggregationEngine::new().with_progress_interval(config.logging.progress_interval);

    let summaries = engine.run(reader)?;
    log::debug!("최종 행 수: {} - 심볼 수: {}", engine.rows_processed(), summaries.len());
    Ok(summaries)
}

/// 입력을 집계하고 성공한 경우에만 결과를 기록한다
pub fn process_stream<R: Read, W: Write>(input: R, writer: W, config: &Config) -> Result<usize> {
    let summaries = aggregate(input, config)?;
    output::write_summaries(writer, &summaries)?;
    Ok(summaries.len())
}
