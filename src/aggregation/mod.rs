//! 집계 엔진
//!
//! 헤더 검증, 행 파싱, 심볼별 누적 통계 갱신과 최종 정렬을 담당한다.

pub mod engine;
pub mod header;
pub mod parser;
pub mod table;

pub use engine::{AggregationEngine, EngineState};
pub use header::{normalize_header, validate_header, EXPECTED_HEADER};
pub use parser::parse_row;
pub use table::SymbolTable;
