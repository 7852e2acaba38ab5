/**
* filename : error
* author : HAMA
* date: 2025. 5. 8.
* description: 집계 파이프라인 오류 타입
**/

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregationError {
    #[error(
        "Schema error: expected header \"symbol,venue,price,quantity,timestamp\", got {raw:?} (normalized: {normalized:?})"
    )]
    SchemaError {
        raw: Vec<String>,
        normalized: Vec<String>,
    },

    #[error("Malformed row at line {line}: {fault} (row: {raw:?})")]
    MalformedRow {
        line: u64,
        fault: RowFault,
        raw: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl AggregationError {
    /// 프로세스 종료 코드
    pub fn exit_code(&self) -> u8 {
        match self {
            AggregationError::SchemaError { .. } => 3,
            AggregationError::MalformedRow { .. } => 4,
            AggregationError::IoError(_) => 5,
            AggregationError::ConfigError(_) | AggregationError::SerializationError(_) => 6,
            AggregationError::InvalidState(_) => 1,
        }
    }

    /// 오류가 발생한 입력 라인 (행 단위 오류만 해당)
    pub fn line(&self) -> Option<u64> {
        match self {
            AggregationError::MalformedRow { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// 데이터 행이 거부된 구체적인 사유
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowFault {
    ColumnCount { expected: usize, actual: usize },
    InvalidPrice(String),
    NonFinitePrice(String),
    InvalidQuantity(String),
    NonPositiveQuantity(i64),
    InvalidTimestamp(String),
    EmptySymbol,
    InvalidEncoding,
    VolumeOverflow,
    PriceSumOverflow,
}

impl fmt::Display for RowFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowFault::ColumnCount { expected, actual } => {
                write!(f, "expected {} columns, found {}", expected, actual)
            }
            RowFault::InvalidPrice(v) => write!(f, "invalid price {:?}", v),
            RowFault::NonFinitePrice(v) => write!(f, "price must be finite, got {:?}", v),
            RowFault::InvalidQuantity(v) => write!(f, "invalid quantity {:?}", v),
            RowFault::NonPositiveQuantity(q) => write!(f, "quantity must be positive, got {}", q),
            RowFault::InvalidTimestamp(v) => write!(f, "invalid timestamp {:?}", v),
            RowFault::EmptySymbol => write!(f, "symbol is empty"),
            RowFault::InvalidEncoding => write!(f, "row is not valid UTF-8"),
            RowFault::VolumeOverflow => write!(f, "cumulative quantity overflows a 64-bit integer"),
            RowFault::PriceSumOverflow => write!(f, "cumulative price sums overflow a 64-bit float"),
        }
    }
}
