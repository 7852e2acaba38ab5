use std::str::FromStr;

use crate::aggregation::header::EXPECTED_HEADER;
use crate::error::{AggregationError, RowFault};
use crate::models::TradeEvent;
use crate::reader::Row;

const COL_SYMBOL: usize = 0;
const COL_VENUE: usize = 1;
const COL_PRICE: usize = 2;
const COL_QUANTITY: usize = 3;
const COL_TIMESTAMP: usize = 4;

/// 데이터 행을 `TradeEvent` 로 변환
///
/// symbol 과 venue 는 그대로 사용하고, 숫자 필드만 앞뒤 공백을 제거한 뒤 파싱한다.
pub fn parse_row(row: &Row) -> Result<TradeEvent, AggregationError> {
    let malformed = |fault: RowFault| AggregationError::MalformedRow {
        line: row.line(),
        fault,
        raw: row.raw(),
    };

    let expected = EXPECTED_HEADER.len();
    if row.len() != expected {
        return Err(malformed(RowFault::ColumnCount { expected, actual: row.len() }));
    }

    let field = |index: usize| row.get(index).unwrap_or_default();

    let symbol = field(COL_SYMBOL);
    if symbol.is_empty() {
        return Err(malformed(RowFault::EmptySymbol));
    }

    let price_raw = field(COL_PRICE);
    let price: f64 = parse_number(price_raw)
        .ok_or_else(|| malformed(RowFault::InvalidPrice(price_raw.to_string())))?;
    if !price.is_finite() {
        return Err(malformed(RowFault::NonFinitePrice(price_raw.to_string())));
    }

    let quantity_raw = field(COL_QUANTITY);
    let quantity: i64 = parse_number(quantity_raw)
        .ok_or_else(|| malformed(RowFault::InvalidQuantity(quantity_raw.to_string())))?;
    if quantity <= 0 {
        return Err(malformed(RowFault::NonPositiveQuantity(quantity)));
    }

    let timestamp_raw = field(COL_TIMESTAMP);
    let timestamp: i64 = parse_number(timestamp_raw)
        .ok_or_else(|| malformed(RowFault::InvalidTimestamp(timestamp_raw.to_string())))?;

    Ok(TradeEvent::new(symbol, field(COL_VENUE), price, quantity, timestamp))
}

fn parse_number<T: FromStr>(raw: &str) -> Option<T> {
    raw.trim().parse().ok()
}
