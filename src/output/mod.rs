//! 출력 렌더러
//!
//! 최종 레코드를 CSV 로 기록한다. 반올림은 이 단계에서만 일어난다.

use std::io::Write;

use crate::error::AggregationError;
use crate::models::SymbolSummary;
use crate::utils::{format_price, PRICE_DECIMALS};

pub const OUTPUT_HEADER: [&str; 9] = [
    "symbol", "first_ts", "last_ts", "open", "close", "high", "low", "avg_px", "vwap",
];

/// 출력 한 행의 필드 문자열
pub fn render_fields(summary: &SymbolSummary) -> [String; 9] {
    [
        summary.symbol.clone(),
        summary.first_ts.to_string(),
        summary.last_ts.to_string(),
        format_price(summary.open, PRICE_DECIMALS),
        format_price(summary.close, PRICE_DECIMALS),
        format_price(summary.high, PRICE_DECIMALS),
        format_price(summary.low, PRICE_DECIMALS),
        format_price(summary.avg_px, PRICE_DECIMALS),
        format_price(summary.vwap, PRICE_DECIMALS),
    ]
}

/// 헤더와 심볼별 행을 기록
pub fn write_summaries<W: Write>(output: W, summaries: &[SymbolSummary]) -> Result<(), AggregationError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(output);

    writer.write_record(OUTPUT_HEADER).map_err(map_write_error)?;
    for summary in summaries {
        writer.write_record(render_fields(summary)).map_err(map_write_error)?;
    }
    writer.flush()?;
    Ok(())
}

fn map_write_error(err: csv::Error) -> AggregationError {
    match err.into_kind() {
        csv::ErrorKind::Io(e) => AggregationError::IoError(e),
        other => AggregationError::IoError(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("{:?}", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(symbol: &str, avg_px: f64) -> SymbolSummary {
        SymbolSummary {
            symbol: symbol.to_string(),
            first_ts: 1000,
            last_ts: 2000,
            open: 10.0,
            close: 20.0,
            high: 20.0,
            low: 10.0,
            avg_px,
            vwap: 17.5,
        }
    }

    fn render(summaries: &[SymbolSummary]) -> String {
        let mut buf = Vec::new();
        write_summaries(&mut buf, summaries).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_only_when_empty() {
        assert_eq!(render(&[]), "symbol,first_ts,last_ts,open,close,high,low,avg_px,vwap\n");
    }

    #[test]
    fn test_row_formatting() {
        let out = render(&[summary("AAPL", 15.0)]);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[1], "AAPL,1000,2000,10.000,20.000,20.000,10.000,15.000,17.500");
    }

    #[test]
    fn test_rounding_applied_at_render() {
        let out = render(&[summary("X", 1.0005)]);
        assert!(out.lines().nth(1).unwrap().ends_with(",1.001,17.500"));
    }

    #[test]
    fn test_symbol_with_delimiter_is_quoted() {
        let out = render(&[summary("BRK,B", 1.0)]);
        assert!(out.lines().nth(1).unwrap().starts_with("\"BRK,B\",1000"));
    }
}
