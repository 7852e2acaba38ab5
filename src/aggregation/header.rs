use crate::error::AggregationError;
use crate::reader::Row;

/// 정규화 후 기대하는 헤더 (순서 포함)
pub const EXPECTED_HEADER: [&str; 5] = ["symbol", "venue", "price", "quantity", "timestamp"];

const BOM: char = '\u{feff}';

/// 헤더 필드 정규화: 첫 필드의 BOM 제거, 앞뒤 공백 제거, 소문자 변환
pub fn normalize_header<'a>(fields: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    fields
        .into_iter()
        .enumerate()
        .map(|(i, field)| {
            let field = if i == 0 { field.trim_start_matches(BOM) } else { field };
            field.trim().to_lowercase()
        })
        .collect()
}

/// 헤더 검증. 위치 기준으로 정확히 일치해야 한다.
pub fn validate_header(header: &Row) -> Result<(), AggregationError> {
    let normalized = normalize_header(header.fields());

    if normalized.iter().map(String::as_str).eq(EXPECTED_HEADER.iter().copied()) {
        Ok(())
    } else {
        Err(AggregationError::SchemaError {
            raw: header.fields().map(str::to_string).collect(),
            normalized,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::StringRecord;
    use rstest::rstest;

    fn row(line: &str) -> Row {
        Row::new(1, StringRecord::from(line.split(',').collect::<Vec<_>>()))
    }

    #[rstest]
    #[case("symbol,venue,price,quantity,timestamp")]
    #[case(" Symbol , VENUE ,Price, quantity ,Timestamp")]
    #[case("\u{feff}symbol,venue,price,quantity,timestamp")]
    #[case("\u{feff} SYMBOL,venue,price,quantity,timestamp")]
    fn test_accepts_normalized_header(#[case] line: &str) {
        assert!(validate_header(&row(line)).is_ok());
    }

    #[rstest]
    #[case("symbol,venue,price,timestamp")]
    #[case("symbol,venue,price,quantity,timestamp,extra")]
    #[case("venue,symbol,price,quantity,timestamp")]
    #[case("sym,venue,price,quantity,timestamp")]
    #[case("symbol,\u{feff}venue,price,quantity,timestamp")]
    fn test_rejects_mismatched_header(#[case] line: &str) {
        assert!(matches!(
            validate_header(&row(line)),
            Err(AggregationError::SchemaError { .. })
        ));
    }

    #[test]
    fn test_schema_error_carries_raw_and_normalized() {
        match validate_header(&row(" Symbol ,venue,price,timestamp")) {
            Err(AggregationError::SchemaError { raw, normalized }) => {
                assert_eq!(raw[0], " Symbol ");
                assert_eq!(normalized, vec!["symbol", "venue", "price", "timestamp"]);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
