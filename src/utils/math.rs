//! 수학 관련 유틸리티
//!
//! 출력용 가격 반올림

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// 출력 가격 소수 자릿수
pub const PRICE_DECIMALS: u32 = 3;

/// 가격 반올림 (0.5 는 0 에서 멀어지는 방향)
///
/// f64 의 최단 십진 표현을 기준으로 반올림하므로 `1.0005` 는 `1.001` 이 된다.
/// `Decimal` 범위를 벗어나는 값은 `None`.
pub fn round_half_up(value: f64, decimals: u32) -> Option<Decimal> {
  if !value.is_finite() {
    return None;
  }

  let exact = Decimal::from_str(&value.to_string()).ok()?;
  let rounded = exact.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);

  // -0.000 방지
  if rounded.is_zero() {
    Some(Decimal::ZERO)
  } else {
    Some(rounded)
  }
}

/// 고정 소수점 문자열로 변환
pub fn format_price(value: f64, decimals: u32) -> String {
  match round_half_up(value, decimals) {
    Some(rounded) => format!("{:.*}", decimals as usize, rounded),
    None => format!("{:.*}", decimals as usize, value),
  }
}
