//! 공용 유틸리티
//!
//! 로깅과 출력용 수치 포맷팅

pub mod logging;
pub mod math;

pub use math::{format_price, PRICE_DECIMALS};
