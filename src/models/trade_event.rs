/// 한 줄의 가격 업데이트 이벤트. 집계에 반영된 직후 버려진다.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeEvent {
    pub symbol: String,
    pub venue: String,
    pub price: f64,
    pub quantity: i64,
    pub timestamp: i64,
}

impl TradeEvent {
    pub fn new(
        symbol: impl Into<String>,
        venue: impl Into<String>,
        price: f64,
        quantity: i64,
        timestamp: i64,
    ) -> Self {
        TradeEvent {
            symbol: symbol.into(),
            venue: venue.into(),
            price,
            quantity,
            timestamp,
        }
    }

    /// 체결 금액 (가격 × 수량)
    pub fn notional(&self) -> f64 {
        self.price * self.quantity as f64
    }
}
