use crate::error::RowFault;
use crate::models::trade_event::TradeEvent;

/// 심볼별 누적 통계
///
/// 원시 이벤트는 보관하지 않고 합계와 워터마크만 유지한다.
/// `open`/`first_ts` 와 `close`/`last_ts` 는 타임스탬프 순서가 아니라 도착 순서를 따른다.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolStats {
    pub symbol: String,
    pub first_ts: i64,
    pub last_ts: i64,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub sum_px: f64,
    pub count: i64,
    pub sum_px_qty: f64,
    pub sum_qty: i64,
}

/// 최종 출력용 레코드. 가격 필드는 반올림되지 않은 값이다.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolSummary {
    pub symbol: String,
    pub first_ts: i64,
    pub last_ts: i64,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub avg_px: f64,
    pub vwap: f64,
}

impl SymbolStats {
    /// 첫 이벤트로 통계 생성
    ///
    /// 체결 금액이 f64 범위를 넘으면 `PriceSumOverflow`.
    pub fn new(event: &TradeEvent) -> Result<Self, RowFault> {
        let notional = finite(event.notional())?;

        Ok(SymbolStats {
            symbol: event.symbol.clone(),
            first_ts: event.timestamp,
            last_ts: event.timestamp,
            open: event.price,
            close: event.price,
            high: event.price,
            low: event.price,
            sum_px: event.price,
            count: 1,
            sum_px_qty: notional,
            sum_qty: event.quantity,
        })
    }

    /// 이벤트 반영 (O(1))
    ///
    /// 누적 수량이 i64 범위를 넘으면 `VolumeOverflow`, 가격 합계가 f64 범위를 넘으면
    /// `PriceSumOverflow` 를 반환하며 이때 통계는 바뀌지 않는다.
    pub fn update(&mut self, event: &TradeEvent) -> Result<(), RowFault> {
        let sum_qty = self
            .sum_qty
            .checked_add(event.quantity)
            .ok_or(RowFault::VolumeOverflow)?;
        let sum_px = finite(self.sum_px + event.price)?;
        let sum_px_qty = finite(self.sum_px_qty + event.notional())?;

        self.last_ts = event.timestamp;
        self.close = event.price;
        self.high = self.high.max(event.price);
        self.low = self.low.min(event.price);
        self.sum_px = sum_px;
        self.count += 1;
        self.sum_px_qty = sum_px_qty;
        self.sum_qty = sum_qty;

        Ok(())
    }

    /// 단순 평균 가격
    pub fn avg_px(&self) -> f64 {
        self.sum_px / self.count as f64
    }

    /// 거래량 가중 평균 가격
    pub fn vwap(&self) -> f64 {
        self.sum_px_qty / self.sum_qty as f64
    }

    pub fn summary(&self) -> SymbolSummary {
        SymbolSummary {
            symbol: self.symbol.clone(),
            first_ts: self.first_ts,
            last_ts: self.last_ts,
            open: self.open,
            close: self.close,
            high: self.high,
            low: self.low,
            avg_px: self.avg_px(),
            vwap: self.vwap(),
        }
    }
}

fn finite(value: f64) -> Result<f64, RowFault> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RowFault::PriceSumOverflow)
    }
}
