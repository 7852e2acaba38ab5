use std::collections::HashMap;

use crate::error::RowFault;
use crate::models::{SymbolStats, SymbolSummary, TradeEvent};

/// 심볼 → 누적 통계 테이블
///
/// 키 개수는 입력에 등장한 서로 다른 심볼 수로만 제한된다.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, SymbolStats>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            symbols: HashMap::new(),
        }
    }

    /// 이벤트 하나를 테이블에 반영. 통계를 바꾸는 유일한 경로.
    pub fn fold(&mut self, event: &TradeEvent) -> Result<(), RowFault> {
        // 기존 심볼은 키 문자열을 새로 할당하지 않는다
        if let Some(stats) = self.symbols.get_mut(&event.symbol) {
            return stats.update(event);
        }

        log::trace!("새 심볼: {}", event.symbol);
        let stats = SymbolStats::new(event)?;
        self.symbols.insert(event.symbol.clone(), stats);
        Ok(())
    }

    pub fn get(&self, symbol: &str) -> Option<&SymbolStats> {
        self.symbols.get(symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// 최종 레코드를 심볼의 바이트 순서(오름차순)로 정렬해 반환
    pub fn into_summaries(self) -> Vec<SymbolSummary> {
        let mut summaries: Vec<SymbolSummary> = self.symbols.values().map(SymbolStats::summary).collect();
        summaries.sort_unstable_by(|a, b| a.symbol.cmp(&b.symbol));
        summaries
    }
}
