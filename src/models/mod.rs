pub mod symbol_stats;
pub mod trade_event;

pub use symbol_stats::{SymbolStats, SymbolSummary};
pub use trade_event::TradeEvent;
