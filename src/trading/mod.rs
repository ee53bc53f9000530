pub mod journal;
pub mod journal_stats;
pub mod trade_record;

pub use journal::{demo_trades, DashboardSnapshot, Journal, JournalSummary, PerformancePoint};
pub use trade_record::{Trade, TradeDraft};
