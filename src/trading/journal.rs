use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::core::checklist::CompletedSetup;
use crate::core::risk::round2;
use crate::models::{Direction, Outcome};
use crate::trading::trade_record::{Trade, TradeDraft};

/// One bar of the trailing performance chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformancePoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JournalSummary {
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    pub break_even: usize,
    pub pending: usize,
    /// Fraction of decided trades that won (0.0..=1.0).
    pub win_rate: f64,
    pub avg_risk_reward: f64,
}

impl JournalSummary {
    pub fn win_rate_pct(&self) -> f64 {
        (self.win_rate * 1000.0).round() / 10.0
    }
}

/// Everything the dashboard renders: counts, win rate and the trailing
/// performance bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub summary: JournalSummary,
    pub performance: Vec<PerformancePoint>,
}

/// In-memory trade journal, most recent entry first.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    trades: Vec<Trade>,
    trade_counter: u64,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn next_id(&mut self) -> u64 {
        self.trade_counter += 1;
        self.trade_counter
    }

    pub(crate) fn append(&mut self, trade: Trade) {
        self.trade_counter = self.trade_counter.max(trade.id());
        self.trades.insert(0, trade);
    }

    /// Log a completed checklist setup and return the new entry.
    pub fn record(&mut self, setup: &CompletedSetup, notes: &str, now: DateTime<Utc>) -> &Trade {
        let id = self.next_id();
        self.append(Trade::from_setup(id, setup, notes, now));
        &self.trades[0]
    }

    /// Seed/import path for entries that did not come through the checklist
    /// (demo rows, fixtures). Ids still come from the journal's counter.
    pub fn add_draft(&mut self, draft: TradeDraft) -> &Trade {
        let id = self.next_id();
        self.append(draft.into_trade(id));
        &self.trades[0]
    }

    pub fn wins(&self) -> usize {
        self.count(Outcome::Win)
    }

    pub fn losses(&self) -> usize {
        self.count(Outcome::Loss)
    }

    fn count(&self, outcome: Outcome) -> usize {
        self.trades.iter().filter(|t| t.outcome() == outcome).count()
    }

    /// wins / (wins + losses). Break-even and pending entries are left out of
    /// the denominator.
    pub fn win_rate(&self) -> f64 {
        let wins = self.wins();
        let decided = wins + self.losses();
        if decided == 0 {
            0.0
        } else {
            wins as f64 / decided as f64
        }
    }

    /// The `n` most recent entries, oldest first, as R multiples.
    pub fn recent_performance_series(&self, n: usize) -> Vec<PerformancePoint> {
        let window = n.min(self.trades.len());
        self.trades[..window]
            .iter()
            .rev()
            .enumerate()
            .map(|(i, t)| PerformancePoint {
                label: format!("T{}", i + 1),
                value: t.r_multiple(),
            })
            .collect()
    }

    pub fn dashboard(&self, window: usize) -> DashboardSnapshot {
        DashboardSnapshot {
            summary: self.summary(),
            performance: self.recent_performance_series(window),
        }
    }

    pub fn summary(&self) -> JournalSummary {
        let total = self.trades.len();
        let avg_risk_reward = if total > 0 {
            round2(self.trades.iter().map(|t| t.risk_reward()).sum::<f64>() / total as f64)
        } else {
            0.0
        };
        JournalSummary {
            total,
            wins: self.wins(),
            losses: self.losses(),
            break_even: self.count(Outcome::BreakEven),
            pending: self.count(Outcome::Pending),
            win_rate: self.win_rate(),
            avg_risk_reward,
        }
    }
}

/// Seed entries shown on first launch with `--demo`.
pub fn demo_trades(now: DateTime<Utc>) -> Vec<TradeDraft> {
    vec![
        TradeDraft {
            pair: "GBPUSD".to_string(),
            date: now - Duration::days(1),
            direction: Direction::Long,
            entry_price: 1.2650,
            stop_loss: 1.2630,
            take_profit: 1.2700,
            risk_reward: 2.5,
            outcome: Outcome::Loss,
            pnl: None,
            notes: "News spike hit SL.".to_string(),
            tags: Vec::new(),
            checklist_completed: true,
        },
        TradeDraft {
            pair: "EURUSD".to_string(),
            date: now,
            direction: Direction::Short,
            entry_price: 1.0950,
            stop_loss: 1.0970,
            take_profit: 1.0910,
            risk_reward: 2.0,
            outcome: Outcome::Win,
            pnl: None,
            notes: "Clear 4H Supply with ChoC.".to_string(),
            tags: Vec::new(),
            checklist_completed: true,
        },
    ]
}
