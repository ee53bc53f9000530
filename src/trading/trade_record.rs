use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::checklist::CompletedSetup;
use crate::models::{Direction, Outcome};

/// A journal entry. Fields are private so an entry cannot be edited once
/// logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    id: u64,
    pair: String,
    date: DateTime<Utc>,
    direction: Direction,
    entry_price: f64,
    stop_loss: f64,
    take_profit: f64,
    risk_reward: f64,
    outcome: Outcome,
    #[serde(default)]
    pnl: Option<f64>,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    tags: Vec<String>,
    checklist_completed: bool,
}

/// Field-by-field builder for entries that did not come out of the checklist
/// (imports, seed data, tests).
#[derive(Debug, Clone)]
pub struct TradeDraft {
    pub pair: String,
    pub date: DateTime<Utc>,
    pub direction: Direction,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub risk_reward: f64,
    pub outcome: Outcome,
    pub pnl: Option<f64>,
    pub notes: String,
    pub tags: Vec<String>,
    pub checklist_completed: bool,
}

impl TradeDraft {
    pub fn into_trade(self, id: u64) -> Trade {
        Trade {
            id,
            pair: self.pair,
            date: self.date,
            direction: self.direction,
            entry_price: self.entry_price,
            stop_loss: self.stop_loss,
            take_profit: self.take_profit,
            risk_reward: self.risk_reward,
            outcome: self.outcome,
            pnl: self.pnl,
            notes: self.notes,
            tags: self.tags,
            checklist_completed: self.checklist_completed,
        }
    }
}

impl Trade {
    /// Journal entry for a setup that passed all five steps. Outcome starts
    /// as pending and the context timeframe becomes the only tag.
    pub fn from_setup(id: u64, setup: &CompletedSetup, notes: &str, date: DateTime<Utc>) -> Self {
        Self {
            id,
            pair: setup.pair().to_string(),
            date,
            direction: setup.direction(),
            entry_price: setup.entry_price(),
            stop_loss: setup.stop_loss(),
            take_profit: setup.take_profit(),
            risk_reward: setup.risk_reward(),
            outcome: Outcome::Pending,
            pnl: None,
            notes: notes.to_string(),
            tags: vec![setup.timeframe().to_string()],
            checklist_completed: true,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn pair(&self) -> &str {
        &self.pair
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn entry_price(&self) -> f64 {
        self.entry_price
    }

    pub fn stop_loss(&self) -> f64 {
        self.stop_loss
    }

    pub fn take_profit(&self) -> f64 {
        self.take_profit
    }

    pub fn risk_reward(&self) -> f64 {
        self.risk_reward
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn pnl(&self) -> Option<f64> {
        self.pnl
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn checklist_completed(&self) -> bool {
        self.checklist_completed
    }

    /// Simplified result in R: +R:R for a win, -1 for a loss, 0 otherwise.
    pub fn r_multiple(&self) -> f64 {
        match self.outcome {
            Outcome::Win => self.risk_reward,
            Outcome::Loss => -1.0,
            Outcome::BreakEven | Outcome::Pending => 0.0,
        }
    }

    /// One-line summary used in coaching prompts.
    pub fn summary_line(&self) -> String {
        format!(
            "{} {} {} (R:R {})",
            self.pair, self.direction, self.outcome, self.risk_reward
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{completed_setup, draft};

    #[test]
    fn from_setup_is_pending_and_tagged() {
        let setup = completed_setup("EURUSD");
        let now = Utc::now();
        let t = Trade::from_setup(7, &setup, "Clean 4H zone", now);
        assert_eq!(t.id(), 7);
        assert_eq!(t.pair(), "EURUSD");
        assert_eq!(t.outcome(), Outcome::Pending);
        assert_eq!(t.tags(), &["4H".to_string()]);
        assert!(t.checklist_completed());
        assert_eq!(t.direction(), Direction::Short);
        assert!((t.entry_price() - 1.0950).abs() < 1e-9);
        assert!((t.risk_reward() - 2.0).abs() < 1e-9);
        assert_eq!(t.date(), now);
    }

    #[test]
    fn summary_line_format() {
        let t = draft("GBPUSD", Direction::Long, Outcome::Loss, 2.5).into_trade(2);
        assert_eq!(t.summary_line(), "GBPUSD Long Loss (R:R 2.5)");
        let t = draft("EURUSD", Direction::Short, Outcome::Win, 2.0).into_trade(1);
        assert_eq!(t.summary_line(), "EURUSD Short Win (R:R 2)");
    }

    #[test]
    fn r_multiple_per_outcome() {
        assert_eq!(draft("X", Direction::Long, Outcome::Win, 3.0).into_trade(1).r_multiple(), 3.0);
        assert_eq!(draft("X", Direction::Long, Outcome::Loss, 3.0).into_trade(1).r_multiple(), -1.0);
        assert_eq!(draft("X", Direction::Long, Outcome::BreakEven, 3.0).into_trade(1).r_multiple(), 0.0);
        assert_eq!(draft("X", Direction::Long, Outcome::Pending, 3.0).into_trade(1).r_multiple(), 0.0);
    }
}
