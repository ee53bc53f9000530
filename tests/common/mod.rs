#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};

use sd_trading_coach::advisory::{AdvisoryError, LanguageModel};
use sd_trading_coach::core::checklist::{Checklist, ChecklistAction, Gate};
use sd_trading_coach::core::risk::RiskInputs;
use sd_trading_coach::models::{Direction, Outcome};
use sd_trading_coach::trading::{Journal, TradeDraft};

pub fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-15T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// Walk a checklist through the first four gates for `pair`.
pub fn confirmed_through_zone(pair: &str) -> Checklist {
    let mut c = Checklist::new().transition(ChecklistAction::SetPair(pair.to_string()));
    for gate in &Gate::ALL[..4] {
        c = c
            .transition(ChecklistAction::ToggleGate(*gate))
            .transition(ChecklistAction::Advance);
    }
    c
}

pub fn inputs(entry: f64, stop: f64, tp: f64) -> RiskInputs {
    RiskInputs::new(10_000.0, 1.0).with_prices(entry, stop, tp)
}

/// Journal built from (pair, outcome, R:R) entries, oldest first.
pub fn journal_of(entries: &[(&str, Outcome, f64)]) -> Journal {
    let mut journal = Journal::new();
    for (i, &(pair, outcome, rr)) in entries.iter().enumerate() {
        journal.add_draft(TradeDraft {
            pair: pair.to_string(),
            date: base_time() + Duration::hours(i as i64),
            direction: Direction::Long,
            entry_price: 1.1000,
            stop_loss: 1.0980,
            take_profit: 1.1000 + 0.0020 * rr,
            risk_reward: rr,
            outcome,
            pnl: None,
            notes: String::new(),
            tags: vec!["4H".to_string()],
            checklist_completed: true,
        });
    }
    journal
}

/// Counts calls and answers with a fixed reply.
pub struct CountingModel {
    configured: bool,
    reply: String,
    pub calls: AtomicUsize,
}

impl CountingModel {
    pub fn new(configured: bool, reply: &str) -> Self {
        Self {
            configured,
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageModel for CountingModel {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn generate(&self, _prompt: &str) -> Result<String, AdvisoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}
