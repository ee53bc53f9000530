use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::advisory::{AdvisoryError, LanguageModel};
use crate::core::checklist::{Checklist, ChecklistAction, CompletedSetup, Gate};
use crate::core::risk::RiskInputs;
use crate::models::{Direction, Outcome};
use crate::trading::{Journal, TradeDraft};

/// EURUSD short from the calculator example: 1:2, 0.50 lots on 10k at 1%.
pub fn valid_inputs() -> RiskInputs {
    RiskInputs::new(10_000.0, 1.0).with_prices(1.0950, 1.0970, 1.0910)
}

/// Checklist sitting at Stage5 with gates 1-4 ticked, entry gate open and no
/// risk result yet.
pub fn checklist_at_stage5(pair: &str) -> Checklist {
    let mut c = Checklist::new().transition(ChecklistAction::SetPair(pair.to_string()));
    for gate in [
        Gate::MacroTrend,
        Gate::RetracementChoC,
        Gate::StructureShift,
        Gate::SupplyDemandZone,
    ] {
        c = c
            .transition(ChecklistAction::ToggleGate(gate))
            .transition(ChecklistAction::Advance);
    }
    c
}

pub fn completed_setup(pair: &str) -> CompletedSetup {
    let (setup, _) = checklist_at_stage5(pair)
        .transition(ChecklistAction::RiskUpdated(valid_inputs()))
        .transition(ChecklistAction::ToggleGate(Gate::EntryRisk))
        .complete()
        .expect("stage5 checklist with valid risk should complete");
    setup
}

fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-15T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

pub fn draft(pair: &str, direction: Direction, outcome: Outcome, risk_reward: f64) -> TradeDraft {
    TradeDraft {
        pair: pair.to_string(),
        date: base_time(),
        direction,
        entry_price: 1.1000,
        stop_loss: 1.0980,
        take_profit: 1.1000 + 0.0020 * risk_reward,
        risk_reward,
        outcome,
        pnl: None,
        notes: String::new(),
        tags: Vec::new(),
        checklist_completed: true,
    }
}

/// Journal with entries logged in the given (chronological) order.
pub fn journal_with(entries: &[(Outcome, f64)]) -> Journal {
    let mut journal = Journal::new();
    for (i, &(outcome, rr)) in entries.iter().enumerate() {
        let mut d = draft("EURUSD", Direction::Long, outcome, rr);
        d.date = base_time() + Duration::hours(i as i64);
        journal.add_draft(d);
    }
    journal
}

/// In-process language model that records what it was asked.
pub struct StubModel {
    configured: bool,
    reply: Option<String>,
    pub calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl StubModel {
    pub fn unconfigured() -> Self {
        Self::build(false, None)
    }

    pub fn failing() -> Self {
        Self::build(true, None)
    }

    pub fn replying(text: &str) -> Self {
        Self::build(true, Some(text.to_string()))
    }

    fn build(configured: bool, reply: Option<String>) -> Self {
        Self {
            configured,
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LanguageModel for StubModel {
    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn generate(&self, prompt: &str) -> Result<String, AdvisoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            Some(text) => Ok(text.clone()),
            None => Err(AdvisoryError::Api {
                status: 503,
                body: "overloaded".to_string(),
            }),
        }
    }
}
