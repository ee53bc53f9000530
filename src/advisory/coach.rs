use std::fmt;
use std::sync::Arc;
use tracing::warn;

use crate::advisory::{prompts, LanguageModel};
use crate::core::checklist::ChecklistState;
use crate::trading::Trade;

/// Canned replies used whenever the model is missing, failing or silent.
struct Fallbacks {
    unavailable: &'static str,
    failed: &'static str,
    empty: &'static str,
}

const ADVICE: Fallbacks = Fallbacks {
    unavailable: "AI Service Unavailable: Please check API Key.",
    failed: "Error connecting to AI Coach. Remember: Discipline is key.",
    empty: "Stay disciplined. Stick to your plan.",
};

const SETUP_REVIEW: Fallbacks = Fallbacks {
    unavailable: "AI Service Unavailable.",
    failed: "Could not validate setup via AI.",
    empty: "Setup analysis complete.",
};

const JOURNAL_INSIGHT: Fallbacks = Fallbacks {
    unavailable: "AI Service Unavailable.",
    failed: "Analysis failed.",
    empty: "Keep logging trades to get insights.",
};

pub const NO_TRADES_TO_ANALYZE: &str = "No trades to analyze yet.";

/// Consecutive losses reported on the psychology check, capped at "3+".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum LossStreak {
    #[default]
    None,
    One,
    Two,
    ThreeOrMore,
}

impl LossStreak {
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => LossStreak::None,
            1 => LossStreak::One,
            2 => LossStreak::Two,
            _ => LossStreak::ThreeOrMore,
        }
    }

    pub fn count(&self) -> u8 {
        match self {
            LossStreak::None => 0,
            LossStreak::One => 1,
            LossStreak::Two => 2,
            LossStreak::ThreeOrMore => 3,
        }
    }
}

impl fmt::Display for LossStreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LossStreak::ThreeOrMore => write!(f, "3+"),
            other => write!(f, "{}", other.count()),
        }
    }
}

/// Coaching front for the language model. Every call yields display text;
/// failures turn into a fixed fallback and are only logged.
#[derive(Clone)]
pub struct Coach {
    model: Arc<dyn LanguageModel>,
}

impl Coach {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub fn is_available(&self) -> bool {
        self.model.is_configured()
    }

    /// Psychology check for the trader's current state of mind.
    pub async fn request_advice(&self, context: &str, losses: LossStreak) -> String {
        if !self.model.is_configured() {
            return ADVICE.unavailable.to_string();
        }
        self.ask(&prompts::psychology(context, losses.count()), &ADVICE, "advice")
            .await
    }

    pub async fn request_setup_review(&self, state: &ChecklistState) -> String {
        if !self.model.is_configured() {
            return SETUP_REVIEW.unavailable.to_string();
        }
        self.ask(&prompts::setup_review(state), &SETUP_REVIEW, "setup review")
            .await
    }

    pub async fn request_journal_insight(&self, trades: &[Trade]) -> String {
        if !self.model.is_configured() {
            return JOURNAL_INSIGHT.unavailable.to_string();
        }
        if trades.is_empty() {
            return NO_TRADES_TO_ANALYZE.to_string();
        }
        self.ask(&prompts::journal_insight(trades), &JOURNAL_INSIGHT, "journal insight")
            .await
    }

    async fn ask(&self, prompt: &str, fallbacks: &Fallbacks, what: &str) -> String {
        match self.model.generate(prompt).await {
            Ok(text) if text.trim().is_empty() => fallbacks.empty.to_string(),
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!("Coach {} failed: {}", what, e);
                fallbacks.failed.to_string()
            }
        }
    }
}
