use serde::{Deserialize, Serialize};

/// Strategy policy: setups below 1:2 are rejected.
pub const MIN_RISK_REWARD: f64 = 2.0;
/// Units of base currency in one standard lot.
pub const STANDARD_LOT_UNITS: f64 = 100_000.0;

const DEFAULT_BALANCE: f64 = 10_000.0;
const DEFAULT_RISK_PERCENT: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskInputs {
    pub balance: f64,
    pub risk_percent: f64,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
}

impl Default for RiskInputs {
    fn default() -> Self {
        Self {
            balance: DEFAULT_BALANCE,
            risk_percent: DEFAULT_RISK_PERCENT,
            entry_price: 0.0,
            stop_loss: 0.0,
            take_profit: 0.0,
        }
    }
}

impl RiskInputs {
    pub fn new(balance: f64, risk_percent: f64) -> Self {
        Self {
            balance,
            risk_percent,
            ..Self::default()
        }
    }

    pub fn with_prices(mut self, entry_price: f64, stop_loss: f64, take_profit: f64) -> Self {
        self.entry_price = entry_price;
        self.stop_loss = stop_loss;
        self.take_profit = take_profit;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskResult {
    pub risk_amount: f64,
    pub risk_reward: f64,
    /// Position size in standard lots.
    pub lots: f64,
    pub valid: bool,
}

impl RiskResult {
    /// Short status line shown under the calculator.
    pub fn advisory(&self) -> Option<&'static str> {
        if self.risk_reward >= MIN_RISK_REWARD {
            Some("Risk parameters accepted.")
        } else if self.risk_reward > 0.0 {
            Some("Strategy Requirement: Min 1:2 R:R.")
        } else {
            None
        }
    }
}

/// Derive position size and R:R from the five inputs.
///
/// Lot size assumes the account is denominated in the quote currency; no
/// cross-currency conversion is attempted.
pub fn calculate(inputs: &RiskInputs) -> RiskResult {
    let risk_amount = inputs.balance * inputs.risk_percent / 100.0;

    let priced = [inputs.entry_price, inputs.stop_loss, inputs.take_profit]
        .iter()
        .all(|p| p.is_finite() && *p != 0.0);
    if !priced {
        return RiskResult {
            risk_amount,
            ..RiskResult::default()
        };
    }

    let risk_distance = (inputs.entry_price - inputs.stop_loss).abs();
    if risk_distance == 0.0 {
        return RiskResult {
            risk_amount,
            ..RiskResult::default()
        };
    }
    let reward_distance = (inputs.take_profit - inputs.entry_price).abs();

    let risk_reward = round2(reward_distance / risk_distance);
    let lots = round2(risk_amount / risk_distance / STANDARD_LOT_UNITS);

    RiskResult {
        risk_amount,
        risk_reward,
        lots,
        valid: risk_reward >= MIN_RISK_REWARD && inputs.entry_price > 0.0,
    }
}

/// Holds the calculator's form inputs. Every edit recomputes and returns the
/// fresh result so the caller can forward it to the checklist.
#[derive(Debug, Clone, Default)]
pub struct RiskCalculator {
    inputs: RiskInputs,
}

impl RiskCalculator {
    pub fn new(inputs: RiskInputs) -> Self {
        Self { inputs }
    }

    pub fn inputs(&self) -> &RiskInputs {
        &self.inputs
    }

    pub fn result(&self) -> RiskResult {
        calculate(&self.inputs)
    }

    pub fn set_balance(&mut self, balance: f64) -> RiskResult {
        self.inputs.balance = balance;
        self.result()
    }

    pub fn set_risk_percent(&mut self, risk_percent: f64) -> RiskResult {
        self.inputs.risk_percent = risk_percent;
        self.result()
    }

    pub fn set_entry_price(&mut self, price: f64) -> RiskResult {
        self.inputs.entry_price = price;
        self.result()
    }

    pub fn set_stop_loss(&mut self, price: f64) -> RiskResult {
        self.inputs.stop_loss = price;
        self.result()
    }

    pub fn set_take_profit(&mut self, price: f64) -> RiskResult {
        self.inputs.take_profit = price;
        self.result()
    }

    /// Clear prices after a setup is logged; balance and risk % persist.
    pub fn clear_prices(&mut self) -> RiskResult {
        self.inputs = RiskInputs::new(self.inputs.balance, self.inputs.risk_percent);
        self.result()
    }
}

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
