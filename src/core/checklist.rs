use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::risk::{calculate, RiskInputs, RiskResult};
use crate::models::{Direction, Timeframe};

pub const STAGE_COUNT: u8 = 5;

/// The five confirmations of the Supply & Demand plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    MacroTrend,
    RetracementChoC,
    StructureShift,
    SupplyDemandZone,
    EntryRisk,
}

impl Gate {
    pub const ALL: [Gate; 5] = [
        Gate::MacroTrend,
        Gate::RetracementChoC,
        Gate::StructureShift,
        Gate::SupplyDemandZone,
        Gate::EntryRisk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gate::MacroTrend => "macro_trend",
            Gate::RetracementChoC => "retracement_choc",
            Gate::StructureShift => "structure_shift",
            Gate::SupplyDemandZone => "supply_demand_zone",
            Gate::EntryRisk => "entry_risk",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Gate> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "macro_trend" | "macro" | "trend" => Some(Gate::MacroTrend),
            "retracement_choc" | "retracement" | "choc" | "coc" => Some(Gate::RetracementChoC),
            "structure_shift" | "structure" | "shift" => Some(Gate::StructureShift),
            "supply_demand_zone" | "zone" | "sd" => Some(Gate::SupplyDemandZone),
            "entry_risk" | "entry" | "risk" => Some(Gate::EntryRisk),
            _ => None,
        }
    }

    /// Confirmation sentence the trader ticks off.
    pub fn statement(&self) -> &'static str {
        match self {
            Gate::MacroTrend => "I have confirmed the Macro Trend (HTF Structure).",
            Gate::RetracementChoC => "Retracement started / Internal COC confirmed.",
            Gate::StructureShift => "Structure Shift (Alignment COC) confirmed.",
            Gate::SupplyDemandZone => "Valid Supply/Demand Zone selected.",
            Gate::EntryRisk => "Entry is set. Risk is managed. I am disciplined.",
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub enum Stage {
    #[default]
    Stage1,
    Stage2,
    Stage3,
    Stage4,
    Stage5,
}

impl Stage {
    pub fn number(&self) -> u8 {
        match self {
            Stage::Stage1 => 1,
            Stage::Stage2 => 2,
            Stage::Stage3 => 3,
            Stage::Stage4 => 4,
            Stage::Stage5 => 5,
        }
    }

    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Stage1 => Some(Stage::Stage2),
            Stage::Stage2 => Some(Stage::Stage3),
            Stage::Stage3 => Some(Stage::Stage4),
            Stage::Stage4 => Some(Stage::Stage5),
            Stage::Stage5 => None,
        }
    }

    pub fn previous(&self) -> Option<Stage> {
        match self {
            Stage::Stage1 => None,
            Stage::Stage2 => Some(Stage::Stage1),
            Stage::Stage3 => Some(Stage::Stage2),
            Stage::Stage4 => Some(Stage::Stage3),
            Stage::Stage5 => Some(Stage::Stage4),
        }
    }

    /// The gate this stage asks the trader to confirm.
    pub fn gate(&self) -> Gate {
        match self {
            Stage::Stage1 => Gate::MacroTrend,
            Stage::Stage2 => Gate::RetracementChoC,
            Stage::Stage3 => Gate::StructureShift,
            Stage::Stage4 => Gate::SupplyDemandZone,
            Stage::Stage5 => Gate::EntryRisk,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Stage::Stage1 => "Confirm Macro Trend",
            Stage::Stage2 => "Wait Retracement (COC)",
            Stage::Stage3 => "Structure Shift",
            Stage::Stage4 => "Supply & Demand Zone",
            Stage::Stage5 => "Entry & Risk",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Stage::Stage1 => "Identify the Higher Time Frame trend direction.",
            Stage::Stage2 => "Wait for pullback. Confirm with Change of Character.",
            Stage::Stage3 => "Confirm Alignment COC with the Macro Trend.",
            Stage::Stage4 => "Select the fresh Zone that caused the shift.",
            Stage::Stage5 => "Calculate Lots, Set SL/TP, Manage Risk.",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {}/{}", self.number(), STAGE_COUNT)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChecklistState {
    pub macro_trend: bool,
    pub retracement_choc: bool,
    pub structure_shift: bool,
    pub supply_demand_zone: bool,
    pub entry_risk: bool,
    pub pair: String,
    pub timeframe: Timeframe,
}

impl ChecklistState {
    pub fn gate(&self, gate: Gate) -> bool {
        match gate {
            Gate::MacroTrend => self.macro_trend,
            Gate::RetracementChoC => self.retracement_choc,
            Gate::StructureShift => self.structure_shift,
            Gate::SupplyDemandZone => self.supply_demand_zone,
            Gate::EntryRisk => self.entry_risk,
        }
    }

    fn gate_mut(&mut self, gate: Gate) -> &mut bool {
        match gate {
            Gate::MacroTrend => &mut self.macro_trend,
            Gate::RetracementChoC => &mut self.retracement_choc,
            Gate::StructureShift => &mut self.structure_shift,
            Gate::SupplyDemandZone => &mut self.supply_demand_zone,
            Gate::EntryRisk => &mut self.entry_risk,
        }
    }

    pub fn all_gates(&self) -> bool {
        Gate::ALL.iter().all(|g| self.gate(*g))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChecklistAction {
    Advance,
    Retreat,
    ToggleGate(Gate),
    SetPair(String),
    SetTimeframe(Timeframe),
    /// Latest calculator inputs; sent on every edit so the stored result is
    /// always the calculator's current output.
    RiskUpdated(RiskInputs),
    Reset,
}

/// Payload handed to the journal when a setup passes all five steps.
///
/// Only [`Checklist::complete`] can build one, so holding a value proves the
/// gates and the risk check passed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletedSetup {
    state: ChecklistState,
    inputs: RiskInputs,
    risk: RiskResult,
}

impl CompletedSetup {
    pub fn state(&self) -> &ChecklistState {
        &self.state
    }

    pub fn pair(&self) -> &str {
        &self.state.pair
    }

    pub fn timeframe(&self) -> Timeframe {
        self.state.timeframe
    }

    pub fn risk_reward(&self) -> f64 {
        self.risk.risk_reward
    }

    pub fn risk(&self) -> &RiskResult {
        &self.risk
    }

    pub fn entry_price(&self) -> f64 {
        self.inputs.entry_price
    }

    pub fn stop_loss(&self) -> f64 {
        self.inputs.stop_loss
    }

    pub fn take_profit(&self) -> f64 {
        self.inputs.take_profit
    }

    pub fn direction(&self) -> Direction {
        Direction::from_prices(self.inputs.entry_price, self.inputs.take_profit)
    }
}

/// One checklist session. Every transition returns a new record; the old one
/// is left untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Checklist {
    stage: Stage,
    state: ChecklistState,
    inputs: RiskInputs,
    risk: RiskResult,
    initial_timeframe: Timeframe,
}

impl Checklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeframe(timeframe: Timeframe) -> Self {
        let mut checklist = Self::default();
        checklist.state.timeframe = timeframe;
        checklist.initial_timeframe = timeframe;
        checklist
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn state(&self) -> &ChecklistState {
        &self.state
    }

    pub fn risk(&self) -> &RiskResult {
        &self.risk
    }

    pub fn risk_inputs(&self) -> &RiskInputs {
        &self.inputs
    }

    /// Fraction of the five steps reached, for the progress bar.
    pub fn progress(&self) -> f64 {
        self.stage.number() as f64 / STAGE_COUNT as f64
    }

    /// Completion predicate of the current stage.
    pub fn can_proceed(&self) -> bool {
        let s = &self.state;
        match self.stage {
            Stage::Stage1 => s.macro_trend && !s.pair.is_empty(),
            Stage::Stage2 => s.retracement_choc,
            Stage::Stage3 => s.structure_shift,
            Stage::Stage4 => s.supply_demand_zone,
            Stage::Stage5 => s.entry_risk && self.risk.valid,
        }
    }

    pub fn can_request_review(&self) -> bool {
        self.stage >= Stage::Stage3
    }

    pub fn transition(&self, action: ChecklistAction) -> Checklist {
        let mut next = self.clone();
        match action {
            ChecklistAction::Advance => {
                if self.can_proceed() {
                    if let Some(stage) = self.stage.next() {
                        next.stage = stage;
                    }
                }
            }
            ChecklistAction::Retreat => {
                if let Some(stage) = self.stage.previous() {
                    next.stage = stage;
                }
            }
            ChecklistAction::ToggleGate(gate) => {
                let flag = next.state.gate_mut(gate);
                *flag = !*flag;
            }
            ChecklistAction::SetPair(pair) => {
                next.state.pair = pair.trim().to_uppercase();
            }
            ChecklistAction::SetTimeframe(timeframe) => {
                next.state.timeframe = timeframe;
            }
            ChecklistAction::RiskUpdated(inputs) => {
                next.risk = calculate(&inputs);
                next.inputs = inputs;
            }
            ChecklistAction::Reset => {
                next = Checklist::with_timeframe(self.initial_timeframe);
            }
        }
        next
    }

    /// Terminal action of Stage5. Returns the payload and a fresh checklist,
    /// or `None` while the final step is not satisfied.
    pub fn complete(&self) -> Option<(CompletedSetup, Checklist)> {
        if self.stage != Stage::Stage5
            || !self.can_proceed()
            || !self.state.all_gates()
            || self.state.pair.is_empty()
        {
            return None;
        }
        let setup = CompletedSetup {
            state: self.state.clone(),
            inputs: self.inputs,
            risk: self.risk,
        };
        Some((setup, Checklist::with_timeframe(self.initial_timeframe)))
    }
}
