use crate::core::checklist::ChecklistState;
use crate::trading::Trade;

const STRATEGY_RECAP: &str = "\
My Strategy:
1. Confirm Macro Trend.
2. Wait for Retracement (COC).
3. Structure Shift (Alignment COC).
4. Supply/Demand Zone.
5. Entry & Risk.";

pub fn psychology(context: &str, recent_losses: u8) -> String {
    format!(
        "I am a disciplined Forex trader using a rigid Supply and Demand strategy.
{STRATEGY_RECAP}

My current state: \"{context}\".
Recent Losses: {recent_losses}.

Act as a strict trading coach. If I am emotional, tell me to walk away.
Remind me to trust the Probability and the Plan. Do not give generic advice. Be harsh if needed to save my capital.
Keep it under 80 words."
    )
}

pub fn setup_review(state: &ChecklistState) -> String {
    format!(
        "Review this Forex trade setup based on strict Supply and Demand rules:

The Checklist Status:
1. Macro Trend Confirmed: {}
2. Retracement (Internal COC): {}
3. Structure Shift (Alignment COC): {}
4. S&D Zone Identified: {}
5. Risk Managed: {}

Context: Pair {}, Timeframe {}.

Task:
If ANY of steps 1-4 are FALSE, output a WARNING explaining why I must not enter.
If all are TRUE, confirm the setup is valid and remind me to set the Stop Loss at the structural point.
Keep it concise (1-2 sentences).",
        state.macro_trend,
        state.retracement_choc,
        state.structure_shift,
        state.supply_demand_zone,
        state.entry_risk,
        state.pair,
        state.timeframe,
    )
}

/// One `"{pair} {direction} {outcome} (R:R {ratio})"` line per trade.
pub fn trade_summary(trades: &[Trade]) -> String {
    trades
        .iter()
        .map(Trade::summary_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn journal_insight(trades: &[Trade]) -> String {
    format!(
        "Analyze these Forex trades based on Supply/Demand strategy consistency:
{}

Identify 1 key pattern. Are they respecting R:R? Is the winrate sustainable?
Give 1 actionable tip for next week.",
        trade_summary(trades)
    )
}
