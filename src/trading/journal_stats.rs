use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::risk::round2;
use crate::models::Outcome;
use crate::trading::trade_record::Trade;

const DIMENSIONS: &[&str] = &["pair", "direction", "timeframe"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketStats {
    pub dimension: String,
    pub value: String,
    pub total: usize,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub avg_risk_reward: f64,
    /// Sum of R multiples (+R:R per win, -1 per loss).
    pub net_r: f64,
}

/// Breaks decided journal entries down by pair, direction and timeframe tag.
pub struct JournalAnalyzer;

impl JournalAnalyzer {
    pub fn analyze(trades: &[Trade]) -> HashMap<String, HashMap<String, BucketStats>> {
        let decided: Vec<&Trade> = trades.iter().filter(|t| t.outcome().is_decided()).collect();

        DIMENSIONS
            .iter()
            .map(|&dim| (dim.to_string(), Self::analyze_dimension(&decided, dim)))
            .collect()
    }

    /// Buckets of one dimension, best net R first.
    pub fn ranked(trades: &[Trade], dimension: &str) -> Vec<BucketStats> {
        let mut out: Vec<BucketStats> = Self::analyze(trades)
            .remove(dimension)
            .map(|m| m.into_values().collect())
            .unwrap_or_default();
        out.sort_by(|a, b| b.net_r.total_cmp(&a.net_r).then_with(|| a.value.cmp(&b.value)));
        out
    }

    fn analyze_dimension(trades: &[&Trade], dimension: &str) -> HashMap<String, BucketStats> {
        let mut buckets: HashMap<String, Vec<&Trade>> = HashMap::new();
        for t in trades {
            if let Some(key) = Self::extract_key(t, dimension) {
                buckets.entry(key).or_default().push(t);
            }
        }

        buckets
            .into_iter()
            .map(|(value, trades)| {
                let stats = Self::compute_stats(dimension, &value, &trades);
                (value, stats)
            })
            .collect()
    }

    fn extract_key(trade: &Trade, dimension: &str) -> Option<String> {
        match dimension {
            "pair" => Some(trade.pair().to_string()),
            "direction" => Some(trade.direction().to_string()),
            "timeframe" => Some(
                trade
                    .tags()
                    .first()
                    .cloned()
                    .unwrap_or_else(|| "untagged".to_string()),
            ),
            _ => None,
        }
    }

    fn compute_stats(dimension: &str, value: &str, trades: &[&Trade]) -> BucketStats {
        let total = trades.len();
        let wins = trades.iter().filter(|t| t.outcome() == Outcome::Win).count();
        let losses = trades.iter().filter(|t| t.outcome() == Outcome::Loss).count();
        let win_rate = if total > 0 {
            wins as f64 / total as f64
        } else {
            0.0
        };
        let avg_risk_reward = if total > 0 {
            trades.iter().map(|t| t.risk_reward()).sum::<f64>() / total as f64
        } else {
            0.0
        };
        let net_r: f64 = trades.iter().map(|t| t.r_multiple()).sum();

        BucketStats {
            dimension: dimension.to_string(),
            value: value.to_string(),
            total,
            wins,
            losses,
            win_rate: round4(win_rate),
            avg_risk_reward: round2(avg_risk_reward),
            net_r: round2(net_r),
        }
    }
}

fn round4(x: f64) -> f64 {
    (x * 10000.0).round() / 10000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;
    use crate::test_helpers::draft;

    fn trades() -> Vec<Trade> {
        vec![
            draft("EURUSD", Direction::Short, Outcome::Win, 2.0).into_trade(1),
            draft("EURUSD", Direction::Long, Outcome::Loss, 2.5).into_trade(2),
            draft("GBPUSD", Direction::Long, Outcome::Win, 3.0).into_trade(3),
            draft("GBPUSD", Direction::Long, Outcome::Pending, 2.0).into_trade(4),
        ]
    }

    #[test]
    fn pending_trades_are_ignored() {
        let analysis = JournalAnalyzer::analyze(&trades());
        let gbp = &analysis["pair"]["GBPUSD"];
        assert_eq!(gbp.total, 1);
        assert_eq!(gbp.wins, 1);
        assert!((gbp.win_rate - 1.0).abs() < 1e-9);
    }

    #[test]
    fn direction_buckets() {
        let analysis = JournalAnalyzer::analyze(&trades());
        let long = &analysis["direction"]["Long"];
        assert_eq!(long.total, 2);
        assert!((long.win_rate - 0.5).abs() < 1e-9);
        assert!((long.net_r - 2.0).abs() < 1e-9);
    }

    #[test]
    fn zero_ratio_win_still_counts_as_win() {
        let trades = vec![draft("USDJPY", Direction::Long, Outcome::Win, 0.0).into_trade(1)];
        let analysis = JournalAnalyzer::analyze(&trades);
        let bucket = &analysis["pair"]["USDJPY"];
        assert_eq!((bucket.wins, bucket.losses), (1, 0));
        assert_eq!(bucket.win_rate, 1.0);
    }

    #[test]
    fn ranked_by_net_r() {
        let ranked = JournalAnalyzer::ranked(&trades(), "pair");
        assert_eq!(ranked[0].value, "GBPUSD");
        assert!((ranked[1].net_r - 1.0).abs() < 1e-9);
        assert!(JournalAnalyzer::ranked(&trades(), "session").is_empty());
    }

    #[test]
    fn untagged_timeframe_bucket() {
        let analysis = JournalAnalyzer::analyze(&trades());
        assert_eq!(analysis["timeframe"]["untagged"].total, 3);
    }
}
