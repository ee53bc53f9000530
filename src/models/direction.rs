use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Long,
    Short,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "Long",
            Direction::Short => "Short",
        }
    }

    /// Direction implied by where the target sits relative to entry.
    pub fn from_prices(entry_price: f64, take_profit: f64) -> Direction {
        if take_profit >= entry_price {
            Direction::Long
        } else {
            Direction::Short
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    #[serde(rename = "Break Even")]
    BreakEven,
    Pending,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "Win"),
            Outcome::Loss => write!(f, "Loss"),
            Outcome::BreakEven => write!(f, "Break Even"),
            Outcome::Pending => write!(f, "Pending"),
        }
    }
}

impl Outcome {
    /// Win or Loss. Break-even and pending trades carry no verdict.
    pub fn is_decided(&self) -> bool {
        matches!(self, Outcome::Win | Outcome::Loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_from_prices() {
        assert_eq!(Direction::from_prices(1.2650, 1.2700), Direction::Long);
        assert_eq!(Direction::from_prices(1.0950, 1.0910), Direction::Short);
    }

    #[test]
    fn outcome_display_and_serde() {
        assert_eq!(Outcome::BreakEven.to_string(), "Break Even");
        let json = serde_json::to_string(&Outcome::BreakEven).unwrap();
        assert_eq!(json, "\"Break Even\"");
        assert!(Outcome::Loss.is_decided());
        assert!(!Outcome::Pending.is_decided());
    }
}
