use serde::{Deserialize, Serialize};
use std::fmt;

/// Context timeframe selectable on the first checklist step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    #[serde(rename = "15M")]
    M15,
    #[serde(rename = "1H")]
    H1,
    #[default]
    #[serde(rename = "4H")]
    H4,
    #[serde(rename = "D1")]
    D1,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [Timeframe::M15, Timeframe::H1, Timeframe::H4, Timeframe::D1];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::M15 => "15M",
            Timeframe::H1 => "1H",
            Timeframe::H4 => "4H",
            Timeframe::D1 => "D1",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Timeframe::M15 => "15 Minute",
            Timeframe::H1 => "1 Hour",
            Timeframe::H4 => "4 Hour",
            Timeframe::D1 => "Daily",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Timeframe> {
        match s.trim().to_ascii_uppercase().as_str() {
            "15M" | "M15" => Some(Timeframe::M15),
            "1H" | "H1" => Some(Timeframe::H1),
            "4H" | "H4" => Some(Timeframe::H4),
            "D1" | "1D" | "DAILY" => Some(Timeframe::D1),
            _ => None,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
