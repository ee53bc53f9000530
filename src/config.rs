use serde::{Deserialize, Serialize};

use crate::advisory::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::core::risk::RiskInputs;
use crate::models::Timeframe;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Advisory service
    #[serde(skip_serializing)]
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub advisory_timeout_secs: u64,

    // Calculator defaults
    pub account_balance: f64,
    pub risk_percent: f64,

    // Checklist / dashboard
    pub default_timeframe: Timeframe,
    pub performance_window: usize,

    // Logging
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            gemini_model: DEFAULT_MODEL.to_string(),
            gemini_base_url: DEFAULT_BASE_URL.to_string(),
            advisory_timeout_secs: 30,
            account_balance: 10_000.0,
            risk_percent: 1.0,
            default_timeframe: Timeframe::H4,
            performance_window: 5,
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or unparsable values keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Config::default();
        let env = |key: &str, default: &str| -> String {
            lookup(key).unwrap_or_else(|| default.to_string())
        };

        let gemini_api_key = lookup("GEMINI_API_KEY")
            .or_else(|| lookup("API_KEY"))
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Config {
            gemini_api_key,
            gemini_model: env("GEMINI_MODEL", &d.gemini_model),
            gemini_base_url: env("GEMINI_BASE_URL", &d.gemini_base_url),
            advisory_timeout_secs: env("ADVISORY_TIMEOUT_SECS", "30")
                .parse()
                .unwrap_or(d.advisory_timeout_secs),
            account_balance: env("ACCOUNT_BALANCE", "10000")
                .parse()
                .unwrap_or(d.account_balance),
            risk_percent: env("RISK_PERCENT", "1").parse().unwrap_or(d.risk_percent),
            default_timeframe: Timeframe::from_str_loose(&env("DEFAULT_TIMEFRAME", "4H"))
                .unwrap_or(d.default_timeframe),
            performance_window: env("PERFORMANCE_WINDOW", "5")
                .parse()
                .unwrap_or(d.performance_window),
            log_level: env("LOG_LEVEL", &d.log_level),
        }
    }

    pub fn risk_inputs(&self) -> RiskInputs {
        RiskInputs::new(self.account_balance, self.risk_percent)
    }
}
