mod app;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use sd_trading_coach::advisory::{Coach, GeminiClient};
use sd_trading_coach::config::Config;

use crate::app::CoachSession;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = Config::from_env();

    // Operator log on stderr, session output on stdout
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.log_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();

    let demo = std::env::args().skip(1).any(|a| a == "--demo");

    let gemini = GeminiClient::from_config(&cfg);
    let model = gemini.model().to_string();
    let coach = Coach::new(Arc::new(gemini));

    info!("{}", "=".repeat(60));
    info!("Supply & Demand trading coach starting up");
    info!(
        "Coach: {} ({})",
        if coach.is_available() { "online" } else { "offline" },
        model
    );
    info!(
        "Calculator defaults: balance {:.2}, risk {}%",
        cfg.account_balance, cfg.risk_percent
    );
    info!("Default timeframe: {}", cfg.default_timeframe);
    info!("{}", "=".repeat(60));

    let (mut session, advice_rx) = CoachSession::new(cfg, coach);
    if demo {
        for line in session.seed_demo() {
            println!("{}", line);
        }
    }

    app::run(session, advice_rx).await?;

    Ok(())
}
