pub mod command;

use std::collections::HashMap;

use anyhow::Result;
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info};

use sd_trading_coach::advisory::{AdviceKind, Coach, LossStreak, RequestTicket, RequestTracker};
use sd_trading_coach::config::Config;
use sd_trading_coach::core::checklist::{Checklist, ChecklistAction, Gate, Stage};
use sd_trading_coach::core::risk::{RiskCalculator, RiskResult};
use sd_trading_coach::trading::journal_stats::JournalAnalyzer;
use sd_trading_coach::trading::{demo_trades, Journal};

use self::command::{Command, HELP};

const DEFAULT_LOG_NOTE: &str = "Generated via Strategy Checklist";

/// Reply from a spawned advisory task.
#[derive(Debug)]
pub struct AdviceReply {
    pub ticket: RequestTicket,
    pub text: String,
}

/// All state of one interactive session. Mutated only from the event loop.
pub struct CoachSession {
    cfg: Config,
    checklist: Checklist,
    calculator: RiskCalculator,
    journal: Journal,
    coach: Coach,
    tracker: RequestTracker,
    advice_tx: mpsc::UnboundedSender<AdviceReply>,
    advice: HashMap<AdviceKind, String>,
}

impl CoachSession {
    pub fn new(cfg: Config, coach: Coach) -> (Self, mpsc::UnboundedReceiver<AdviceReply>) {
        let (advice_tx, advice_rx) = mpsc::unbounded_channel();
        let calculator = RiskCalculator::new(cfg.risk_inputs());
        let checklist = Checklist::with_timeframe(cfg.default_timeframe)
            .transition(ChecklistAction::RiskUpdated(*calculator.inputs()));
        let session = Self {
            cfg,
            checklist,
            calculator,
            journal: Journal::new(),
            coach,
            tracker: RequestTracker::new(),
            advice_tx,
            advice: HashMap::new(),
        };
        (session, advice_rx)
    }

    /// Load the demo journal and, with a configured coach, ask for an insight
    /// on it straight away.
    pub fn seed_demo(&mut self) -> Vec<String> {
        for draft in demo_trades(Utc::now()) {
            self.journal.add_draft(draft);
        }
        info!("Seeded journal with {} demo trades", self.journal.len());
        let mut out = vec![format!("Loaded {} demo trades.", self.journal.len())];
        if self.coach.is_available() {
            out.push(self.spawn_journal_insight());
        }
        out
    }

    pub fn handle(&mut self, cmd: Command) -> Vec<String> {
        match cmd {
            Command::Pair(pair) => {
                self.apply(ChecklistAction::SetPair(pair));
                vec![format!("Pair: {}", self.checklist.state().pair)]
            }
            Command::Timeframe(tf) => {
                self.apply(ChecklistAction::SetTimeframe(tf));
                vec![format!("Timeframe: {}", tf.label())]
            }
            Command::Check(gate) => {
                let gate = gate.unwrap_or_else(|| self.checklist.stage().gate());
                self.apply(ChecklistAction::ToggleGate(gate));
                let mark = if self.checklist.state().gate(gate) { "x" } else { " " };
                vec![format!("[{}] {}", mark, gate.statement())]
            }
            Command::Next => self.advance(),
            Command::Back => {
                if self.checklist.stage() == Stage::Stage1 {
                    return vec!["Already at the first step.".to_string()];
                }
                self.apply(ChecklistAction::Retreat);
                self.stage_lines()
            }
            Command::Balance(v) => self.update_risk(|c| c.set_balance(v)),
            Command::RiskPercent(v) => self.update_risk(|c| c.set_risk_percent(v)),
            Command::Entry(v) => self.update_risk(|c| c.set_entry_price(v)),
            Command::Stop(v) => self.update_risk(|c| c.set_stop_loss(v)),
            Command::TakeProfit(v) => self.update_risk(|c| c.set_take_profit(v)),
            Command::Review => {
                if !self.checklist.can_request_review() {
                    return vec!["Coach review unlocks at step 3.".to_string()];
                }
                vec![self.spawn_setup_review()]
            }
            Command::Log(notes) => self.log_trade(&notes),
            Command::Reset => {
                self.apply(ChecklistAction::Reset);
                self.sync_risk();
                vec!["Checklist reset.".to_string()]
            }
            Command::Coach { losses, context } => vec![self.spawn_advice(context, losses)],
            Command::Insight => vec![self.spawn_journal_insight()],
            Command::Stats { json } => self.stats(json),
            Command::Journal => self.journal_lines(),
            Command::Status => self.status_lines(),
            Command::Help => HELP.lines().map(str::to_string).collect(),
            Command::Quit => vec!["Bye.".to_string()],
        }
    }

    /// Display an advisory reply unless a newer request of its kind superseded it.
    pub fn on_advice(&mut self, reply: AdviceReply) -> Option<String> {
        if !self.tracker.accept(reply.ticket) {
            debug!(
                "Dropping stale {} reply (seq {})",
                reply.ticket.kind, reply.ticket.seq
            );
            return None;
        }
        let line = format!("{}: {}", reply.ticket.kind, reply.text);
        self.advice.insert(reply.ticket.kind, reply.text);
        Some(line)
    }

    fn apply(&mut self, action: ChecklistAction) {
        self.checklist = self.checklist.transition(action);
    }

    fn sync_risk(&mut self) {
        self.apply(ChecklistAction::RiskUpdated(*self.calculator.inputs()));
    }

    fn update_risk<F>(&mut self, edit: F) -> Vec<String>
    where
        F: FnOnce(&mut RiskCalculator) -> RiskResult,
    {
        let result = edit(&mut self.calculator);
        self.sync_risk();
        risk_lines(&result)
    }

    fn advance(&mut self) -> Vec<String> {
        if self.checklist.stage() == Stage::Stage5 {
            return vec!["Last step: use 'log' to record the trade.".to_string()];
        }
        if !self.checklist.can_proceed() {
            let gate = self.checklist.stage().gate();
            let mut msg = format!("Blocked: confirm \"{}\" first", gate.statement());
            if self.checklist.stage() == Stage::Stage1 && self.checklist.state().pair.is_empty() {
                msg.push_str(" and set a pair");
            }
            msg.push('.');
            return vec![msg];
        }
        self.apply(ChecklistAction::Advance);
        self.stage_lines()
    }

    fn log_trade(&mut self, notes: &str) -> Vec<String> {
        let Some((setup, fresh)) = self.checklist.complete() else {
            return vec![
                "Cannot log yet: every gate must be ticked and R:R must be at least 1:2."
                    .to_string(),
            ];
        };
        let notes = if notes.trim().is_empty() {
            DEFAULT_LOG_NOTE
        } else {
            notes.trim()
        };
        let trade = self.journal.record(&setup, notes, Utc::now());
        info!(
            "Logged trade #{}: {} {} R:R {}",
            trade.id(),
            trade.pair(),
            trade.direction(),
            trade.risk_reward()
        );
        let line = format!("Logged #{}: {}", trade.id(), trade.summary_line());

        self.checklist = fresh;
        self.calculator.clear_prices();
        self.sync_risk();
        vec![line, "Checklist reset for the next setup.".to_string()]
    }

    fn spawn_setup_review(&mut self) -> String {
        let ticket = self.tracker.begin(AdviceKind::SetupReview);
        let coach = self.coach.clone();
        let state = self.checklist.state().clone();
        let tx = self.advice_tx.clone();
        tokio::spawn(async move {
            let text = coach.request_setup_review(&state).await;
            let _ = tx.send(AdviceReply { ticket, text });
        });
        format!("{}: analyzing setup...", ticket.kind)
    }

    fn spawn_advice(&mut self, context: String, losses: LossStreak) -> String {
        let ticket = self.tracker.begin(AdviceKind::Psychology);
        let coach = self.coach.clone();
        let tx = self.advice_tx.clone();
        tokio::spawn(async move {
            let text = coach.request_advice(&context, losses).await;
            let _ = tx.send(AdviceReply { ticket, text });
        });
        format!("{}: thinking ({} recent losses)...", ticket.kind, losses)
    }

    fn spawn_journal_insight(&mut self) -> String {
        let ticket = self.tracker.begin(AdviceKind::JournalInsight);
        let coach = self.coach.clone();
        let trades = self.journal.trades().to_vec();
        let tx = self.advice_tx.clone();
        tokio::spawn(async move {
            let text = coach.request_journal_insight(&trades).await;
            let _ = tx.send(AdviceReply { ticket, text });
        });
        format!("{}: analyzing journal...", ticket.kind)
    }

    fn stage_lines(&self) -> Vec<String> {
        let stage = self.checklist.stage();
        vec![
            format!(
                "{} ({:.0}%) {}",
                stage,
                self.checklist.progress() * 100.0,
                stage.title()
            ),
            format!("  {}", stage.description()),
        ]
    }

    fn status_lines(&self) -> Vec<String> {
        let state = self.checklist.state();
        let pair = if state.pair.is_empty() { "-" } else { state.pair.as_str() };
        let mut out = self.stage_lines();
        out.push(format!("Pair: {}  Timeframe: {}", pair, state.timeframe.label()));
        for gate in Gate::ALL {
            let mark = if state.gate(gate) { "x" } else { " " };
            out.push(format!("  [{}] {}", mark, gate.statement()));
        }
        let inputs = self.calculator.inputs();
        out.push(format!(
            "Balance {:.2}  Risk {}%  Entry {}  Stop {}  TP {}",
            inputs.balance, inputs.risk_percent, inputs.entry_price, inputs.stop_loss,
            inputs.take_profit
        ));
        out.extend(risk_lines(self.checklist.risk()));
        for kind in [AdviceKind::SetupReview, AdviceKind::Psychology, AdviceKind::JournalInsight] {
            if self.tracker.is_pending(kind) {
                out.push(format!("{}: waiting...", kind));
            } else if let Some(text) = self.advice.get(&kind) {
                out.push(format!("{}: {}", kind, text));
            }
        }
        if !self.coach.is_available() {
            out.push("Coach offline: set GEMINI_API_KEY to enable feedback.".to_string());
        }
        out
    }

    fn stats(&self, json: bool) -> Vec<String> {
        let snapshot = self.journal.dashboard(self.cfg.performance_window);
        if json {
            return match serde_json::to_string_pretty(&snapshot) {
                Ok(s) => s.lines().map(str::to_string).collect(),
                Err(e) => vec![format!("Failed to serialize stats: {}", e)],
            };
        }

        let s = &snapshot.summary;
        let mut out = vec![
            format!("Total trades: {}", s.total),
            format!(
                "Win rate: {:.1}% ({} W / {} L, {} BE, {} pending)",
                s.win_rate_pct(),
                s.wins,
                s.losses,
                s.break_even,
                s.pending
            ),
            format!("Avg R:R: {:.2}", s.avg_risk_reward),
        ];
        if !snapshot.performance.is_empty() {
            let bars: Vec<String> = snapshot
                .performance
                .iter()
                .map(|p| format!("{} {:+.1}R", p.label, p.value))
                .collect();
            out.push(format!("Recent: {}", bars.join("  ")));
        }
        if let Some(best) = JournalAnalyzer::ranked(self.journal.trades(), "pair").first() {
            out.push(format!(
                "Best pair: {} ({:+.1}R over {} decided)",
                best.value, best.net_r, best.total
            ));
        }
        out
    }

    fn journal_lines(&self) -> Vec<String> {
        if self.journal.is_empty() {
            return vec!["Journal is empty.".to_string()];
        }
        self.journal
            .trades()
            .iter()
            .map(|t| {
                format!(
                    "#{:<3} {}  {:<7} {:<5} {:<10} 1:{:<5} {}",
                    t.id(),
                    t.date().format("%Y-%m-%d"),
                    t.pair(),
                    t.direction(),
                    t.outcome(),
                    t.risk_reward(),
                    t.notes()
                )
            })
            .collect()
    }
}

fn risk_lines(result: &RiskResult) -> Vec<String> {
    let mut out = vec![format!(
        "Risk {:.2}  R:R 1:{}  Lots {:.2}",
        result.risk_amount, result.risk_reward, result.lots
    )];
    if let Some(note) = result.advisory() {
        out.push(format!("  {}", note));
    }
    out
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Drive the session from stdin until `quit`, EOF or Ctrl+C.
pub async fn run(
    mut session: CoachSession,
    mut advice_rx: mpsc::UnboundedReceiver<AdviceReply>,
) -> Result<()> {
    info!("Session ready. Type 'help' for commands.");
    print_lines(&session.handle(Command::Status));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down");
                return Ok(());
            }
            Some(reply) = advice_rx.recv() => {
                if let Some(line) = session.on_advice(reply) {
                    println!("{}", line);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("stdin closed, shutting down");
                    return Ok(());
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(Command::Quit) => {
                        print_lines(&session.handle(Command::Quit));
                        return Ok(());
                    }
                    Ok(cmd) => print_lines(&session.handle(cmd)),
                    Err(e) => println!("{}", e),
                }
            }
        }
    }
}
