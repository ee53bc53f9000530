use std::str::FromStr;
use thiserror::Error;

use sd_trading_coach::advisory::LossStreak;
use sd_trading_coach::core::checklist::Gate;
use sd_trading_coach::models::Timeframe;

pub const HELP: &str = "\
Checklist:
  pair <SYMBOL>          set the instrument (step 1)
  tf <15M|1H|4H|D1>      set the context timeframe
  check [gate]           tick/untick the current step (or a named gate)
  next | back            move between steps
  review                 ask the coach to review the setup (step 3+)
  log [notes]            log the trade (step 5)
  reset                  abandon the current setup
Calculator:
  balance <n> | risk <pct> | entry <price> | stop <price> | tp <price>
Coach & journal:
  coach <losses 0-3> <how you feel>
  insight                journal insight from the coach
  stats [json] | journal | status | help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Pair(String),
    Timeframe(Timeframe),
    Check(Option<Gate>),
    Next,
    Back,
    Balance(f64),
    RiskPercent(f64),
    Entry(f64),
    Stop(f64),
    TakeProfit(f64),
    Review,
    Log(String),
    Reset,
    Coach { losses: LossStreak, context: String },
    Insight,
    Stats { json: bool },
    Journal,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
    #[error("unknown timeframe '{0}' (15M, 1H, 4H, D1)")]
    UnknownTimeframe(String),
    #[error("unknown gate '{0}'")]
    UnknownGate(String),
}

fn number(arg: Option<&str>, name: &'static str) -> Result<f64, CommandError> {
    let raw = arg.ok_or(CommandError::MissingArgument(name))?;
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CommandError::InvalidNumber(raw.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((h, r)) => (h, r.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then_some(rest);

        match head.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "pair" => arg
                .map(|p| Command::Pair(p.to_string()))
                .ok_or(CommandError::MissingArgument("pair")),
            "tf" | "timeframe" => {
                let raw = arg.ok_or(CommandError::MissingArgument("tf"))?;
                Timeframe::from_str_loose(raw)
                    .map(Command::Timeframe)
                    .ok_or_else(|| CommandError::UnknownTimeframe(raw.to_string()))
            }
            "check" | "toggle" => match arg {
                None => Ok(Command::Check(None)),
                Some(raw) => Gate::from_str_loose(raw)
                    .map(|g| Command::Check(Some(g)))
                    .ok_or_else(|| CommandError::UnknownGate(raw.to_string())),
            },
            "next" => Ok(Command::Next),
            "back" => Ok(Command::Back),
            "balance" => number(arg, "balance").map(Command::Balance),
            "risk" => number(arg, "risk").map(Command::RiskPercent),
            "entry" => number(arg, "entry").map(Command::Entry),
            "stop" | "sl" => number(arg, "stop").map(Command::Stop),
            "tp" => number(arg, "tp").map(Command::TakeProfit),
            "review" => Ok(Command::Review),
            "log" => Ok(Command::Log(rest.to_string())),
            "reset" => Ok(Command::Reset),
            "coach" => {
                let raw = arg.ok_or(CommandError::MissingArgument("coach"))?;
                let (count, context) = match raw.split_once(char::is_whitespace) {
                    Some((c, ctx)) => (c, ctx.trim()),
                    None => (raw, ""),
                };
                let losses = count
                    .trim_end_matches('+')
                    .parse::<u32>()
                    .map_err(|_| CommandError::InvalidNumber(count.to_string()))?;
                if context.is_empty() {
                    return Err(CommandError::MissingArgument("coach"));
                }
                Ok(Command::Coach {
                    losses: LossStreak::from_count(losses),
                    context: context.to_string(),
                })
            }
            "insight" => Ok(Command::Insight),
            "stats" => Ok(Command::Stats {
                json: rest.eq_ignore_ascii_case("json"),
            }),
            "journal" => Ok(Command::Journal),
            "status" => Ok(Command::Status),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_checklist_commands() {
        assert_eq!("pair eurusd".parse::<Command>(), Ok(Command::Pair("eurusd".to_string())));
        assert_eq!("tf 1h".parse::<Command>(), Ok(Command::Timeframe(Timeframe::H1)));
        assert_eq!("check".parse::<Command>(), Ok(Command::Check(None)));
        assert_eq!("check zone".parse::<Command>(), Ok(Command::Check(Some(Gate::SupplyDemandZone))));
        assert_eq!("  NEXT ".parse::<Command>(), Ok(Command::Next));
        assert_eq!("log clean break".parse::<Command>(), Ok(Command::Log("clean break".to_string())));
        assert_eq!("log".parse::<Command>(), Ok(Command::Log(String::new())));
    }

    #[test]
    fn parses_calculator_numbers() {
        assert_eq!("entry 1.0950".parse::<Command>(), Ok(Command::Entry(1.0950)));
        assert_eq!("sl 1.0970".parse::<Command>(), Ok(Command::Stop(1.0970)));
        assert_eq!(
            "risk abc".parse::<Command>(),
            Err(CommandError::InvalidNumber("abc".to_string()))
        );
        assert_eq!("tp".parse::<Command>(), Err(CommandError::MissingArgument("tp")));
        assert_eq!(
            "entry NaN".parse::<Command>(),
            Err(CommandError::InvalidNumber("NaN".to_string()))
        );
    }

    #[test]
    fn parses_coach_with_capped_losses() {
        assert_eq!(
            "coach 5 I keep moving my stop".parse::<Command>(),
            Ok(Command::Coach {
                losses: LossStreak::ThreeOrMore,
                context: "I keep moving my stop".to_string(),
            })
        );
        assert_eq!(
            "coach 3+ tilted".parse::<Command>().map(|c| matches!(c, Command::Coach { .. })),
            Ok(true)
        );
        assert_eq!("coach 1".parse::<Command>(), Err(CommandError::MissingArgument("coach")));
    }

    #[test]
    fn rejects_unknown() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!("buy".parse::<Command>(), Err(CommandError::Unknown("buy".to_string())));
        assert_eq!(
            "tf 3h".parse::<Command>(),
            Err(CommandError::UnknownTimeframe("3h".to_string()))
        );
        assert_eq!("stats json".parse::<Command>(), Ok(Command::Stats { json: true }));
    }
}
