use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use colorwheel_table::{TableConfig, TableSession};
use colorwheel_types::wheel::{RoundEvent, CHIP_DENOMINATIONS};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::select;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

mod commands;
mod render;

use commands::{handle_line, hint_for, CommandAction};

/// CLI flags (override the COLOR_WHEEL_* environment)
#[derive(Parser, Debug)]
#[command(name = "colorwheel-terminal", about = "Color wheel table in the terminal")]
struct Args {
    /// Spin animation length in milliseconds
    #[arg(long)]
    spin_ms: Option<u64>,

    /// Result display length in milliseconds
    #[arg(long)]
    display_ms: Option<u64>,

    /// Starting balance
    #[arg(long)]
    balance: Option<u64>,

    /// Seed the wheel for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Print events as JSON lines instead of text
    #[arg(long)]
    json: bool,

    /// Debug-level logging
    #[arg(long)]
    verbose: bool,
}

impl Args {
    fn apply(&self, mut config: TableConfig) -> TableConfig {
        if let Some(spin_ms) = self.spin_ms {
            config.phases.spin_ms = spin_ms;
        }
        if let Some(display_ms) = self.display_ms {
            config.phases.display_ms = display_ms;
        }
        if let Some(balance) = self.balance {
            config.starting_balance = balance;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    // stderr keeps stdout clean for --json consumers.
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

struct Terminal {
    session: TableSession,
    chip: u64,
    json: bool,
}

impl Terminal {
    fn log(&self, line: &str) {
        let ts = Local::now().format("%H:%M:%S");
        for part in line.lines().filter(|l| !l.is_empty()) {
            println!("{ts} {part}");
        }
    }

    fn show_event(&self, event: &RoundEvent) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(event).context("encode event")?);
        } else if let Some(line) = render::format_event(event) {
            self.log(&line);
        }
        Ok(())
    }

    /// Returns `false` once the player asks to leave.
    fn run_command(&mut self, line: &str) -> bool {
        let action = match handle_line(line) {
            Ok(action) => action,
            Err(err) => {
                let hint = hint_for(line).map(|h| format!(" ({h})")).unwrap_or_default();
                self.log(&format!("⚠️ {err:#}{hint}"));
                return true;
            }
        };
        // Accepted commands echo through the event stream.
        let result = match action {
            CommandAction::Noop => Ok(()),
            CommandAction::Quit => return false,
            CommandAction::Help(text) => {
                self.log(&text);
                Ok(())
            }
            CommandAction::Status => {
                let snapshot = self.session.snapshot();
                self.log(&render::format_status(&snapshot, self.chip));
                Ok(())
            }
            CommandAction::Wheel => {
                self.log(&render::format_wheel());
                Ok(())
            }
            CommandAction::SetChip(value) => {
                self.chip = value;
                self.log(&format!("Chip set to {value}"));
                Ok(())
            }
            CommandAction::Bet { color, amount } => self
                .session
                .place_bet(color, amount.unwrap_or(self.chip))
                .map(drop),
            CommandAction::Clear => self.session.clear_bets().map(drop),
            CommandAction::Spin => self.session.spin().map(drop),
        };
        if let Err(err) = result {
            self.log(&format!("⚠️ {} [{}]", err, err.code()));
        }
        true
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.apply(TableConfig::from_env());
    let session = TableSession::new(config).context("failed to open table")?;
    let mut events = session.subscribe();
    let mut term = Terminal {
        session: session.clone(),
        chip: CHIP_DENOMINATIONS[1],
        json: args.json,
    };

    term.log(&format!(
        "Balance {} · chip {} · type /help for commands",
        session.snapshot().balance,
        term.chip
    ));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        select! {
            line = lines.next_line() => {
                match line.context("read stdin")? {
                    Some(line) => {
                        if !term.run_command(&line) {
                            break;
                        }
                    }
                    None => break,
                }
            }
            event = events.recv() => {
                match event {
                    Ok(event) => term.show_event(&event)?,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "event stream lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }

    session.shutdown();
    info!(balance = session.snapshot().balance, "table closed");
    Ok(())
}
