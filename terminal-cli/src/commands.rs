use std::collections::{BTreeMap, HashMap};

use anyhow::{anyhow, Context, Result};
use colorwheel_types::wheel::{Color, CHIP_DENOMINATIONS};
use lazy_static::lazy_static;

#[derive(Clone)]
pub struct CommandDef {
    pub name: &'static str,
    pub usage: &'static str,
    pub desc: &'static str,
    pub group: &'static str,
}

const fn cmd(
    name: &'static str,
    usage: &'static str,
    desc: &'static str,
    group: &'static str,
) -> CommandDef {
    CommandDef {
        name,
        usage,
        desc,
        group,
    }
}

lazy_static! {
    pub static ref COMMANDS: Vec<CommandDef> = vec![
        // Session
        cmd("help", "/help", "Show grouped commands", "Session"),
        cmd("status", "/status", "Show balance, bets and phase", "Session"),
        cmd("wheel", "/wheel", "Show the wheel layout and payouts", "Session"),
        cmd("quit", "/quit", "Exit", "Session"),
        // Betting
        cmd("chip", "/chip <5|10|25>", "Select the chip used by /bet", "Betting"),
        cmd("bet", "/bet <red|white|blue|gold> [amt]", "Stake on a color", "Betting"),
        cmd("clear", "/clear", "Refund every stake", "Betting"),
        // Round
        cmd("spin", "/spin", "Spin the wheel", "Round"),
    ];
    pub static ref HINTS: HashMap<String, String> = COMMANDS
        .iter()
        .map(|c| (format!("/{}", c.name), format!("{}: {}", c.usage, c.desc)))
        .collect();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
    Noop,
    Help(String),
    Status,
    Wheel,
    SetChip(u64),
    Bet { color: Color, amount: Option<u64> },
    Clear,
    Spin,
    Quit,
}

pub fn handle_line(line: &str) -> Result<CommandAction> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(CommandAction::Noop);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Err(anyhow!("Commands start with '/'"));
    };
    let mut parts = rest.split_whitespace();
    let Some(cmd) = parts.next() else {
        return Ok(CommandAction::Noop);
    };
    let args: Vec<&str> = parts.collect();
    match cmd.to_lowercase().as_str() {
        "quit" | "exit" => Ok(CommandAction::Quit),
        "help" => Ok(CommandAction::Help(render_help())),
        "status" => Ok(CommandAction::Status),
        "wheel" => Ok(CommandAction::Wheel),
        "chip" => handle_chip(&args),
        "bet" | "b" => handle_bet(&args),
        "clear" => Ok(CommandAction::Clear),
        "spin" | "s" => Ok(CommandAction::Spin),
        other => Err(anyhow!("Unknown command /{other}")),
    }
}

fn handle_chip(args: &[&str]) -> Result<CommandAction> {
    let raw = args
        .first()
        .ok_or_else(|| anyhow!("Usage: /chip <5|10|25>"))?;
    let value: u64 = raw.parse().context("chip value")?;
    if !CHIP_DENOMINATIONS.contains(&value) {
        return Err(anyhow!(
            "No {value} chip; choose one of {}",
            chip_list()
        ));
    }
    Ok(CommandAction::SetChip(value))
}

fn handle_bet(args: &[&str]) -> Result<CommandAction> {
    let raw_color = args
        .first()
        .ok_or_else(|| anyhow!("Usage: /bet <red|white|blue|gold> [amt]"))?;
    let color: Color = raw_color.parse()?;
    let amount = match args.get(1) {
        Some(raw) => Some(raw.parse::<u64>().context("bet amount")?),
        None => None,
    };
    Ok(CommandAction::Bet { color, amount })
}

fn chip_list() -> String {
    CHIP_DENOMINATIONS
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join("/")
}

pub fn render_help() -> String {
    let mut by_group: BTreeMap<&str, Vec<&CommandDef>> = BTreeMap::new();
    for c in COMMANDS.iter() {
        by_group.entry(c.group).or_default().push(c);
    }
    let mut out = String::new();
    for (group, cmds) in by_group {
        out.push_str(&format!("\n[{group}]\n"));
        for c in cmds {
            out.push_str(&format!("  {:<36} {}\n", c.usage, c.desc));
        }
    }
    out
}

/// Usage hint for a partially typed command, if it names a known one.
pub fn hint_for(input: &str) -> Option<&'static str> {
    let head = input.split_whitespace().next()?;
    HINTS.get(head).map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bets() {
        assert_eq!(
            handle_line("/bet red 25").unwrap(),
            CommandAction::Bet {
                color: Color::Red,
                amount: Some(25)
            }
        );
        assert_eq!(
            handle_line("/b G").unwrap(),
            CommandAction::Bet {
                color: Color::Gold,
                amount: None
            }
        );
        assert!(handle_line("/bet purple 5").is_err());
        assert!(handle_line("/bet blue lots").is_err());
        assert!(handle_line("/bet").is_err());
    }

    #[test]
    fn chips_are_limited_to_denominations() {
        assert_eq!(handle_line("/chip 25").unwrap(), CommandAction::SetChip(25));
        let err = handle_line("/chip 7").unwrap_err();
        assert!(err.to_string().contains("5/10/25"));
    }

    #[test]
    fn parses_round_commands() {
        assert_eq!(handle_line("/spin").unwrap(), CommandAction::Spin);
        assert_eq!(handle_line("  /CLEAR ").unwrap(), CommandAction::Clear);
        assert_eq!(handle_line("/exit").unwrap(), CommandAction::Quit);
        assert_eq!(handle_line("").unwrap(), CommandAction::Noop);
        assert_eq!(handle_line("/").unwrap(), CommandAction::Noop);
        assert!(handle_line("spin").is_err());
        assert!(handle_line("/roulette red 5").is_err());
    }

    #[test]
    fn help_lists_every_command() {
        let CommandAction::Help(text) = handle_line("/help").unwrap() else {
            panic!("expected help");
        };
        for c in COMMANDS.iter() {
            assert!(text.contains(c.usage), "missing {}", c.name);
        }
        assert!(text.contains("[Betting]"));
    }

    #[test]
    fn hints_follow_typed_command() {
        assert_eq!(
            hint_for("/bet re"),
            Some("/bet <red|white|blue|gold> [amt]: Stake on a color")
        );
        assert_eq!(hint_for("/nope"), None);
        assert_eq!(hint_for(""), None);
    }
}
