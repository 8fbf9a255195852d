use anyhow::{anyhow, Context};
use colorwheel_execution::PhaseConfig;
use colorwheel_types::wheel::STARTING_BALANCE;

/// Default capacity of the event broadcast channel.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableConfig {
    pub phases: PhaseConfig,
    pub starting_balance: u64,
    /// Fixed RNG seed for reproducible sessions; entropy when `None`.
    pub seed: Option<u64>,
    pub event_capacity: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            phases: PhaseConfig::default(),
            starting_balance: STARTING_BALANCE,
            seed: None,
            event_capacity: DEFAULT_EVENT_CAPACITY,
        }
    }
}

impl TableConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, falling back to defaults for
    /// missing or unparseable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            phases: PhaseConfig::new(
                read_u64(&lookup, "COLOR_WHEEL_SPIN_MS", defaults.phases.spin_ms),
                read_u64(&lookup, "COLOR_WHEEL_DISPLAY_MS", defaults.phases.display_ms),
            ),
            starting_balance: read_u64(
                &lookup,
                "COLOR_WHEEL_STARTING_BALANCE",
                defaults.starting_balance,
            ),
            seed: lookup("COLOR_WHEEL_SEED").and_then(|raw| raw.trim().parse::<u64>().ok()),
            event_capacity: read_usize(
                &lookup,
                "COLOR_WHEEL_EVENT_CAPACITY",
                defaults.event_capacity,
            ),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.phases
            .validate()
            .map_err(|err| anyhow!(err))
            .context("invalid phase durations")?;
        if self.event_capacity == 0 {
            return Err(anyhow!("event_capacity must be greater than zero"));
        }
        Ok(())
    }
}

fn read_u64(lookup: &impl Fn(&str) -> Option<String>, key: &str, fallback: u64) -> u64 {
    lookup(key)
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .unwrap_or(fallback)
}

fn read_usize(lookup: &impl Fn(&str) -> Option<String>, key: &str, fallback: usize) -> usize {
    lookup(key)
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .unwrap_or(fallback)
}
