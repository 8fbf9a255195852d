use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use colorwheel_execution::{OutcomeSelector, RoundEngine, WheelSelector};
use colorwheel_types::wheel::{Color, RoundError, RoundEvent, TableSnapshot};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::{info, warn};

use crate::config::TableConfig;

/// The player's session: the only handle through which round state changes.
///
/// Cheap to clone; all clones share one engine. Commands must be issued from
/// inside a tokio runtime, since a successful spin schedules its timers there.
pub struct TableSession<S = WheelSelector> {
    shared: Arc<Shared<S>>,
}

impl<S> Clone for TableSession<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

struct Shared<S> {
    engine: Mutex<RoundEngine<S>>,
    events: broadcast::Sender<RoundEvent>,
    epoch: Instant,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl<S> Shared<S> {
    fn engine(&self) -> MutexGuard<'_, RoundEngine<S>> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn now_ms(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn publish(&self, event: RoundEvent) {
        // Called with the engine lock held. No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn take_timer(&self) -> Option<JoinHandle<()>> {
        self.timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl<S: OutcomeSelector> Shared<S> {
    /// Lock the engine after applying every transition due by now, so
    /// callers never act on a phase whose deadline has passed.
    fn current(&self) -> MutexGuard<'_, RoundEngine<S>> {
        let mut engine = self.engine();
        for event in engine.tick(self.now_ms()) {
            self.publish(event);
        }
        engine
    }
}

impl<S> Drop for Shared<S> {
    fn drop(&mut self) {
        let timer = self.timer.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = timer.take() {
            handle.abort();
        }
    }
}

impl TableSession<WheelSelector> {
    pub fn new(config: TableConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let engine = match config.seed {
            Some(seed) => RoundEngine::with_selector(
                config.phases,
                config.starting_balance,
                WheelSelector::from_seed(seed),
            ),
            None => RoundEngine::new(config.phases, config.starting_balance),
        };
        info!(
            balance = config.starting_balance,
            spin_ms = config.phases.spin_ms,
            display_ms = config.phases.display_ms,
            seeded = config.seed.is_some(),
            "table session opened"
        );
        Ok(Self::with_engine(engine, config.event_capacity))
    }
}

impl<S: OutcomeSelector + Send + 'static> TableSession<S> {
    pub fn with_engine(engine: RoundEngine<S>, event_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        Self {
            shared: Arc::new(Shared {
                engine: Mutex::new(engine),
                events,
                epoch: Instant::now(),
                timer: Mutex::new(None),
            }),
        }
    }

    /// Receive every event published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<RoundEvent> {
        self.shared.events.subscribe()
    }

    pub fn snapshot(&self) -> TableSnapshot {
        self.shared.current().snapshot()
    }

    /// Milliseconds since the session opened, on the clock deadlines use.
    pub fn now_ms(&self) -> u64 {
        self.shared.now_ms()
    }

    pub fn place_bet(&self, color: Color, amount: u64) -> Result<RoundEvent, RoundError> {
        let mut engine = self.shared.current();
        let result = engine.place_bet(color, amount);
        self.finish("place_bet", result)
    }

    pub fn clear_bets(&self) -> Result<RoundEvent, RoundError> {
        let mut engine = self.shared.current();
        let result = engine.clear_bets();
        self.finish("clear_bets", result)
    }

    /// Start a spin and return immediately. Settlement and reset are
    /// published later, when their timers fire.
    pub fn spin(&self) -> Result<RoundEvent, RoundError> {
        let event = {
            let mut engine = self.shared.current();
            let result = engine.spin(self.shared.now_ms());
            self.finish("spin", result)?
        };

        let handle = tokio::spawn(drive_round(Arc::downgrade(&self.shared)));
        let previous = self
            .shared
            .timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            // The last round's driver may not have woken yet; this one replaces it.
            previous.abort();
        }
        Ok(event)
    }

    /// Stop the round timer. Meant for teardown; nothing is published until
    /// the next command or snapshot applies the overdue transitions.
    pub fn shutdown(&self) {
        if let Some(handle) = self.shared.take_timer() {
            handle.abort();
        }
    }

    /// Publish the outcome of a command. Callers hold the engine lock so
    /// events leave in the order the engine produced them.
    fn finish(
        &self,
        command: &'static str,
        result: Result<RoundEvent, RoundError>,
    ) -> Result<RoundEvent, RoundError> {
        match result {
            Ok(event) => {
                self.shared.publish(event.clone());
                Ok(event)
            }
            Err(err) => {
                warn!(command, code = err.code(), %err, "command rejected");
                Err(err)
            }
        }
    }
}

/// Sleep until each pending deadline and apply it, until the table is Idle.
async fn drive_round<S: OutcomeSelector + Send + 'static>(shared: Weak<Shared<S>>) {
    loop {
        let wake_at = {
            let Some(shared) = shared.upgrade() else {
                return;
            };
            let Some(deadline) = shared.engine().phase_ends_at_ms() else {
                return;
            };
            shared.epoch + Duration::from_millis(deadline)
        };
        time::sleep_until(wake_at).await;

        let Some(shared) = shared.upgrade() else {
            return;
        };
        // Locking applies the due transitions and publishes their events.
        drop(shared.current());
    }
}
