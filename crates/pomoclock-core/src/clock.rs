//! Tick driver for [`TimerEngine`].
//!
//! A [`Clock`] owns one engine and at most one ticker task. Starting always
//! clears the previous ticker before spawning a new one, and stopping aborts
//! it right away, so the countdown can never run at double speed or tick
//! after a pause.
//!
//! Every start and stop bumps a generation number kept under the engine lock.
//! A ticker only ticks while its own generation is current and the engine is
//! running, so a ticker that woke up just before being replaced exits without
//! touching the engine.
//!
//! All methods that may start the ticker must be called from within a Tokio
//! runtime.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

use crate::events::Event;
use crate::timer::{Snapshot, TimerEngine};

pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

const EVENT_CAPACITY: usize = 64;

/// State shared with the ticker task.
struct Shared {
    engine: TimerEngine,
    /// Identifies the only ticker allowed to tick.
    generation: u64,
}

/// What a ticker does after waking up.
#[derive(Debug, PartialEq)]
enum TickerStep {
    Continue(Option<Event>),
    Exit,
}

pub struct Clock {
    shared: Arc<Mutex<Shared>>,
    period: Duration,
    ticker: Option<JoinHandle<()>>,
    events: broadcast::Sender<Event>,
}

impl Clock {
    pub fn new(engine: TimerEngine) -> Self {
        Self::with_period(engine, DEFAULT_TICK_PERIOD)
    }

    /// Drive `engine` with a custom tick period. A zero period is raised to
    /// one millisecond.
    pub fn with_period(engine: TimerEngine, period: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            shared: Arc::new(Mutex::new(Shared {
                engine,
                generation: 0,
            })),
            period: period.max(Duration::from_millis(1)),
            ticker: None,
            events,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Snapshot {
        lock(&self.shared).engine.snapshot()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether a ticker task is currently scheduled.
    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Receive every event the engine emits, ticks included.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    // ── Intents ──────────────────────────────────────────────────────

    pub fn increase_session_length(&self) -> Option<Event> {
        let event = lock(&self.shared).engine.increase_session_length();
        self.publish(event)
    }

    pub fn decrease_session_length(&self) -> Option<Event> {
        let event = lock(&self.shared).engine.decrease_session_length();
        self.publish(event)
    }

    pub fn increase_break_length(&self) -> Option<Event> {
        let event = lock(&self.shared).engine.increase_break_length();
        self.publish(event)
    }

    pub fn decrease_break_length(&self) -> Option<Event> {
        let event = lock(&self.shared).engine.decrease_break_length();
        self.publish(event)
    }

    pub fn toggle_play(&mut self) -> Option<Event> {
        let (event, running) = {
            let mut shared = lock(&self.shared);
            let event = shared.engine.toggle_play();
            (event, shared.engine.is_running())
        };
        if running {
            self.start_ticker();
        } else {
            self.stop_ticker();
        }
        self.publish(event)
    }

    /// Start counting down. Does nothing if already running.
    pub fn play(&mut self) -> Option<Event> {
        if lock(&self.shared).engine.is_running() {
            return None;
        }
        self.toggle_play()
    }

    /// Stop counting down. Does nothing if already paused.
    pub fn pause(&mut self) -> Option<Event> {
        if !lock(&self.shared).engine.is_running() {
            return None;
        }
        self.toggle_play()
    }

    pub fn reset(&mut self) -> Option<Event> {
        self.stop_ticker();
        let event = lock(&self.shared).engine.reset();
        self.publish(event)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn publish(&self, event: Option<Event>) -> Option<Event> {
        if let Some(ref e) = event {
            // No subscribers is fine.
            let _ = self.events.send(e.clone());
        }
        event
    }

    fn start_ticker(&mut self) {
        self.stop_ticker();
        let generation = bump_generation(&self.shared);

        let shared = Arc::clone(&self.shared);
        let events = self.events.clone();
        let period = self.period;
        debug!(period_ms = period.as_millis() as u64, generation, "starting ticker");

        self.ticker = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                match tick_current(&shared, generation) {
                    TickerStep::Continue(Some(event)) => {
                        let _ = events.send(event);
                    }
                    TickerStep::Continue(None) => {}
                    TickerStep::Exit => break,
                }
            }
            debug!(generation, "ticker exited");
        }));
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            bump_generation(&self.shared);
            handle.abort();
            debug!("ticker aborted");
        }
    }
}

impl Drop for Clock {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

fn bump_generation(shared: &Mutex<Shared>) -> u64 {
    let mut shared = lock(shared);
    shared.generation = shared.generation.wrapping_add(1);
    shared.generation
}

/// Tick the engine on behalf of the ticker started as `generation`.
fn tick_current(shared: &Mutex<Shared>, generation: u64) -> TickerStep {
    let mut shared = lock(shared);
    if shared.generation != generation || !shared.engine.is_running() {
        return TickerStep::Exit;
    }
    TickerStep::Continue(shared.engine.tick())
}
