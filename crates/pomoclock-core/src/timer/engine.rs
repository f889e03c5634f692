//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use internal
//! threads or timers - the caller delivers one `tick()` per elapsed second
//! while the engine is running (see [`crate::Clock`]).
//!
//! ## State Transitions
//!
//! ```text
//! Session --(tick at 00:00)--> Break --(tick at 00:00)--> Session ...
//! ```
//!
//! Running is an orthogonal flag: it decides whether ticks count, not which
//! phase is active. The zero check runs before the decrement, so `00:00`
//! stays visible for one full tick before the phase flips.
//!
//! ## Usage
//!
//! ```
//! use pomoclock_core::{Phase, TimerEngine};
//!
//! let mut engine = TimerEngine::new();
//! engine.toggle_play();
//! engine.tick();
//! assert_eq!(engine.remaining_seconds(), 25 * 60 - 1);
//! assert_eq!(engine.phase(), Phase::Session);
//! ```

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::format::format_clock;
use super::phase::Phase;
use crate::alarm::{Alarm, SilentAlarm};
use crate::events::Event;

pub const MIN_LENGTH: u32 = 0;
pub const MAX_LENGTH: u32 = 60;
pub const DEFAULT_SESSION_LENGTH: u32 = 25;
pub const DEFAULT_BREAK_LENGTH: u32 = 5;

/// Observable engine state handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub phase: Phase,
    pub remaining_seconds: u32,
    pub running: bool,
    /// Minutes.
    pub session_length: u32,
    /// Minutes.
    pub break_length: u32,
}

impl Snapshot {
    /// Remaining time as `MM:SS`.
    pub fn clock(&self) -> String {
        format_clock(self.remaining_seconds)
    }
}

/// Core countdown engine.
///
/// Every operation is infallible. Edits that would leave `[0, 60]` clamp, and
/// edits to the active phase's length while running are ignored; both report
/// `None` only when nothing changed.
pub struct TimerEngine {
    session_length: u32,
    break_length: u32,
    phase: Phase,
    remaining_secs: u32,
    running: bool,
    alarm: Box<dyn Alarm>,
}

impl TimerEngine {
    /// Create an engine with default lengths and no audio output.
    pub fn new() -> Self {
        Self::with_alarm(Box::new(SilentAlarm))
    }

    /// Create an engine that plays `alarm` at every phase boundary.
    pub fn with_alarm(alarm: Box<dyn Alarm>) -> Self {
        Self {
            session_length: DEFAULT_SESSION_LENGTH,
            break_length: DEFAULT_BREAK_LENGTH,
            phase: Phase::Session,
            remaining_secs: DEFAULT_SESSION_LENGTH * 60,
            running: false,
            alarm,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn session_length(&self) -> u32 {
        self.session_length
    }

    pub fn break_length(&self) -> u32 {
        self.break_length
    }

    /// Configured length in minutes for `phase`.
    pub fn length(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Session => self.session_length,
            Phase::Break => self.break_length,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            remaining_seconds: self.remaining_secs,
            running: self.running,
            session_length: self.session_length,
            break_length: self.break_length,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn increase_session_length(&mut self) -> Option<Event> {
        self.adjust_length(Phase::Session, true)
    }

    pub fn decrease_session_length(&mut self) -> Option<Event> {
        self.adjust_length(Phase::Session, false)
    }

    pub fn increase_break_length(&mut self) -> Option<Event> {
        self.adjust_length(Phase::Break, true)
    }

    pub fn decrease_break_length(&mut self) -> Option<Event> {
        self.adjust_length(Phase::Break, false)
    }

    /// Flip between running and paused. Remaining time is kept as is.
    pub fn toggle_play(&mut self) -> Option<Event> {
        self.running = !self.running;
        debug!(running = self.running, phase = %self.phase, "toggled play");
        let (phase, remaining_secs, at) = (self.phase, self.remaining_secs, Utc::now());
        Some(if self.running {
            Event::Started {
                phase,
                remaining_secs,
                at,
            }
        } else {
            Event::Paused {
                phase,
                remaining_secs,
                at,
            }
        })
    }

    /// Return to the initial state and silence the alarm.
    pub fn reset(&mut self) -> Option<Event> {
        self.running = false;
        self.phase = Phase::Session;
        self.session_length = DEFAULT_SESSION_LENGTH;
        self.break_length = DEFAULT_BREAK_LENGTH;
        self.remaining_secs = DEFAULT_SESSION_LENGTH * 60;
        self.alarm.pause();
        self.alarm.rewind();
        info!("timer reset");
        Some(Event::Reset { at: Utc::now() })
    }

    /// Advance by one second. Ignored while paused.
    ///
    /// Returns `Event::PhaseChanged` on the boundary tick and `Event::Ticked`
    /// otherwise.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }

        if self.remaining_secs == 0 {
            let from = self.phase;
            self.phase = from.other();
            self.remaining_secs = self.length(self.phase) * 60;
            self.alarm.play();
            info!(from = %from, to = %self.phase, remaining_secs = self.remaining_secs, "phase changed");
            return Some(Event::PhaseChanged {
                from,
                to: self.phase,
                remaining_secs: self.remaining_secs,
                at: Utc::now(),
            });
        }

        self.remaining_secs -= 1;
        Some(Event::Ticked {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn adjust_length(&mut self, phase: Phase, grow: bool) -> Option<Event> {
        if self.running && self.phase == phase {
            debug!(phase = %phase, "length locked while its phase is running");
            return None;
        }

        let current = self.length(phase);
        let minutes = if grow {
            current.saturating_add(1).min(MAX_LENGTH)
        } else {
            current.saturating_sub(1).max(MIN_LENGTH)
        };
        match phase {
            Phase::Session => self.session_length = minutes,
            Phase::Break => self.break_length = minutes,
        }
        // The displayed countdown follows the edited length.
        self.remaining_secs = minutes * 60;

        debug!(phase = %phase, minutes, "length changed");
        Some(Event::LengthChanged {
            phase,
            minutes,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerEngine")
            .field("session_length", &self.session_length)
            .field("break_length", &self.break_length)
            .field("phase", &self.phase)
            .field("remaining_secs", &self.remaining_secs)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}
