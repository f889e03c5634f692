//! Audible notification backends.
//!
//! The engine plays the alarm once at every phase boundary and pauses and
//! rewinds it on reset. Backends never report failure: a host without audio
//! output simply hears nothing.

use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::debug;

/// Playback capability injected into [`crate::TimerEngine`].
pub trait Alarm: Send {
    /// Start playback. Fire-and-forget.
    fn play(&mut self);
    fn pause(&mut self);
    /// Move the playback position back to the start.
    fn rewind(&mut self);
}

/// Alarm for environments without audio output.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAlarm;

impl Alarm for SilentAlarm {
    fn play(&mut self) {}
    fn pause(&mut self) {}
    fn rewind(&mut self) {}
}

/// Rings the terminal bell (ASCII BEL) on the wrapped writer.
#[derive(Debug)]
pub struct TerminalBell<W = io::Stdout> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Alarm for TerminalBell<W> {
    fn play(&mut self) {
        let rung = self.out.write_all(b"\x07").and_then(|()| self.out.flush());
        if let Err(e) = rung {
            debug!("terminal bell unavailable: {e}");
        }
    }

    // A bell has no playback position.
    fn pause(&mut self) {}
    fn rewind(&mut self) {}
}

/// Call counts observed by a [`RecordingAlarm`].
#[derive(Debug, Default)]
pub struct AlarmCounts {
    plays: AtomicUsize,
    pauses: AtomicUsize,
    rewinds: AtomicUsize,
}

impl AlarmCounts {
    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }

    pub fn pauses(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }

    pub fn rewinds(&self) -> usize {
        self.rewinds.load(Ordering::SeqCst)
    }
}

/// Alarm that only counts calls.
///
/// The counters are shared, so the caller can keep a handle after moving the
/// alarm into an engine:
///
/// ```
/// use pomoclock_core::{RecordingAlarm, TimerEngine};
///
/// let alarm = RecordingAlarm::default();
/// let counts = alarm.counts();
/// let mut engine = TimerEngine::with_alarm(Box::new(alarm));
/// engine.reset();
/// assert_eq!(counts.pauses(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingAlarm {
    counts: Arc<AlarmCounts>,
}

impl RecordingAlarm {
    pub fn counts(&self) -> Arc<AlarmCounts> {
        Arc::clone(&self.counts)
    }
}

impl Alarm for RecordingAlarm {
    fn play(&mut self) {
        self.counts.plays.fetch_add(1, Ordering::SeqCst);
    }

    fn pause(&mut self) {
        self.counts.pauses.fetch_add(1, Ordering::SeqCst);
    }

    fn rewind(&mut self) {
        self.counts.rewinds.fetch_add(1, Ordering::SeqCst);
    }
}
