mod engine;
mod format;
mod phase;

pub use engine::{
    Snapshot, TimerEngine, DEFAULT_BREAK_LENGTH, DEFAULT_SESSION_LENGTH, MAX_LENGTH, MIN_LENGTH,
};
pub use format::format_clock;
pub use phase::Phase;
