//! # Pomoclock Core Library
//!
//! This library provides the core logic for the Pomoclock session/break
//! countdown. The terminal binary in `pomoclock-cli` is a thin presentation
//! layer over the same types.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A tick-driven state machine. It owns no thread or timer;
//!   the caller delivers one `tick()` per elapsed second while running
//! - **Clock**: The single tick driver a host owns. It guarantees at most one
//!   scheduled ticker per engine
//! - **Alarm**: Capability invoked at phase boundaries and on reset
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core countdown state machine
//! - [`Clock`]: Tokio-backed tick driver
//! - [`Alarm`]: Trait for audible notification backends
//! - [`Config`]: Application configuration management

pub mod alarm;
pub mod clock;
pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use alarm::{Alarm, AlarmCounts, RecordingAlarm, SilentAlarm, TerminalBell};
pub use clock::Clock;
pub use error::{ConfigError, CoreError};
pub use events::Event;
pub use storage::Config;
pub use timer::{format_clock, Phase, Snapshot, TimerEngine};
