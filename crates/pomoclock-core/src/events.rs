use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change in the engine produces an Event.
/// The presentation layer polls snapshots or subscribes to these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A session or break length was edited.
    LengthChanged {
        phase: Phase,
        minutes: u32,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    Started {
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    Paused {
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// One second elapsed inside the current phase.
    Ticked {
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    /// The countdown hit zero and the other phase began.
    PhaseChanged {
        from: Phase,
        to: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    Reset {
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Remaining seconds carried by the event, if it carries any.
    pub fn remaining_secs(&self) -> Option<u32> {
        match self {
            Event::LengthChanged { remaining_secs, .. }
            | Event::Started { remaining_secs, .. }
            | Event::Paused { remaining_secs, .. }
            | Event::Ticked { remaining_secs, .. }
            | Event::PhaseChanged { remaining_secs, .. } => Some(*remaining_secs),
            Event::Reset { .. } => None,
        }
    }

    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::LengthChanged { at, .. }
            | Event::Started { at, .. }
            | Event::Paused { at, .. }
            | Event::Ticked { at, .. }
            | Event::PhaseChanged { at, .. }
            | Event::Reset { at } => *at,
        }
    }
}
