//! Integration tests for the countdown state machine.

use pomoclock_core::{format_clock, Event, Phase, RecordingAlarm, TimerEngine};
use proptest::prelude::*;

#[test]
fn test_full_session_then_break_cycle() {
    let alarm = RecordingAlarm::default();
    let counts = alarm.counts();
    let mut engine = TimerEngine::with_alarm(Box::new(alarm));

    assert!(matches!(engine.toggle_play(), Some(Event::Started { .. })));

    // 1500 ticks drain the session to 00:00, which stays visible for a tick.
    for _ in 0..1500 {
        engine.tick();
    }
    assert_eq!(engine.phase(), Phase::Session);
    assert_eq!(engine.remaining_seconds(), 0);
    assert_eq!(format_clock(engine.remaining_seconds()), "00:00");
    assert_eq!(counts.plays(), 0);

    // The boundary tick flips without decrementing.
    engine.tick();
    assert_eq!(engine.phase(), Phase::Break);
    assert_eq!(engine.remaining_seconds(), 300);
    assert_eq!(counts.plays(), 1);

    // Break drains and hands back to the session length.
    for _ in 0..301 {
        engine.tick();
    }
    assert_eq!(engine.phase(), Phase::Session);
    assert_eq!(engine.remaining_seconds(), 1500);
    assert_eq!(counts.plays(), 2);
}

#[test]
fn test_session_edit_during_break_resyncs_display() {
    let mut engine = TimerEngine::new();
    for _ in 0..25 {
        engine.decrease_session_length();
    }
    engine.toggle_play();
    engine.tick();
    assert_eq!(engine.phase(), Phase::Break);

    let event = engine.increase_session_length();
    assert!(event.is_some());
    assert_eq!(engine.session_length(), 1);
    assert_eq!(engine.remaining_seconds(), 60);

    // Break length belongs to the running phase and is locked.
    assert!(engine.increase_break_length().is_none());
    assert_eq!(engine.break_length(), 5);
}

#[test]
fn test_paused_engine_accepts_edits_to_both_lengths() {
    let mut engine = TimerEngine::new();
    engine.toggle_play();
    engine.tick();
    engine.toggle_play();

    engine.increase_session_length();
    assert_eq!(engine.session_length(), 26);
    assert_eq!(engine.remaining_seconds(), 26 * 60);

    engine.decrease_break_length();
    assert_eq!(engine.break_length(), 4);
    assert_eq!(engine.remaining_seconds(), 4 * 60);
}

fn arb_intent() -> impl Strategy<Value = u8> {
    0u8..7
}

fn apply(engine: &mut TimerEngine, intent: u8) {
    let _ = match intent {
        0 => engine.increase_session_length(),
        1 => engine.decrease_session_length(),
        2 => engine.increase_break_length(),
        3 => engine.decrease_break_length(),
        4 => engine.toggle_play(),
        _ => engine.tick(),
    };
}

proptest! {
    #[test]
    fn ticks_decrease_remaining_by_exactly_n(n in 0u32..1500) {
        let mut engine = TimerEngine::new();
        engine.toggle_play();
        for _ in 0..n {
            engine.tick();
        }
        prop_assert_eq!(engine.remaining_seconds(), 1500 - n);
        prop_assert_eq!(engine.phase(), Phase::Session);
    }

    #[test]
    fn state_invariants_hold_for_any_intent_sequence(
        intents in proptest::collection::vec(arb_intent(), 0..400)
    ) {
        let mut engine = TimerEngine::new();
        for intent in intents {
            apply(&mut engine, intent);
            let snap = engine.snapshot();
            prop_assert!(snap.session_length <= 60);
            prop_assert!(snap.break_length <= 60);
            let ceiling = snap.session_length.max(snap.break_length) * 60;
            prop_assert!(snap.remaining_seconds <= ceiling);
        }
    }

    #[test]
    fn locked_session_edits_are_noops(ticks in 0u32..100, grow in any::<bool>()) {
        let mut engine = TimerEngine::new();
        engine.toggle_play();
        for _ in 0..ticks {
            engine.tick();
        }
        let before = engine.snapshot();
        let event = if grow {
            engine.increase_session_length()
        } else {
            engine.decrease_session_length()
        };
        prop_assert!(event.is_none());
        prop_assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn reset_always_restores_defaults(
        intents in proptest::collection::vec(arb_intent(), 0..200)
    ) {
        let mut engine = TimerEngine::new();
        for intent in intents {
            apply(&mut engine, intent);
        }
        engine.reset();
        let snap = engine.snapshot();
        prop_assert_eq!(snap.phase, Phase::Session);
        prop_assert!(!snap.running);
        prop_assert_eq!(snap.session_length, 25);
        prop_assert_eq!(snap.break_length, 5);
        prop_assert_eq!(snap.remaining_seconds, 1500);
    }
}
