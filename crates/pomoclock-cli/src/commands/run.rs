use std::time::Duration;

use clap::Args;
use pomoclock_core::{Alarm, Clock, Config, Event, SilentAlarm, Snapshot, TerminalBell, TimerEngine};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info};

const HELP: &str = "commands: s+ s- (session length)  b+ b- (break length)  \
p or enter (play/pause)  r (reset)  q (quit)  ? (help)";

#[derive(Args)]
pub struct RunArgs {
    /// Tick period in milliseconds (defaults to clock.tick_interval_ms)
    #[arg(long)]
    pub tick_ms: Option<u64>,
    /// Do not ring the terminal bell at phase changes
    #[arg(long)]
    pub silent: bool,
}

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intent {
    IncreaseSession,
    DecreaseSession,
    IncreaseBreak,
    DecreaseBreak,
    TogglePlay,
    Reset,
    Help,
    Quit,
}

impl Intent {
    fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "s+" => Some(Intent::IncreaseSession),
            "s-" => Some(Intent::DecreaseSession),
            "b+" => Some(Intent::IncreaseBreak),
            "b-" => Some(Intent::DecreaseBreak),
            "" | "p" => Some(Intent::TogglePlay),
            "r" => Some(Intent::Reset),
            "?" | "h" => Some(Intent::Help),
            "q" => Some(Intent::Quit),
            _ => None,
        }
    }

    fn is_length_edit(self) -> bool {
        matches!(
            self,
            Intent::IncreaseSession
                | Intent::DecreaseSession
                | Intent::IncreaseBreak
                | Intent::DecreaseBreak
        )
    }
}

pub fn run(args: RunArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let period = args
        .tick_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.tick_period());
    let alarm: Box<dyn Alarm> = if args.silent || !config.alarm.enabled {
        Box::new(SilentAlarm)
    } else {
        Box::new(TerminalBell::stdout())
    };

    let clock = Clock::with_period(TimerEngine::with_alarm(alarm), period);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(drive(clock))
}

async fn drive(mut clock: Clock) -> Result<(), Box<dyn std::error::Error>> {
    let mut events = clock.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    info!(period_ms = clock.period().as_millis() as u64, "clock ready");
    println!("{HELP}");
    println!("{}", render(&clock.snapshot()));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("stdin closed");
                    break;
                };
                let Some(intent) = Intent::parse(&line) else {
                    eprintln!("unknown command: {} (type ? for help)", line.trim());
                    continue;
                };
                if intent == Intent::Quit {
                    break;
                }
                match apply(&mut clock, intent) {
                    Some(_) => println!("{}", render(&clock.snapshot())),
                    None if intent.is_length_edit() => {
                        eprintln!("{} length is locked while it counts down", clock.snapshot().phase);
                    }
                    None => {}
                }
            }
            // Intents render above; only ticks arrive here unprompted.
            event = events.recv() => match event {
                Ok(Event::Ticked { .. } | Event::PhaseChanged { .. }) => {
                    println!("{}", render(&clock.snapshot()));
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "display lagged behind events"),
                Err(RecvError::Closed) => break,
            },
        }
    }

    Ok(())
}

fn apply(clock: &mut Clock, intent: Intent) -> Option<Event> {
    match intent {
        Intent::IncreaseSession => clock.increase_session_length(),
        Intent::DecreaseSession => clock.decrease_session_length(),
        Intent::IncreaseBreak => clock.increase_break_length(),
        Intent::DecreaseBreak => clock.decrease_break_length(),
        Intent::TogglePlay => clock.toggle_play(),
        Intent::Reset => clock.reset(),
        Intent::Help => {
            println!("{HELP}");
            None
        }
        Intent::Quit => None,
    }
}

fn render(snapshot: &Snapshot) -> String {
    format!(
        "{} {} [{}] session={} break={}",
        snapshot.phase,
        snapshot.clock(),
        if snapshot.running { "running" } else { "paused" },
        snapshot.session_length,
        snapshot.break_length,
    )
}
