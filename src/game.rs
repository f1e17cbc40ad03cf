//! The tick loop: spawn, move, collide, draw, read input, sleep.

use std::io::Write;
use std::time::{Duration, Instant};

use rand::Rng;
use tracing::info;

use crate::compute::{apply_command, init_state, tick, time_up};
use crate::config::GameConfig;
use crate::display::{self, Renderer};
use crate::entities::{EndReason, GameState, GameStatus};
use crate::input::KeySource;

/// Monotonic session time plus the blocking delay between ticks.
pub trait Clock {
    fn elapsed(&self) -> Duration;
    fn sleep(&mut self, d: Duration);
}

/// Wall-clock time measured from construction.
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn start() -> Self {
        SystemClock {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&mut self, d: Duration) {
        std::thread::sleep(d);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub score: u32,
    pub reason: EndReason,
    pub frames: u64,
}

/// Play one session to completion and return how it ended.
///
/// The screen is cleared when the session finishes; printing the final score
/// is left to the caller, after the terminal has been restored.
pub fn run_session<W, K, C, R>(
    out: &mut W,
    keys: &mut K,
    clock: &mut C,
    rng: &mut R,
    config: GameConfig,
) -> std::io::Result<SessionSummary>
where
    W: Write,
    K: KeySource,
    C: Clock,
    R: Rng,
{
    let mut renderer = Renderer::new(config.grid);
    let mut state = init_state(config);
    info!(
        width = state.config.grid.width,
        height = state.config.grid.height,
        speed_ms = state.speed_ms,
        "session started"
    );

    loop {
        if clock.elapsed() >= state.config.duration {
            state = time_up(&state);
        }
        if state.status == GameStatus::GameOver {
            break;
        }

        state = tick(&state, rng);
        renderer.render(out, &state, clock.elapsed())?;

        if let Some(command) = keys.poll_command() {
            state = apply_command(&state, command);
        }

        clock.sleep(Duration::from_millis(state.speed_ms));
    }

    display::clear(out)?;
    Ok(summarize(&state))
}

fn summarize(state: &GameState) -> SessionSummary {
    SessionSummary {
        score: state.score,
        reason: state.end_reason.unwrap_or(EndReason::TimeUp),
        frames: state.frame,
    }
}
