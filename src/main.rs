use std::fs::File;
use std::io::{stdout, BufWriter};
use std::sync::{mpsc, Mutex};
use std::thread;

use anyhow::{Context, Result};
use crossterm::{cursor, event, terminal, ExecutableCommand};
use rand::thread_rng;
use tracing_subscriber::EnvFilter;

use lane_runner::config::GameConfig;
use lane_runner::game::{run_session, SystemClock};

const LOG_FILE: &str = "lane_runner.log";

/// The game owns the terminal, so logs go to a file and only when
/// `RUST_LOG` asks for them.
fn init_logging() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }
    let file = File::create(LOG_FILE).with_context(|| format!("creating {LOG_FILE}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, mut rx) = mpsc::channel();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let mut clock = SystemClock::start();
    let result = run_session(
        &mut out,
        &mut rx,
        &mut clock,
        &mut thread_rng(),
        GameConfig::default(),
    );

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let summary = result.context("running game session")?;
    tracing::info!(score = summary.score, reason = ?summary.reason, "exiting");
    println!("Game Over! Final Score: {}", summary.score);
    Ok(())
}
