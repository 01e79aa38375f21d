//! Attended timer session in the foreground.
//!
//! A single `select!` loop serializes the 1 Hz tick, stdin commands, and
//! Ctrl-C: exactly one of them is applied to the app state at a time. The
//! tick source is dropped and re-armed on every transition into the
//! running state, so a tick armed for an earlier mode can never fire
//! against a later one.

use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, Interval, MissedTickBehavior};

use deepflow_core::storage::{Config, Store};
use deepflow_core::{App, Event, SessionKind};

use crate::cue::TerminalBell;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run an attended timer session in the foreground
    Run {
        /// Starting mode: focus, short-break, or long-break
        #[arg(long, value_parser = parse_mode)]
        mode: Option<SessionKind>,
        /// Task credited when a focus session completes
        #[arg(long)]
        task: Option<String>,
        /// Exit after the first completed session
        #[arg(long)]
        once: bool,
    },
}

fn parse_mode(s: &str) -> Result<SessionKind, String> {
    match s {
        "focus" => Ok(SessionKind::Focus),
        "short-break" => Ok(SessionKind::ShortBreak),
        "long-break" => Ok(SessionKind::LongBreak),
        other => Err(format!(
            "unknown mode '{other}' (expected focus, short-break, or long-break)"
        )),
    }
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run { mode, task, once } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(run_attended(mode, task, once))
        }
    }
}

async fn run_attended(
    mode: Option<SessionKind>,
    task: Option<String>,
    once: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut app = App::new(&config, Store::open())
        .with_cue(Box::new(TerminalBell::new(config.notifications.enabled)));

    if let Some(target) = mode {
        app.switch_mode(target);
    }
    if let Some(id) = task.as_deref() {
        if !app.select_task(Some(id)) {
            return Err(format!("Task not found: {id}").into());
        }
    }

    println!("p pause/resume · s skip · r reset · d log distraction · f/b/l switch mode · q quit");
    if let Some(current) = app.current_task() {
        println!("working on: {}", current.title);
    }

    app.start();
    let mut ticker = arm_ticker();
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    render(&app);
    loop {
        tokio::select! {
            _ = ticker.tick(), if app.engine().is_running() => {
                if let Some(event @ Event::TimerCompleted { .. }) = app.tick() {
                    println!();
                    println!("{}", serde_json::to_string_pretty(&event)?);
                    if once || !stdin_open {
                        break;
                    }
                }
                render(&app);
            }
            line = stdin.next_line(), if stdin_open => {
                match line {
                    Ok(Some(input)) => {
                        let was_running = app.engine().is_running();
                        if !apply_command(&mut app, input.trim()) {
                            break;
                        }
                        if app.engine().is_running() && !was_running {
                            ticker = arm_ticker();
                        }
                        render(&app);
                    }
                    // Stdin is gone: finish the running session, then stop.
                    Ok(None) | Err(_) => {
                        stdin_open = false;
                        if !app.engine().is_running() {
                            break;
                        }
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                app.reset();
                break;
            }
        }
    }

    println!();
    println!("{}", serde_json::to_string_pretty(&app.snapshot())?);
    Ok(())
}

/// Apply one line command. Returns false when the loop should end.
fn apply_command(app: &mut App, input: &str) -> bool {
    match input {
        "p" => {
            app.toggle_timer();
        }
        "s" => {
            app.skip();
        }
        "r" => {
            app.reset();
        }
        "d" => {
            if let Some(Event::DistractionLogged { count, .. }) = app.log_distraction() {
                println!("\ndistractions this run: {count}");
            }
        }
        "f" => {
            app.switch_mode(SessionKind::Focus);
        }
        "b" => {
            app.switch_mode(SessionKind::ShortBreak);
        }
        "l" => {
            app.switch_mode(SessionKind::LongBreak);
        }
        "q" => {
            app.reset();
            return false;
        }
        "" => {}
        other => eprintln!("\nunknown command: {other}"),
    }
    true
}

fn arm_ticker() -> Interval {
    let mut interval = tokio::time::interval_at(
        Instant::now() + Duration::from_secs(1),
        Duration::from_secs(1),
    );
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

fn render(app: &App) {
    let engine = app.engine();
    let dots: String = (0..4u32)
        .map(|i| if i < engine.cadence_dots() { '●' } else { '○' })
        .collect();
    let state = if engine.is_running() { "running" } else { "paused" };
    print!(
        "\r{} {:<11} [{state:<7}] {dots}   ",
        format_clock(engine.time_left_secs()),
        engine.mode().label(),
    );
    let _ = std::io::stdout().flush();
}

fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
