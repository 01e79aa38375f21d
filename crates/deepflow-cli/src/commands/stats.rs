use chrono::Local;
use clap::Subcommand;
use deepflow_core::storage::{Config, Store};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's focus summary
    Today,
    /// Weekly focus histogram
    Week,
    /// Consecutive-day focus streak
    Streak,
    /// Daily goal progress
    Goal,
    /// Full dashboard report
    Dashboard,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let store = Store::open();
    let sessions = store.load_sessions();
    let tasks = store.load_tasks();
    let stats = config.analyzer();
    let today = Local::now().date_naive();

    match action {
        StatsAction::Today => {
            let report = stats.dashboard(&sessions, &tasks, today);
            let summary = serde_json::json!({
                "date": report.date,
                "focus_sessions": report.focus_sessions_today,
                "focus_minutes": report.focus_minutes_today,
                "completed_tasks": report.completed_tasks,
                "distractions": report.distractions_today,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        StatsAction::Week => {
            let histogram = stats.weekly_histogram(&sessions, today);
            println!("{}", serde_json::to_string_pretty(&histogram)?);
        }
        StatsAction::Streak => {
            println!("{}", stats.streak(&sessions, today));
        }
        StatsAction::Goal => {
            let goal = stats.goal_progress(&sessions, today);
            println!("{}", serde_json::to_string_pretty(&goal)?);
        }
        StatsAction::Dashboard => {
            let report = stats.dashboard(&sessions, &tasks, today);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
