//! Statistics over realistic session logs, including logs that crossed
//! a storage round-trip.

use chrono::NaiveDate;
use deepflow_core::storage::{Database, Store};
use deepflow_core::{Session, SessionKind, StatsAnalyzer, Task, TaskTag};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn focus(day: NaiveDate) -> Session {
    Session::record(SessionKind::Focus, day, 1500, true, None)
}

#[test]
fn a_weeks_worth_of_sessions_aggregates_cleanly() {
    let today = date(2026, 8, 6);
    let mut sessions = Vec::new();
    // Three sessions today, two yesterday, one each on the two days
    // before that, then a gap.
    for _ in 0..3 {
        sessions.push(focus(today));
    }
    for _ in 0..2 {
        sessions.push(focus(date(2026, 8, 5)));
    }
    sessions.push(focus(date(2026, 8, 4)));
    sessions.push(focus(date(2026, 8, 3)));
    // Noise the aggregator must ignore.
    sessions.push(Session::record(SessionKind::ShortBreak, today, 300, true, None));
    sessions.push(Session::record(SessionKind::Focus, today, 480, false, None));

    let stats = StatsAnalyzer::new();
    assert_eq!(stats.focus_sessions_on(&sessions, today), 3);
    assert_eq!(stats.focus_minutes_on(&sessions, today), 75);
    assert_eq!(stats.streak(&sessions, today), 4);
    assert_eq!(stats.distractions_on(&sessions, today), 1);

    let histogram = stats.weekly_histogram(&sessions, today);
    let counts: Vec<usize> = histogram.bins.iter().map(|b| b.count).collect();
    assert_eq!(counts, vec![0, 0, 0, 1, 1, 2, 3]);
    assert_eq!(histogram.peak, 3);

    let goal = stats.goal_progress(&sessions, today);
    assert_eq!(goal.completed, 3);
    assert_eq!(goal.remaining, 5);
    assert!((goal.fraction - 0.375).abs() < f64::EPSILON);
}

#[test]
fn streak_gap_case_from_mixed_history() {
    let today = date(2026, 8, 6);
    let sessions = vec![
        focus(today),
        focus(date(2026, 8, 5)),
        focus(date(2026, 8, 3)), // two days ago missing
    ];
    assert_eq!(StatsAnalyzer::new().streak(&sessions, today), 2);
}

#[test]
fn aggregation_is_stable_across_a_storage_roundtrip() {
    let today = date(2026, 8, 6);
    let store = Store::new(Database::open_memory().unwrap());

    let mut done = Task::new("Done already", TaskTag::Review);
    done.completed = true;
    let tasks = vec![done, Task::new("Still open", TaskTag::Dev)];
    let sessions = vec![
        focus(today),
        focus(today),
        Session::record(SessionKind::LongBreak, today, 900, true, None),
        Session::record(SessionKind::Focus, today, 60, false, Some(tasks[1].id.clone())),
    ];

    store.save_tasks(&tasks);
    store.save_sessions(&sessions);
    let reloaded_tasks = store.load_tasks();
    let reloaded_sessions = store.load_sessions();
    assert_eq!(reloaded_tasks, tasks);
    assert_eq!(reloaded_sessions, sessions);

    let stats = StatsAnalyzer::new();
    let before = stats.dashboard(&sessions, &tasks, today);
    let after = stats.dashboard(&reloaded_sessions, &reloaded_tasks, today);
    assert_eq!(before, after);
    assert_eq!(after.focus_sessions_today, 2);
    assert_eq!(after.completed_tasks, 1);
    assert_eq!(after.distractions_today, 1);
}
