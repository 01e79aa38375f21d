//! Statistics over the session log and task collection.
//!
//! Every query here is a pure function of `(sessions, tasks, reference
//! date)`: no hidden state, safe to call any number of times, and total on
//! empty inputs. The analyzer carries only the daily goal and the nominal
//! focus length used for minute totals.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::session::Session;
use crate::task::Task;
use crate::timer::SessionKind;

/// One day of the weekly histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBin {
    pub date: NaiveDate,
    /// Weekday label ("Sun".."Sat").
    pub label: String,
    pub count: usize,
}

/// Seven calendar days ending on the reference date, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyHistogram {
    pub bins: Vec<DayBin>,
    /// Peak bin count clamped to >= 1, so bar charts never divide by zero.
    pub peak: usize,
}

/// Progress toward the daily focus-session goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    pub completed: usize,
    pub goal: u32,
    /// `min(completed / goal, 1.0)`.
    pub fraction: f64,
    pub remaining: u32,
}

/// Aggregate dashboard view for one reference date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub date: NaiveDate,
    pub focus_sessions_today: usize,
    pub focus_minutes_today: u64,
    pub completed_tasks: usize,
    pub streak_days: u32,
    pub goal: GoalProgress,
    pub weekly: WeeklyHistogram,
    pub distractions_today: usize,
}

/// Analyzer for session-log statistics.
#[derive(Debug, Clone)]
pub struct StatsAnalyzer {
    /// Focus sessions per day considered a met goal.
    pub daily_goal: u32,
    /// Nominal focus length in minutes; minute totals use this rather
    /// than recorded durations so interrupted sessions never count.
    pub focus_minutes_per_session: u64,
}

impl Default for StatsAnalyzer {
    fn default() -> Self {
        Self {
            daily_goal: 8,
            focus_minutes_per_session: 25,
        }
    }
}

impl StatsAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completed focus sessions recorded on `date`.
    pub fn focus_sessions_on(&self, sessions: &[Session], date: NaiveDate) -> usize {
        sessions
            .iter()
            .filter(|s| s.kind == SessionKind::Focus && s.completed && s.date == date)
            .count()
    }

    /// Nominal focus minutes for `date`.
    pub fn focus_minutes_on(&self, sessions: &[Session], date: NaiveDate) -> u64 {
        self.focus_sessions_on(sessions, date) as u64 * self.focus_minutes_per_session
    }

    pub fn completed_task_count(&self, tasks: &[Task]) -> usize {
        tasks.iter().filter(|t| t.completed).count()
    }

    /// Interrupted sessions recorded on `date`. This is the persisted
    /// distraction signal; the engine's tap counter is a separate,
    /// transient tally.
    pub fn distractions_on(&self, sessions: &[Session], date: NaiveDate) -> usize {
        sessions
            .iter()
            .filter(|s| s.interrupted && s.date == date)
            .count()
    }

    /// Completed-focus counts for the 7 calendar days ending on `today`,
    /// oldest first.
    pub fn weekly_histogram(&self, sessions: &[Session], today: NaiveDate) -> WeeklyHistogram {
        let bins: Vec<DayBin> = (0..7)
            .rev()
            .filter_map(|back| today.checked_sub_days(Days::new(back)))
            .map(|date| DayBin {
                date,
                label: date.format("%a").to_string(),
                count: self.focus_sessions_on(sessions, date),
            })
            .collect();
        let peak = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
        WeeklyHistogram { bins, peak }
    }

    /// Consecutive days ending on `today` with at least one completed
    /// focus session. The first empty day terminates the walk, so an
    /// empty `today` yields 0.
    pub fn streak(&self, sessions: &[Session], today: NaiveDate) -> u32 {
        let mut day = today;
        let mut count = 0;
        while self.focus_sessions_on(sessions, day) > 0 {
            count += 1;
            match day.pred_opt() {
                Some(prev) => day = prev,
                None => break,
            }
        }
        count
    }

    pub fn goal_progress(&self, sessions: &[Session], today: NaiveDate) -> GoalProgress {
        let completed = self.focus_sessions_on(sessions, today);
        let goal = self.daily_goal.max(1);
        GoalProgress {
            completed,
            goal,
            fraction: (completed as f64 / goal as f64).min(1.0),
            remaining: goal.saturating_sub(completed as u32),
        }
    }

    /// Full dashboard for the reference date.
    pub fn dashboard(
        &self,
        sessions: &[Session],
        tasks: &[Task],
        today: NaiveDate,
    ) -> DashboardReport {
        DashboardReport {
            date: today,
            focus_sessions_today: self.focus_sessions_on(sessions, today),
            focus_minutes_today: self.focus_minutes_on(sessions, today),
            completed_tasks: self.completed_task_count(tasks),
            streak_days: self.streak(sessions, today),
            goal: self.goal_progress(sessions, today),
            weekly: self.weekly_histogram(sessions, today),
            distractions_today: self.distractions_on(sessions, today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskTag;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn focus_on(day: NaiveDate) -> Session {
        Session::record(SessionKind::Focus, day, 1500, true, None)
    }

    fn interrupted_on(day: NaiveDate) -> Session {
        Session::record(SessionKind::Focus, day, 120, false, None)
    }

    #[test]
    fn focus_counts_exclude_breaks_and_interruptions() {
        let today = date(2026, 8, 6);
        let sessions = vec![
            focus_on(today),
            interrupted_on(today),
            Session::record(SessionKind::ShortBreak, today, 300, true, None),
            focus_on(today),
        ];
        let stats = StatsAnalyzer::new();
        assert_eq!(stats.focus_sessions_on(&sessions, today), 2);
        assert_eq!(stats.focus_minutes_on(&sessions, today), 50);
        assert_eq!(stats.distractions_on(&sessions, today), 1);
    }

    #[test]
    fn streak_stops_at_first_empty_day() {
        let today = date(2026, 8, 6);
        let sessions = vec![
            focus_on(today),
            focus_on(date(2026, 8, 5)),
            // Nothing on Aug 4.
            focus_on(date(2026, 8, 3)),
        ];
        let stats = StatsAnalyzer::new();
        assert_eq!(stats.streak(&sessions, today), 2);
    }

    #[test]
    fn streak_is_zero_when_today_is_empty() {
        let today = date(2026, 8, 6);
        let sessions = vec![focus_on(date(2026, 8, 5))];
        assert_eq!(StatsAnalyzer::new().streak(&sessions, today), 0);
        assert_eq!(StatsAnalyzer::new().streak(&[], today), 0);
    }

    #[test]
    fn empty_histogram_has_seven_zero_bins_and_safe_peak() {
        let histogram = StatsAnalyzer::new().weekly_histogram(&[], date(2026, 8, 6));
        assert_eq!(histogram.bins.len(), 7);
        assert!(histogram.bins.iter().all(|b| b.count == 0));
        assert_eq!(histogram.peak, 1);
    }

    #[test]
    fn histogram_is_oldest_first_and_ends_today() {
        let today = date(2026, 8, 6);
        let sessions = vec![focus_on(today), focus_on(today), focus_on(date(2026, 8, 1))];
        let histogram = StatsAnalyzer::new().weekly_histogram(&sessions, today);
        assert_eq!(histogram.bins[0].date, date(2026, 7, 31));
        assert_eq!(histogram.bins[6].date, today);
        assert_eq!(histogram.bins[6].count, 2);
        assert_eq!(histogram.bins[1].count, 1);
        assert_eq!(histogram.peak, 2);
        assert_eq!(histogram.bins[6].label, "Thu");
    }

    #[test]
    fn goal_progress_clamps_and_saturates() {
        let today = date(2026, 8, 6);
        let stats = StatsAnalyzer::new();

        let empty = stats.goal_progress(&[], today);
        assert_eq!(empty.fraction, 0.0);
        assert_eq!(empty.remaining, 8);

        let sessions: Vec<Session> = (0..10).map(|_| focus_on(today)).collect();
        let done = stats.goal_progress(&sessions, today);
        assert_eq!(done.completed, 10);
        assert_eq!(done.fraction, 1.0);
        assert_eq!(done.remaining, 0);
    }

    #[test]
    fn completed_task_count_counts_only_completed() {
        let mut done = Task::new("a", TaskTag::General);
        done.completed = true;
        let tasks = vec![done, Task::new("b", TaskTag::Dev)];
        assert_eq!(StatsAnalyzer::new().completed_task_count(&tasks), 1);
    }

    #[test]
    fn dashboard_is_idempotent() {
        let today = date(2026, 8, 6);
        let sessions = vec![focus_on(today), interrupted_on(today)];
        let tasks = vec![Task::new("a", TaskTag::General)];
        let stats = StatsAnalyzer::new();
        let first = stats.dashboard(&sessions, &tasks, today);
        let second = stats.dashboard(&sessions, &tasks, today);
        assert_eq!(first, second);
        assert_eq!(first.focus_sessions_today, 1);
        assert_eq!(first.distractions_today, 1);
    }
}
