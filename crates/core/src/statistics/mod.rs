//! Derived session statistics for the dashboard and stats screens.

use serde::{Deserialize, Serialize};

use crate::bankroll::{daily_hours, daily_profit};
use crate::sessions::{SessionFormat, SessionRow};
use crate::utils::duration_minutes;

/// Aggregate results over a set of sessions.
///
/// Durations only count completed sessions; money is integer cents except
/// for the rate/average fields, which stay fractional for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub net_result: i64,
    pub total_minutes: f64,
    pub net_hourly_rate: f64,
    pub average_net_result: f64,
    pub number_of_sessions: usize,
    pub average_duration_minutes: f64,
    pub win_ratio: f64,
}

/// Stats for the whole set plus the cash/tournament split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsByFormat {
    pub all: SessionStats,
    pub cash: SessionStats,
    pub tournament: SessionStats,
}

/// Today's headline numbers for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: String,
    pub profit: i64,
    pub hours: f64,
    pub session_count: usize,
}

/// Compute aggregate stats over `sessions`.
pub fn compute_stats(sessions: &[SessionRow]) -> SessionStats {
    let completed: Vec<&SessionRow> = sessions.iter().filter(|s| s.is_completed()).collect();
    let total_minutes: f64 = completed
        .iter()
        .map(|s| duration_minutes(&s.start_time, s.end_time.as_deref().unwrap_or_default()))
        .sum();

    let net_result: i64 = sessions.iter().map(|s| s.profit).sum();
    let number_of_sessions = sessions.len();
    let winning_sessions = sessions.iter().filter(|s| s.profit > 0).count();
    let hours = total_minutes / 60.0;

    SessionStats {
        net_result,
        total_minutes,
        net_hourly_rate: if hours > 0.0 {
            net_result as f64 / hours
        } else {
            0.0
        },
        average_net_result: if number_of_sessions > 0 {
            net_result as f64 / number_of_sessions as f64
        } else {
            0.0
        },
        number_of_sessions,
        average_duration_minutes: if completed.is_empty() {
            0.0
        } else {
            total_minutes / completed.len() as f64
        },
        win_ratio: if number_of_sessions > 0 {
            winning_sessions as f64 / number_of_sessions as f64
        } else {
            0.0
        },
    }
}

/// Aggregate stats split by session format.
pub fn compute_stats_by_format(sessions: &[SessionRow]) -> StatsByFormat {
    let cash: Vec<SessionRow> = sessions
        .iter()
        .filter(|s| s.format == SessionFormat::Cash)
        .cloned()
        .collect();
    let tournament: Vec<SessionRow> = sessions
        .iter()
        .filter(|s| s.format == SessionFormat::Tournament)
        .cloned()
        .collect();

    StatsByFormat {
        all: compute_stats(sessions),
        cash: compute_stats(&cash),
        tournament: compute_stats(&tournament),
    }
}

/// Headline numbers for one calendar date.
pub fn compute_daily_stats(sessions: &[SessionRow], date: &str) -> DailyStats {
    DailyStats {
        date: date.to_string(),
        profit: daily_profit(sessions, date),
        hours: daily_hours(sessions, date),
        session_count: sessions.iter().filter(|s| s.start_date() == date).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::GameType;

    fn session(format: SessionFormat, start: &str, end: Option<&str>, profit: i64) -> SessionRow {
        SessionRow {
            id: format!("s-{}-{}", start, profit),
            user_id: "user-1".to_string(),
            site_id: "site-1".to_string(),
            is_live: false,
            game_type: GameType::Nlh,
            format,
            stakes_text: "1/2".to_string(),
            start_time: start.to_string(),
            end_time: end.map(|e| e.to_string()),
            buy_in_total: 0,
            cash_out_total: profit,
            profit,
            notes: None,
            tournament_name: None,
            finish_position: None,
            field_size: None,
            itm: None,
            rebuys_count: 0,
            rebuy_cost: 0,
            addons_count: 0,
            addon_cost: 0,
            prize_pool: None,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn stats_over_mixed_sessions() {
        let sessions = vec![
            session(
                SessionFormat::Cash,
                "2024-01-10T10:00:00Z",
                Some("2024-01-10T12:00:00Z"),
                6000,
            ),
            session(
                SessionFormat::Cash,
                "2024-01-11T10:00:00Z",
                Some("2024-01-11T11:00:00Z"),
                -3000,
            ),
            // In progress: counts toward results, not duration.
            session(SessionFormat::Tournament, "2024-01-12T10:00:00Z", None, 1500),
        ];

        let stats = compute_stats(&sessions);

        assert_eq!(stats.net_result, 4500);
        assert_eq!(stats.number_of_sessions, 3);
        assert!((stats.total_minutes - 180.0).abs() < 1e-9);
        assert!((stats.net_hourly_rate - 1500.0).abs() < 1e-9);
        assert!((stats.average_duration_minutes - 90.0).abs() < 1e-9);
        assert!((stats.win_ratio - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_input_has_guarded_divisions() {
        let stats = compute_stats(&[]);

        assert_eq!(stats.net_result, 0);
        assert_eq!(stats.net_hourly_rate, 0.0);
        assert_eq!(stats.average_net_result, 0.0);
        assert_eq!(stats.average_duration_minutes, 0.0);
        assert_eq!(stats.win_ratio, 0.0);
    }

    #[test]
    fn hourly_rate_guarded_when_no_completed_sessions() {
        let sessions = vec![session(SessionFormat::Cash, "2024-01-10T10:00:00Z", None, 500)];

        let stats = compute_stats(&sessions);
        assert_eq!(stats.net_result, 500);
        assert_eq!(stats.net_hourly_rate, 0.0);
    }

    #[test]
    fn format_split_partitions_sessions() {
        let sessions = vec![
            session(
                SessionFormat::Cash,
                "2024-01-10T10:00:00Z",
                Some("2024-01-10T11:00:00Z"),
                1000,
            ),
            session(
                SessionFormat::Tournament,
                "2024-01-11T10:00:00Z",
                Some("2024-01-11T14:00:00Z"),
                -500,
            ),
        ];

        let split = compute_stats_by_format(&sessions);

        assert_eq!(split.all.number_of_sessions, 2);
        assert_eq!(split.cash.net_result, 1000);
        assert_eq!(split.tournament.net_result, -500);
    }

    #[test]
    fn daily_stats_roll_up_one_date() {
        let sessions = vec![
            session(
                SessionFormat::Cash,
                "2024-01-10T10:00:00Z",
                Some("2024-01-10T13:00:00Z"),
                2000,
            ),
            session(SessionFormat::Cash, "2024-01-10T20:00:00Z", None, -500),
            session(
                SessionFormat::Cash,
                "2024-01-11T10:00:00Z",
                Some("2024-01-11T11:00:00Z"),
                900,
            ),
        ];

        let daily = compute_daily_stats(&sessions, "2024-01-10");

        assert_eq!(daily.profit, 1500);
        assert_eq!(daily.session_count, 2);
        assert!((daily.hours - 3.0).abs() < 1e-9);
    }
}
