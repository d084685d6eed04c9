//! Derived bankroll views: per-date summaries and trailing chart series.
//!
//! Like the reconciler these are pure over their inputs; the caller supplies
//! the reference date instead of the functions reading a wall clock.

use chrono::NaiveDate;

use crate::bankroll::{
    calculate_site_bankroll, calculate_total_bankroll, BankrollChartPoint, BankrollSiteEntry,
    BankrollSnapshotRow, BankrollSummary,
};
use crate::sessions::SessionRow;

/// Site ids the user has touched: any site appearing in a session or a
/// snapshot, in first-seen order.
pub fn active_site_ids(
    sessions: &[SessionRow],
    snapshots: &[BankrollSnapshotRow],
) -> Vec<String> {
    let mut site_ids: Vec<String> = Vec::new();
    for site_id in sessions
        .iter()
        .map(|s| s.site_id.as_str())
        .chain(snapshots.iter().map(|s| s.site_id.as_str()))
    {
        if !site_ids.iter().any(|known| known == site_id) {
            site_ids.push(site_id.to_string());
        }
    }
    site_ids
}

/// Calendar-aware previous day of an ISO `YYYY-MM-DD` date.
///
/// An unparseable date is returned unchanged rather than failing.
pub fn previous_date(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.pred_opt())
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| date.to_string())
}

/// Reconciled balances for every active site on `date`, with the previous
/// day's total for delta display.
///
/// Sites with a zero balance and no override for the date are omitted from
/// the entries; the previous-day total still ranges over every active site.
pub fn bankroll_summary(
    date: &str,
    sessions: &[SessionRow],
    snapshots: &[BankrollSnapshotRow],
) -> BankrollSummary {
    let site_ids = active_site_ids(sessions, snapshots);

    let sites: Vec<BankrollSiteEntry> = site_ids
        .iter()
        .map(|site_id| {
            let amount = calculate_site_bankroll(site_id, date, sessions, snapshots);
            let is_manual_override = snapshots
                .iter()
                .any(|s| s.site_id == *site_id && s.date == date && s.is_manual_override);
            BankrollSiteEntry {
                site_id: site_id.clone(),
                amount,
                is_manual_override,
            }
        })
        .filter(|entry| entry.amount != 0 || entry.is_manual_override)
        .collect();

    let total = sites.iter().map(|entry| entry.amount).sum();
    let previous_total =
        calculate_total_bankroll(&site_ids, &previous_date(date), sessions, snapshots);

    BankrollSummary {
        date: date.to_string(),
        total,
        sites,
        previous_total,
    }
}

/// Trailing chart series: one total per day for the `days`-day window ending
/// at `end_date` (inclusive). An unparseable `end_date` yields an empty
/// series.
pub fn chart_points(
    end_date: &str,
    days: u32,
    sessions: &[SessionRow],
    snapshots: &[BankrollSnapshotRow],
) -> Vec<BankrollChartPoint> {
    let Ok(end) = NaiveDate::parse_from_str(end_date, "%Y-%m-%d") else {
        return Vec::new();
    };
    let site_ids = active_site_ids(sessions, snapshots);

    (0..days)
        .rev()
        .filter_map(|offset| end.checked_sub_days(chrono::Days::new(u64::from(offset))))
        .map(|day| {
            let date = day.format("%Y-%m-%d").to_string();
            let total = calculate_total_bankroll(&site_ids, &date, sessions, snapshots);
            BankrollChartPoint { date, total }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::{GameType, SessionFormat};

    fn session(site_id: &str, start_time: &str, profit: i64) -> SessionRow {
        SessionRow {
            id: format!("s-{}-{}", site_id, start_time),
            user_id: "user-1".to_string(),
            site_id: site_id.to_string(),
            is_live: false,
            game_type: GameType::Nlh,
            format: SessionFormat::Cash,
            stakes_text: "1/2".to_string(),
            start_time: start_time.to_string(),
            end_time: None,
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

    fn override_snapshot(site_id: &str, date: &str, amount: i64) -> BankrollSnapshotRow {
        BankrollSnapshotRow {
            id: format!("snap-{}-{}", site_id, date),
            user_id: "user-1".to_string(),
            site_id: site_id.to_string(),
            date: date.to_string(),
            amount,
            is_manual_override: true,
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn previous_date_handles_month_and_year_boundaries() {
        assert_eq!(previous_date("2024-03-01"), "2024-02-29");
        assert_eq!(previous_date("2024-01-01"), "2023-12-31");
        assert_eq!(previous_date("not-a-date"), "not-a-date");
    }

    #[test]
    fn summary_includes_touched_sites_and_previous_total() {
        let sessions = vec![
            session("site-a", "2024-01-09T10:00:00Z", 500),
            session("site-a", "2024-01-10T10:00:00Z", 250),
        ];
        let snapshots = vec![override_snapshot("site-b", "2024-01-05", 10_000)];

        let summary = bankroll_summary("2024-01-10", &sessions, &snapshots);

        assert_eq!(summary.total, 750 + 10_000);
        assert_eq!(summary.sites.len(), 2);
        // Previous day drops the 2024-01-10 session only.
        assert_eq!(summary.previous_total, 500 + 10_000);
    }

    #[test]
    fn summary_omits_zero_sites_without_override() {
        let sessions = vec![
            session("site-a", "2024-01-09T10:00:00Z", 500),
            session("site-a", "2024-01-10T10:00:00Z", -500),
            session("site-b", "2024-01-10T10:00:00Z", 100),
        ];

        let summary = bankroll_summary("2024-01-10", &sessions, &[]);

        assert_eq!(summary.sites.len(), 1);
        assert_eq!(summary.sites[0].site_id, "site-b");
    }

    #[test]
    fn summary_keeps_zero_site_with_same_day_override() {
        let snapshots = vec![override_snapshot("site-a", "2024-01-10", 0)];

        let summary = bankroll_summary("2024-01-10", &[], &snapshots);

        assert_eq!(summary.sites.len(), 1);
        assert!(summary.sites[0].is_manual_override);
    }

    #[test]
    fn chart_points_cover_trailing_window_in_order() {
        let sessions = vec![session("site-a", "2024-01-09T10:00:00Z", 500)];

        let points = chart_points("2024-01-10", 3, &sessions, &[]);

        let dates: Vec<&str> = points.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-08", "2024-01-09", "2024-01-10"]);
        assert_eq!(
            points.iter().map(|p| p.total).collect::<Vec<_>>(),
            vec![0, 500, 500]
        );
    }

    #[test]
    fn chart_points_empty_for_bad_end_date() {
        assert!(chart_points("garbage", 5, &[], &[]).is_empty());
    }
}
