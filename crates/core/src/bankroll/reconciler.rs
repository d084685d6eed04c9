//! Point-in-time bankroll reconciliation.
//!
//! No running balance is stored anywhere. A site's balance on a date is
//! derived from the most recent manual override snapshot at-or-before that
//! date (the anchor) plus the sum of session profits strictly after the
//! anchor date, up to and including the target date. All dates are ISO
//! `YYYY-MM-DD` strings compared lexicographically; malformed dates are
//! garbage-in garbage-out, never an error.

use crate::bankroll::BankrollSnapshotRow;
use crate::sessions::{date_part, SessionRow};

/// Anchor date used when no override snapshot exists.
const EPOCH_DATE: &str = "1970-01-01";

/// Reconcile one site's balance (in cents) as of `target_date`.
///
/// A session starting on the anchor date itself is excluded: a same-day
/// override already bakes that day's results into the baseline. A session
/// starting on `target_date` is included, so reconciling "as of today"
/// counts today's sessions.
pub fn calculate_site_bankroll(
    site_id: &str,
    target_date: &str,
    sessions: &[SessionRow],
    snapshots: &[BankrollSnapshotRow],
) -> i64 {
    let anchor = snapshots
        .iter()
        .filter(|s| s.site_id == site_id && s.is_manual_override && s.date.as_str() <= target_date)
        .max_by(|a, b| a.date.cmp(&b.date));

    let base_amount = anchor.map(|s| s.amount).unwrap_or(0);
    let since_date = anchor.map(|s| s.date.as_str()).unwrap_or(EPOCH_DATE);

    let profit_since: i64 = sessions
        .iter()
        .filter(|s| {
            let start_date = s.start_date();
            s.site_id == site_id && start_date > since_date && start_date <= target_date
        })
        .map(|s| s.profit)
        .sum();

    base_amount + profit_since
}

/// Total bankroll across the given sites: the plain sum of per-site
/// reconciliations, with no cross-site interaction.
pub fn calculate_total_bankroll(
    site_ids: &[String],
    target_date: &str,
    sessions: &[SessionRow],
    snapshots: &[BankrollSnapshotRow],
) -> i64 {
    site_ids
        .iter()
        .map(|site_id| calculate_site_bankroll(site_id, target_date, sessions, snapshots))
        .sum()
}

/// Sum of profits (cents) for sessions starting exactly on `date`.
pub fn daily_profit(sessions: &[SessionRow], date: &str) -> i64 {
    sessions
        .iter()
        .filter(|s| s.start_date() == date)
        .map(|s| s.profit)
        .sum()
}

/// Hours played on `date`, summed over completed sessions only.
///
/// In-progress sessions (no end time) contribute zero, as do sessions whose
/// timestamps fail to parse.
pub fn daily_hours(sessions: &[SessionRow], date: &str) -> f64 {
    sessions
        .iter()
        .filter(|s| s.start_date() == date)
        .filter_map(|s| {
            let end = s.end_time.as_deref()?;
            let start = chrono::DateTime::parse_from_rfc3339(&s.start_time).ok()?;
            let end = chrono::DateTime::parse_from_rfc3339(end).ok()?;
            Some((end - start).num_milliseconds() as f64 / 3_600_000.0)
        })
        .sum()
}
