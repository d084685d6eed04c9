//! Bankroll snapshot and summary models.

use serde::{Deserialize, Serialize};

/// A point-in-time balance record for (user, site, date).
///
/// `is_manual_override = true` marks an authoritative user-entered baseline;
/// reconciliation only consults override rows. A new override for the same
/// site and date replaces the old one via upsert on (user, site, date).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankrollSnapshotRow {
    pub id: String,
    pub user_id: String,
    pub site_id: String,
    /// ISO `YYYY-MM-DD`; lexicographic order equals chronological order.
    pub date: String,
    /// Balance in cents.
    pub amount: i64,
    pub is_manual_override: bool,
    pub created_at: String,
}

/// Fields for creating or replacing an override snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankrollSnapshotInsert {
    pub user_id: String,
    pub site_id: String,
    pub date: String,
    pub amount: i64,
    pub is_manual_override: bool,
}

/// One site's reconciled balance within a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankrollSiteEntry {
    pub site_id: String,
    /// Reconciled balance in cents.
    pub amount: i64,
    /// Whether an override snapshot exists for exactly this date.
    pub is_manual_override: bool,
}

/// Reconciled balances for every active site on one date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankrollSummary {
    pub date: String,
    /// Sum of the site entries, in cents.
    pub total: i64,
    pub sites: Vec<BankrollSiteEntry>,
    /// Previous day's total, for delta display.
    pub previous_total: i64,
}

/// One point of the trailing bankroll chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankrollChartPoint {
    pub date: String,
    /// Total bankroll in cents.
    pub total: i64,
}
