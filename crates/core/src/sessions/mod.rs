//! Played-session domain models.

use serde::{Deserialize, Serialize};

/// Cash game vs tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionFormat {
    Cash,
    Tournament,
}

/// Poker variant played during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameType {
    #[serde(rename = "NLH")]
    Nlh,
    #[serde(rename = "PLO")]
    Plo,
    #[serde(rename = "PLO5")]
    Plo5,
    #[serde(rename = "NLO")]
    Nlo,
    #[serde(rename = "LHE")]
    Lhe,
    #[serde(rename = "mixed")]
    Mixed,
    #[serde(rename = "other")]
    Other,
}

/// One played poker session.
///
/// All money fields are integer cents. `profit` is a generated column on the
/// service side (`cash_out_total - buy_in_total`) and is trusted as-is; the
/// core never recomputes it. A null `end_time` marks an in-progress session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRow {
    pub id: String,
    pub user_id: String,
    pub site_id: String,
    pub is_live: bool,
    pub game_type: GameType,
    pub format: SessionFormat,
    pub stakes_text: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub buy_in_total: i64,
    pub cash_out_total: i64,
    pub profit: i64,
    pub notes: Option<String>,
    pub tournament_name: Option<String>,
    pub finish_position: Option<i32>,
    pub field_size: Option<i32>,
    pub itm: Option<bool>,
    #[serde(default)]
    pub rebuys_count: i32,
    #[serde(default)]
    pub rebuy_cost: i64,
    #[serde(default)]
    pub addons_count: i32,
    #[serde(default)]
    pub addon_cost: i64,
    pub prize_pool: Option<i64>,
    pub created_at: String,
}

impl SessionRow {
    /// Date portion (`YYYY-MM-DD`) of the session's start time.
    ///
    /// Timestamps are ISO 8601 strings, so the first ten characters are the
    /// calendar date and compare chronologically as plain strings.
    pub fn start_date(&self) -> &str {
        date_part(&self.start_time)
    }

    /// Whether the session has finished.
    pub fn is_completed(&self) -> bool {
        self.end_time.is_some()
    }
}

/// Date portion (`YYYY-MM-DD`) of an ISO 8601 timestamp string.
///
/// Shorter inputs are returned whole; malformed dates are garbage-in
/// garbage-out by design, never an error.
pub fn date_part(timestamp: &str) -> &str {
    if timestamp.len() >= 10 {
        &timestamp[..10]
    } else {
        timestamp
    }
}
