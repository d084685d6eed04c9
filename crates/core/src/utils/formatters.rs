//! Display formatting for money, durations, and dates.
//!
//! Money is carried as integer cents everywhere; these helpers only exist at
//! the display boundary.

use chrono::DateTime;

fn currency_symbol(currency: &str) -> Option<&'static str> {
    match currency {
        "USD" => Some("$"),
        "EUR" => Some("\u{20ac}"),
        "GBP" => Some("\u{a3}"),
        _ => None,
    }
}

/// Group an unsigned integer string with thousands separators.
fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(*b as char);
    }
    out
}

/// Format cents as a currency amount, e.g. `15000` → `$150.00`,
/// `-5000` → `-$50.00`. Unknown currency codes fall back to a code prefix
/// (`CAD 150.00`).
pub fn format_currency(cents: i64, currency: &str) -> String {
    let abs = cents.unsigned_abs();
    let whole = group_thousands(&(abs / 100).to_string());
    let fraction = abs % 100;
    let sign = if cents < 0 { "-" } else { "" };

    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{whole}.{fraction:02}"),
        None => format!("{sign}{currency} {whole}.{fraction:02}"),
    }
}

/// Format cents as a profit string with an explicit sign, e.g. `+$150.00`.
/// Zero renders without a prefix.
pub fn format_profit(cents: i64, currency: &str) -> String {
    if cents > 0 {
        format!("+{}", format_currency(cents, currency))
    } else {
        format_currency(cents, currency)
    }
}

/// Format a duration in minutes as `1h 30m` / `45m` / `2h`.
/// Negative input renders as `0m`.
pub fn format_duration(minutes: f64) -> String {
    if minutes < 0.0 {
        return "0m".to_string();
    }
    let mut hours = (minutes / 60.0).floor() as i64;
    let mut mins = (minutes % 60.0).round() as i64;
    if mins == 60 {
        hours += 1;
        mins = 0;
    }

    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Minutes between two RFC 3339 instants, clamped at zero. Unparseable
/// timestamps yield zero.
pub fn duration_minutes(start: &str, end: &str) -> f64 {
    let (Ok(start), Ok(end)) = (
        DateTime::parse_from_rfc3339(start),
        DateTime::parse_from_rfc3339(end),
    ) else {
        return 0.0;
    };

    ((end - start).num_milliseconds() as f64 / 60_000.0).max(0.0)
}

/// Short display date, e.g. `Jan 15, 2025`. Unparseable input is returned
/// unchanged.
pub fn format_date(iso: &str) -> String {
    DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| iso.to_string())
}

/// Relative display time against a caller-supplied `now`, e.g. `2h ago`.
/// Falls back to [`format_date`] past a week, and for unparseable inputs.
pub fn format_relative_time(iso: &str, now: &str) -> String {
    let (Ok(then), Ok(now)) = (
        DateTime::parse_from_rfc3339(iso),
        DateTime::parse_from_rfc3339(now),
    ) else {
        return format_date(iso);
    };

    let diff_mins = (now - then).num_minutes();
    let diff_hours = diff_mins / 60;
    let diff_days = diff_hours / 24;

    if diff_mins < 1 {
        "just now".to_string()
    } else if diff_mins < 60 {
        format!("{diff_mins}m ago")
    } else if diff_hours < 24 {
        format!("{diff_hours}h ago")
    } else if diff_days < 7 {
        format!("{diff_days}d ago")
    } else {
        format_date(iso)
    }
}

/// Convert dollars to integer cents, rounding halves away from zero.
pub fn dollars_to_cents(dollars: f64) -> i64 {
    (dollars * 100.0).round() as i64
}

/// Convert integer cents to fractional dollars.
pub fn cents_to_dollars(cents: i64) -> f64 {
    cents as f64 / 100.0
}
