//! Input validation for the session and hand entry forms.
//!
//! Byte-level checks, no regex. These gate what the UI submits; the service
//! schema is the real authority.

use chrono::DateTime;

/// Minimal email shape: `local@domain.tld`, no whitespace, single `@`,
/// non-empty segments around the last dot of the domain.
pub fn is_valid_email(email: &str) -> bool {
    if email.bytes().any(|b| b.is_ascii_whitespace()) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((head, tail)) => !head.is_empty() && !tail.is_empty(),
        None => false,
    }
}

/// Minimum password strength: at least 8 characters.
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= 8
}

/// Stakes are free text ("1/2", "2/5", "$55 MTT"); anything non-blank goes.
pub fn is_valid_stakes(stakes: &str) -> bool {
    !stakes.trim().is_empty()
}

/// One card: rank `A K Q J T 2-9` followed by suit `s h d c`, e.g. `Ah`.
pub fn is_valid_card(card: &str) -> bool {
    let bytes = card.as_bytes();
    if bytes.len() != 2 {
        return false;
    }
    let rank_ok = matches!(bytes[0], b'A' | b'K' | b'Q' | b'J' | b'T' | b'2'..=b'9');
    let suit_ok = matches!(bytes[1], b's' | b'h' | b'd' | b'c');
    rank_ok && suit_ok
}

/// Hero hole cards: two or more concatenated cards, whitespace tolerated,
/// e.g. `AhKs` or `Ah Ks Qd Jc` for Omaha variants.
pub fn is_valid_hero_hand(hand: &str) -> bool {
    let cleaned: String = hand.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.len() < 4 || cleaned.len() % 2 != 0 {
        return false;
    }
    cleaned
        .as_bytes()
        .chunks(2)
        .all(|pair| is_valid_card(std::str::from_utf8(pair).unwrap_or_default()))
}

/// Community cards: empty, or exactly 3, 4, or 5 space-separated cards.
pub fn is_valid_board(board: &str) -> bool {
    let trimmed = board.trim();
    if trimmed.is_empty() {
        return true;
    }
    let cards: Vec<&str> = trimmed.split_ascii_whitespace().collect();
    matches!(cards.len(), 3..=5) && cards.iter().all(|card| is_valid_card(card))
}

/// Buy-ins and cash-outs must be strictly positive cents.
pub fn is_positive_amount(amount: i64) -> bool {
    amount > 0
}

/// End time must be strictly after start time. Compares parsed instants
/// when both timestamps are RFC 3339; falls back to lexical ordering when
/// one or both are not.
pub fn is_end_after_start(start: &str, end: &str) -> bool {
    let start_parsed = DateTime::parse_from_rfc3339(start);
    let end_parsed = DateTime::parse_from_rfc3339(end);

    if let (Ok(start), Ok(end)) = (start_parsed, end_parsed) {
        return end > start;
    }
    end > start
}
