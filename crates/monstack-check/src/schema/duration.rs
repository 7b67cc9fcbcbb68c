//! Prometheus duration syntax: `[0-9]+(ms|s|m|h|d|w|y)`, concatenated in
//! descending unit order (`1h30m`, `90s`, `500ms`). A bare `0` is allowed.

use std::time::Duration;

use monstack_core::error::{MonstackError, Result};

// Ordered from largest to smallest; `ms` precedes `m` so it matches first.
const UNITS: [(&str, u64); 7] = [
    ("y", 365 * 24 * 3600 * 1000),
    ("w", 7 * 24 * 3600 * 1000),
    ("d", 24 * 3600 * 1000),
    ("h", 3600 * 1000),
    ("ms", 1),
    ("m", 60 * 1000),
    ("s", 1000),
];

// Rank for ordering checks (larger unit, lower rank).
fn rank(unit: &str) -> usize {
    match unit {
        "y" => 0,
        "w" => 1,
        "d" => 2,
        "h" => 3,
        "m" => 4,
        "s" => 5,
        _ => 6,
    }
}

pub fn parse_duration(s: &str) -> Result<Duration> {
    let invalid = || MonstackError::BadRequest(format!("invalid duration: {s:?}"));

    let s = s.trim();
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(invalid());
    }

    let mut rest = s;
    let mut total_ms: u64 = 0;
    let mut last_rank: Option<usize> = None;

    while !rest.is_empty() {
        let digits_end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if digits_end == 0 {
            return Err(invalid());
        }
        let (digits, after) = rest.split_at(digits_end);
        let n: u64 = digits.parse().map_err(|_| invalid())?;

        let (unit, factor) = UNITS
            .iter()
            .find(|(u, _)| after.starts_with(u))
            .copied()
            .ok_or_else(invalid)?;

        let r = rank(unit);
        if last_rank.is_some_and(|prev| r <= prev) {
            return Err(invalid());
        }
        last_rank = Some(r);

        total_ms = n
            .checked_mul(factor)
            .and_then(|v| total_ms.checked_add(v))
            .ok_or_else(invalid)?;
        rest = after.get(unit.len()..).unwrap_or_default();
    }

    Ok(Duration::from_millis(total_ms))
}
