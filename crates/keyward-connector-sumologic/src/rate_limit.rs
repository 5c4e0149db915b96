//! Rate-limit metadata extraction.
//!
//! Sumo Logic reports quota through response headers. Extraction never fails:
//! anything missing or malformed is simply left out, and a response without
//! any rate-limit headers yields the zero-value descriptor.
//!
//! Reset headers are delta seconds. `Retry-After` may also be an HTTP-date.

use chrono::{DateTime, TimeDelta, Utc};
use keyward_connector::annotations::{RateLimitDescription, RateLimitStatus};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::StatusCode;

const LIMIT_HEADERS: [&str; 2] = ["x-ratelimit-limit", "ratelimit-limit"];
const REMAINING_HEADERS: [&str; 2] = ["x-ratelimit-remaining", "ratelimit-remaining"];
const RESET_HEADERS: [&str; 2] = ["x-ratelimit-reset", "ratelimit-reset"];

/// Builds a descriptor from a response's status and headers.
#[must_use]
pub fn extract(status: StatusCode, headers: &HeaderMap, now: DateTime<Utc>) -> RateLimitDescription {
    let limit = first_u64(headers, &LIMIT_HEADERS);
    let remaining = first_u64(headers, &REMAINING_HEADERS);
    let reset_at = match first_u64(headers, &RESET_HEADERS) {
        Some(secs) => after_seconds(now, secs),
        None => retry_after(headers, now),
    };

    let status = if status == StatusCode::TOO_MANY_REQUESTS {
        RateLimitStatus::Overlimit
    } else if limit.is_some() || remaining.is_some() || reset_at.is_some() {
        RateLimitStatus::Ok
    } else {
        RateLimitStatus::Unspecified
    };

    RateLimitDescription {
        status,
        limit,
        remaining,
        reset_at,
    }
}

fn after_seconds(now: DateTime<Utc>, secs: u64) -> Option<DateTime<Utc>> {
    let secs = i64::try_from(secs).ok()?;
    now.checked_add_signed(TimeDelta::try_seconds(secs)?)
}

fn retry_after(headers: &HeaderMap, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();
    match value.parse::<u64>() {
        Ok(secs) => after_seconds(now, secs),
        Err(_) => DateTime::parse_from_rfc2822(value)
            .ok()
            .map(|date| date.with_timezone(&Utc)),
    }
}

fn first_u64(headers: &HeaderMap, names: &[&str]) -> Option<u64> {
    names.iter().find_map(|name| header_u64(headers, name))
}

fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}
