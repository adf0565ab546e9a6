use chrono::{DateTime, NaiveDate, Utc};

use super::error::{DomainError, DomainResult};

/// Parse a path id; ids are positive integers
pub fn parse_record_id(raw: &str, what: &str) -> DomainResult<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(DomainError::invalid(format!("Invalid {what} id: '{raw}'"))),
    }
}

/// Trimmed, non-empty, at most `max_len` characters
pub fn required_text(value: &str, field: &str, max_len: usize) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid(format!("{field} cannot be empty")));
    }
    if trimmed.chars().count() > max_len {
        return Err(DomainError::invalid(format!(
            "{field} cannot exceed {max_len} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Accepts RFC 3339 timestamps or plain dates (taken as midnight UTC)
pub fn parse_event_date(raw: &str) -> DomainResult<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            DomainError::invalid(format!(
                "Invalid date '{raw}': expected RFC 3339 or YYYY-MM-DD"
            ))
        })
}
