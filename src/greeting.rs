//! Masthead greeting derived from the visitor name and the local clock.

use time::OffsetDateTime;

/// Hour-of-day salutation: morning before 12, afternoon before 18,
/// evening otherwise.
#[must_use]
pub fn salutation(hour: u8) -> &'static str {
    if hour < 12 {
        "Good morning"
    } else if hour < 18 {
        "Good afternoon"
    } else {
        "Good evening"
    }
}

/// The personalized masthead line.
#[must_use]
pub fn greeting_line(name: &str, hour: u8) -> String {
    format!(
        "{}, {}! Welcome to our jewelry showcase.",
        salutation(hour),
        name
    )
}

/// Normalize the visitor name, falling back to "Guest".
#[must_use]
pub fn visitor_name(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => "Guest".to_string(),
    }
}

/// Current hour of day, preferring local time and falling back to UTC
/// when the platform exposes no offset.
#[must_use]
pub fn current_hour() -> u8 {
    OffsetDateTime::now_local()
        .unwrap_or_else(|_| OffsetDateTime::now_utc())
        .hour()
}
