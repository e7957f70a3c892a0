//! Pure field predicates for the order form.
//!
//! Each predicate maps a field's current value to a validity boolean and
//! nothing else; rendering of error messages and markers belongs to the
//! form surface in the binary.

use std::sync::OnceLock;

use regex::Regex;

use crate::catalog::ProductKey;

/// Smallest accepted order quantity.
pub const QUANTITY_MIN: i64 = 1;
/// Largest accepted order quantity.
pub const QUANTITY_MAX: i64 = 10;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles")
    })
}

fn phone_regex() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"^[+0-9\- ]{7,15}$").expect("phone pattern compiles"))
}

/// Name: at least two characters after trimming.
#[must_use]
pub fn validate_name(value: &str) -> bool {
    value.trim().chars().count() >= 2
}

/// Email: `local@domain.tld` with non-space parts and a dot in the domain.
#[must_use]
pub fn validate_email(value: &str) -> bool {
    email_regex().is_match(value.trim())
}

/// Phone: 7 to 15 characters drawn from digits, `+`, `-`, and spaces.
#[must_use]
pub fn validate_phone(value: &str) -> bool {
    phone_regex().is_match(value.trim())
}

/// Product: some selection has been made.
#[must_use]
pub fn validate_product(selection: Option<ProductKey>) -> bool {
    selection.is_some()
}

/// Quantity: the raw field parses as an integer in `[1, 10]`.
/// Non-numeric input (including empty) is invalid.
#[must_use]
pub fn validate_quantity(value: &str) -> bool {
    value
        .trim()
        .parse::<i64>()
        .map(|quantity| (QUANTITY_MIN..=QUANTITY_MAX).contains(&quantity))
        .unwrap_or(false)
}
