//! Pricing math shared by the order form and the price calculator.

/// Fallback tax rate for jurisdictions not in the table.
pub const DEFAULT_TAX_RATE: f64 = 0.07;

/// Simplified per-jurisdiction tax rates.
const TAX_RATES: [(&str, f64); 4] = [
    ("CA", 0.0825),
    ("NY", 0.08875),
    ("TX", 0.0625),
    ("FL", 0.06),
];

/// Rate for a jurisdiction code, case-insensitive, defaulting to
/// [`DEFAULT_TAX_RATE`] for anything unrecognized.
#[must_use]
pub fn tax_rate(jurisdiction: &str) -> f64 {
    let code = jurisdiction.trim().to_ascii_uppercase();
    TAX_RATES
        .iter()
        .find(|(name, _)| *name == code)
        .map(|(_, rate)| *rate)
        .unwrap_or(DEFAULT_TAX_RATE)
}

/// Price after quantity and a fractional discount (0.1 = 10% off).
#[must_use]
pub fn subtotal(price: f64, quantity: u32, discount: f64) -> f64 {
    let gross = price * f64::from(quantity);
    gross - gross * discount
}

/// Tax owed on an amount in a jurisdiction.
#[must_use]
pub fn tax(amount: f64, jurisdiction: &str) -> f64 {
    amount * tax_rate(jurisdiction)
}

/// Two-decimal currency string with a leading dollar sign.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    format!("${amount:.2}")
}

/// A fully computed cost breakdown, produced fresh per request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBreakdown {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl PriceBreakdown {
    /// Compute subtotal, tax, and total in one pass.
    #[must_use]
    pub fn new(price: f64, quantity: u32, jurisdiction: &str, discount: f64) -> Self {
        let subtotal = subtotal(price, quantity, discount);
        let tax = tax(subtotal, jurisdiction);
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    /// One-line rendering of the full breakdown.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Subtotal: {}, Tax: {}, Total: {}",
            format_currency(self.subtotal),
            format_currency(self.tax),
            format_currency(self.total),
        )
    }
}
