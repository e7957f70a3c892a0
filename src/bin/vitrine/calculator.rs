//! Price-calculator overlay: quantity and jurisdiction in, breakdown out.
//!
//! This is the deliberately lenient path: inputs are not validated, a
//! quantity that fails to parse silently becomes 1, and a blank
//! jurisdiction becomes CA.

use vitrine::catalog::{product, ProductKey};
use vitrine::pricing::{format_currency, PriceBreakdown};

use crate::frame::{
    centered_title_line, display_width, frame_bottom, frame_separator, frame_top, framed_row,
};
use crate::lightbox::close_symbol;
use crate::theme::ThemeColors;

/// Quantity used when the input does not parse.
pub(crate) const FALLBACK_QUANTITY: u32 = 1;
/// Jurisdiction used when the input is blank.
pub(crate) const FALLBACK_JURISDICTION: &str = "CA";

/// Which calculator input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum CalcField {
    #[default]
    Quantity,
    Jurisdiction,
}

/// Calculator overlay state for one product.
#[derive(Debug, Clone)]
pub(crate) struct Calculator {
    pub(crate) key: ProductKey,
    pub(crate) quantity_input: String,
    pub(crate) jurisdiction_input: String,
    pub(crate) focus: CalcField,
}

impl Calculator {
    /// Open for a product with the original defaults prefilled.
    pub(crate) fn open(key: ProductKey) -> Self {
        Self {
            key,
            quantity_input: "1".to_string(),
            jurisdiction_input: "CA".to_string(),
            focus: CalcField::Quantity,
        }
    }

    fn focused_input_mut(&mut self) -> &mut String {
        match self.focus {
            CalcField::Quantity => &mut self.quantity_input,
            CalcField::Jurisdiction => &mut self.jurisdiction_input,
        }
    }

    pub(crate) fn insert_char(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        let input = self.focused_input_mut();
        if input.chars().count() < 8 {
            input.push(ch);
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.focused_input_mut().pop();
    }

    pub(crate) fn focus_next(&mut self) {
        self.focus = match self.focus {
            CalcField::Quantity => CalcField::Jurisdiction,
            CalcField::Jurisdiction => CalcField::Quantity,
        };
    }

    /// Resolve the lenient quantity: parse or fall back to 1.
    #[must_use]
    pub(crate) fn resolved_quantity(&self) -> u32 {
        self.quantity_input
            .trim()
            .parse::<u32>()
            .unwrap_or(FALLBACK_QUANTITY)
    }

    /// Resolve the jurisdiction: trimmed input or CA when blank.
    #[must_use]
    pub(crate) fn resolved_jurisdiction(&self) -> String {
        let trimmed = self.jurisdiction_input.trim();
        if trimmed.is_empty() {
            FALLBACK_JURISDICTION.to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Compute the breakdown for the current inputs.
    #[must_use]
    pub(crate) fn breakdown(&self) -> PriceBreakdown {
        PriceBreakdown::new(
            product(self.key).price,
            self.resolved_quantity(),
            &self.resolved_jurisdiction(),
            0.0,
        )
    }
}

/// Width of the calculator frame for a terminal width.
#[must_use]
pub(crate) fn calculator_width_for_terminal(cols: usize) -> usize {
    cols.clamp(30, 52)
}

/// Rows the calculator occupies.
#[must_use]
pub(crate) fn calculator_height() -> usize {
    // top + title + separator + 2 inputs + separator + 3 breakdown rows
    // + footer + bottom
    11
}

fn input_row(
    colors: &ThemeColors,
    width: usize,
    label: &str,
    value: &str,
    focused: bool,
) -> String {
    let marker = if focused { ">" } else { " " };
    let cursor = if focused { "_" } else { "" };
    let plain = format!("{marker} {label}: {value}{cursor}");
    let content = if focused {
        format!(
            "{}{marker}{} {label}: {}{value}{cursor}{}",
            colors.accent, colors.reset, colors.highlight, colors.reset
        )
    } else {
        plain.clone()
    };
    framed_row(colors, width, &content, display_width(&plain))
}

/// Render the calculator panel.
#[must_use]
pub(crate) fn format_calculator(calc: &Calculator, colors: &ThemeColors, width: usize) -> String {
    let width = calculator_width_for_terminal(width);
    let entry = product(calc.key);
    let close = close_symbol(colors.glyph_set);
    let breakdown = calc.breakdown();

    let mut lines = Vec::new();
    lines.push(frame_top(colors, width));
    lines.push(centered_title_line(
        colors,
        &format!("{} - {}", entry.name, format_currency(entry.price)),
        width,
    ));
    lines.push(frame_separator(colors, width));
    lines.push(input_row(
        colors,
        width,
        "Quantity",
        &calc.quantity_input,
        calc.focus == CalcField::Quantity,
    ));
    lines.push(input_row(
        colors,
        width,
        "State",
        &calc.jurisdiction_input,
        calc.focus == CalcField::Jurisdiction,
    ));
    lines.push(frame_separator(colors, width));
    for (label, amount) in [
        ("Subtotal", breakdown.subtotal),
        ("Tax", breakdown.tax),
        ("Total", breakdown.total),
    ] {
        let rendered = format_currency(amount);
        let plain = format!("{label}: {rendered}");
        let content = format!("{label}: {}{rendered}{}", colors.highlight, colors.reset);
        lines.push(framed_row(colors, width, &content, display_width(&plain)));
    }
    lines.push(centered_title_line(
        colors,
        &format!("[Tab] switch field  [{close}] close"),
        width,
    ));
    lines.push(frame_bottom(colors, width));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::THEME_PLAIN;

    #[test]
    fn opens_with_original_defaults() {
        let calc = Calculator::open(ProductKey::Ring);
        assert_eq!(calc.quantity_input, "1");
        assert_eq!(calc.jurisdiction_input, "CA");
        assert_eq!(calc.focus, CalcField::Quantity);
    }

    #[test]
    fn unparseable_quantity_falls_back_to_one() {
        let mut calc = Calculator::open(ProductKey::Ring);
        calc.quantity_input = "many".to_string();
        assert_eq!(calc.resolved_quantity(), 1);

        calc.quantity_input = String::new();
        assert_eq!(calc.resolved_quantity(), 1);

        calc.quantity_input = " 3 ".to_string();
        assert_eq!(calc.resolved_quantity(), 3);
    }

    #[test]
    fn blank_jurisdiction_falls_back_to_ca() {
        let mut calc = Calculator::open(ProductKey::Ring);
        calc.jurisdiction_input = "  ".to_string();
        assert_eq!(calc.resolved_jurisdiction(), "CA");

        calc.jurisdiction_input = "ny".to_string();
        assert_eq!(calc.resolved_jurisdiction(), "ny");
    }

    #[test]
    fn breakdown_uses_catalog_price() {
        let mut calc = Calculator::open(ProductKey::Ring);
        calc.quantity_input = "2".to_string();
        let breakdown = calc.breakdown();
        assert!((breakdown.subtotal - 1000.0).abs() < 1e-9);
        assert!((breakdown.tax - 82.5).abs() < 1e-9);
    }

    #[test]
    fn unknown_jurisdiction_uses_default_rate() {
        let mut calc = Calculator::open(ProductKey::Ring);
        calc.jurisdiction_input = "ZZ".to_string();
        let breakdown = calc.breakdown();
        assert!((breakdown.tax - 35.0).abs() < 1e-9);
    }

    #[test]
    fn typing_targets_the_focused_input() {
        let mut calc = Calculator::open(ProductKey::Necklace);
        calc.backspace();
        calc.insert_char('4');
        assert_eq!(calc.quantity_input, "4");

        calc.focus_next();
        calc.backspace();
        calc.backspace();
        calc.insert_char('T');
        calc.insert_char('X');
        assert_eq!(calc.jurisdiction_input, "TX");

        calc.focus_next();
        assert_eq!(calc.focus, CalcField::Quantity);
    }

    #[test]
    fn input_length_is_capped() {
        let mut calc = Calculator::open(ProductKey::Ring);
        for _ in 0..20 {
            calc.insert_char('9');
        }
        assert_eq!(calc.quantity_input.chars().count(), 8);
    }

    #[test]
    fn format_calculator_rows_match_declared_height_and_width() {
        let calc = Calculator::open(ProductKey::Earrings);
        let panel = format_calculator(&calc, &THEME_PLAIN, 80);
        assert_eq!(panel.lines().count(), calculator_height());
        let width = calculator_width_for_terminal(80);
        for line in panel.lines() {
            assert_eq!(display_width(line), width, "line: {line:?}");
        }
    }

    #[test]
    fn format_calculator_shows_breakdown_labels() {
        let calc = Calculator::open(ProductKey::Ring);
        let panel = format_calculator(&calc, &THEME_PLAIN, 80);
        assert!(panel.contains("Subtotal: $500.00"));
        assert!(panel.contains("Tax: $41.25"));
        assert!(panel.contains("Total: $541.25"));
    }
}
