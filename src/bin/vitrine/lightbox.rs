//! Product lightbox: an enlarged framed view over the page.

use vitrine::catalog::{product, ProductKey};
use vitrine::pricing::format_currency;

use crate::frame::{
    centered_title_line, display_width, frame_bottom, frame_separator, frame_top, framed_row,
    truncate_display,
};
use crate::theme::{GlyphSet, ThemeColors};

/// Open/closed lightbox state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Lightbox {
    showing: Option<ProductKey>,
}

impl Lightbox {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Show a product. Opening over an already open lightbox replaces it.
    pub(crate) fn open(&mut self, key: ProductKey) {
        self.showing = Some(key);
    }

    pub(crate) fn close(&mut self) {
        self.showing = None;
    }

    #[must_use]
    pub(crate) fn showing(&self) -> Option<ProductKey> {
        self.showing
    }

    #[must_use]
    pub(crate) fn is_open(&self) -> bool {
        self.showing.is_some()
    }
}

/// Close glyph shown in the overlay footer.
#[must_use]
pub(crate) fn close_symbol(glyphs: GlyphSet) -> char {
    match glyphs {
        GlyphSet::Unicode => '×',
        GlyphSet::Ascii => 'x',
    }
}

/// Width of the lightbox frame for a terminal width.
#[must_use]
pub(crate) fn lightbox_width_for_terminal(cols: usize) -> usize {
    cols.clamp(24, 56)
}

/// Rows the lightbox occupies for a product.
#[must_use]
pub(crate) fn lightbox_height(key: ProductKey) -> usize {
    // top + title + separator + art rows + blank + blurb + price + footer + bottom
    product(key).art.len() + 8
}

/// Render the lightbox panel for a product.
#[must_use]
pub(crate) fn format_lightbox(key: ProductKey, colors: &ThemeColors, width: usize) -> String {
    let width = lightbox_width_for_terminal(width);
    let entry = product(key);
    let close = close_symbol(colors.glyph_set);

    let mut lines = Vec::new();
    lines.push(frame_top(colors, width));
    lines.push(centered_title_line(colors, entry.name, width));
    lines.push(frame_separator(colors, width));

    let body_width = width.saturating_sub(4);
    for row in entry.art {
        let art_width = display_width(row);
        let left = body_width.saturating_sub(art_width) / 2;
        let content = format!(
            "{}{}{row}{}",
            " ".repeat(left),
            colors.accent,
            colors.reset
        );
        lines.push(framed_row(colors, width, &content, left + art_width));
    }

    lines.push(framed_row(colors, width, "", 0));
    let clipped_blurb = truncate_display(entry.blurb, body_width);
    let blurb = format!("{}{clipped_blurb}{}", colors.dim, colors.reset);
    lines.push(framed_row(colors, width, &blurb, display_width(&clipped_blurb)));
    let price = format_currency(entry.price);
    let price_line = format!("{}{}{}", colors.highlight, price, colors.reset);
    lines.push(framed_row(colors, width, &price_line, display_width(&price)));

    lines.push(centered_title_line(
        colors,
        &format!("[{close}] close"),
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
    fn lightbox_starts_closed() {
        let lightbox = Lightbox::new();
        assert!(!lightbox.is_open());
        assert_eq!(lightbox.showing(), None);
    }

    #[test]
    fn open_then_close() {
        let mut lightbox = Lightbox::new();
        lightbox.open(ProductKey::Necklace);
        assert!(lightbox.is_open());
        assert_eq!(lightbox.showing(), Some(ProductKey::Necklace));

        lightbox.close();
        assert!(!lightbox.is_open());
    }

    #[test]
    fn reopening_replaces_the_shown_product() {
        let mut lightbox = Lightbox::new();
        lightbox.open(ProductKey::Ring);
        lightbox.open(ProductKey::Earrings);
        assert_eq!(lightbox.showing(), Some(ProductKey::Earrings));
    }

    #[test]
    fn format_lightbox_rows_match_declared_height() {
        for key in ProductKey::ALL {
            let panel = format_lightbox(key, &THEME_PLAIN, 80);
            assert_eq!(panel.lines().count(), lightbox_height(key));
        }
    }

    #[test]
    fn format_lightbox_rows_share_exact_width() {
        let panel = format_lightbox(ProductKey::Ring, &THEME_PLAIN, 80);
        let width = lightbox_width_for_terminal(80);
        for line in panel.lines() {
            assert_eq!(display_width(line), width, "line: {line:?}");
        }
    }

    #[test]
    fn format_lightbox_mentions_name_price_and_close() {
        let panel = format_lightbox(ProductKey::Earrings, &THEME_PLAIN, 80);
        assert!(panel.contains("Diamond Earrings"));
        assert!(panel.contains("$1200.00"));
        assert!(panel.contains("[x] close"));
    }

    #[test]
    fn width_is_clamped_for_narrow_terminals() {
        assert_eq!(lightbox_width_for_terminal(10), 24);
        assert_eq!(lightbox_width_for_terminal(200), 56);
    }
}
