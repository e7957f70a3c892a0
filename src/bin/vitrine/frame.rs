//! Shared framed-panel helpers so cards and overlays stay visually consistent.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::ThemeColors;

#[must_use]
pub(crate) fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Clip text to a display width, never splitting a wide glyph.
#[must_use]
pub(crate) fn truncate_display(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}

/// Clip and right-pad to an exact display width.
#[must_use]
pub(crate) fn fit_display(text: &str, width: usize) -> String {
    let clipped = truncate_display(text, width);
    let padding = width.saturating_sub(display_width(&clipped));
    format!("{clipped}{}", " ".repeat(padding))
}

#[must_use]
pub(crate) fn frame_top(colors: &ThemeColors, width: usize) -> String {
    let borders = &colors.borders;
    let inner: String = std::iter::repeat(borders.horizontal)
        .take(width.saturating_sub(2))
        .collect();
    format!(
        "{}{}{}{}{}",
        colors.border, borders.top_left, inner, borders.top_right, colors.reset
    )
}

#[must_use]
pub(crate) fn frame_bottom(colors: &ThemeColors, width: usize) -> String {
    let borders = &colors.borders;
    let inner: String = std::iter::repeat(borders.horizontal)
        .take(width.saturating_sub(2))
        .collect();
    format!(
        "{}{}{}{}{}",
        colors.border, borders.bottom_left, inner, borders.bottom_right, colors.reset
    )
}

#[must_use]
pub(crate) fn frame_separator(colors: &ThemeColors, width: usize) -> String {
    let borders = &colors.borders;
    let inner: String = std::iter::repeat(borders.horizontal)
        .take(width.saturating_sub(2))
        .collect();
    format!(
        "{}{}{}{}{}",
        colors.border, borders.t_left, inner, borders.t_right, colors.reset
    )
}

/// One framed content row. `content` may carry its own color codes;
/// `content_width` is its visible width.
#[must_use]
pub(crate) fn framed_row(
    colors: &ThemeColors,
    width: usize,
    content: &str,
    content_width: usize,
) -> String {
    let borders = &colors.borders;
    let body_width = width.saturating_sub(4);
    let padding = body_width.saturating_sub(content_width);
    format!(
        "{}{}{} {content}{} {}{}{}",
        colors.border,
        borders.vertical,
        colors.reset,
        " ".repeat(padding),
        colors.border,
        borders.vertical,
        colors.reset,
    )
}

/// A framed row whose plain-text content is centered.
#[must_use]
pub(crate) fn centered_title_line(colors: &ThemeColors, title: &str, width: usize) -> String {
    let borders = &colors.borders;
    let inner_width = width.saturating_sub(2);
    let clipped = truncate_display(title, inner_width);
    let padding = inner_width.saturating_sub(display_width(&clipped));
    let left = padding / 2;
    let right = padding - left;
    format!(
        "{}{}{}{}{}{}{}{}{}",
        colors.border,
        borders.vertical,
        colors.reset,
        " ".repeat(left),
        clipped,
        " ".repeat(right),
        colors.border,
        borders.vertical,
        colors.reset
    )
}
