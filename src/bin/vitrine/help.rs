//! Help overlay that documents shortcuts directly in the terminal UI.

use crate::frame::{
    centered_title_line, display_width, frame_bottom, frame_separator, frame_top, framed_row,
    truncate_display,
};
use crate::lightbox::close_symbol;
use crate::theme::ThemeColors;

/// Keyboard shortcut definition.
pub(crate) struct Shortcut {
    pub(crate) key: &'static str,
    pub(crate) description: &'static str,
}

const PAGE_SHORTCUTS: &[Shortcut] = &[
    Shortcut {
        key: "Up/Down",
        description: "Scroll the page",
    },
    Shortcut {
        key: "PgUp/PgDn",
        description: "Scroll a screen at a time",
    },
    Shortcut {
        key: "Home",
        description: "Glide back to the top",
    },
    Shortcut {
        key: "Ctrl+T",
        description: "Toggle light/dark mode",
    },
];

const GALLERY_SHORTCUTS: &[Shortcut] = &[
    Shortcut {
        key: "1-3",
        description: "Select a product card",
    },
    Shortcut {
        key: "+/-",
        description: "Adjust the card's interest counter",
    },
    Shortcut {
        key: "Enter",
        description: "Open the selected card in the lightbox",
    },
    Shortcut {
        key: "c",
        description: "Price calculator for the selected card",
    },
    Shortcut {
        key: "h",
        description: "Highlight the selected card",
    },
    Shortcut {
        key: "a",
        description: "Start/stop the entrance shimmer",
    },
    Shortcut {
        key: "4-7",
        description: "Expand or collapse an FAQ answer",
    },
];

const FORM_SHORTCUTS: &[Shortcut] = &[
    Shortcut {
        key: "Tab",
        description: "Focus the next form field",
    },
    Shortcut {
        key: "Left/Right",
        description: "Change product / contact choice",
    },
    Shortcut {
        key: "Enter",
        description: "Activate the focused control",
    },
    Shortcut {
        key: "Ctrl+S",
        description: "Submit the order form",
    },
    Shortcut {
        key: "Esc",
        description: "Leave the form / close an overlay",
    },
    Shortcut {
        key: "q / Ctrl+Q",
        description: "Quit",
    },
];

const SHORTCUT_SECTIONS: &[(&str, &[Shortcut])] = &[
    ("Page", PAGE_SHORTCUTS),
    ("Gallery", GALLERY_SHORTCUTS),
    ("Order form", FORM_SHORTCUTS),
];

/// Width of the help frame for a terminal width.
#[must_use]
pub(crate) fn help_width_for_terminal(cols: usize) -> usize {
    cols.clamp(34, 58)
}

/// Rows the help overlay occupies.
#[must_use]
pub(crate) fn help_overlay_height() -> usize {
    let rows: usize = SHORTCUT_SECTIONS
        .iter()
        .map(|(_, shortcuts)| shortcuts.len() + 1)
        .sum();
    // top + title + separator + section rows + footer + bottom
    rows + 5
}

/// Render the help panel.
#[must_use]
pub(crate) fn format_help_overlay(colors: &ThemeColors, width: usize) -> String {
    let width = help_width_for_terminal(width);
    let close = close_symbol(colors.glyph_set);

    let mut lines = Vec::new();
    lines.push(frame_top(colors, width));
    lines.push(centered_title_line(colors, "Shortcuts", width));
    lines.push(frame_separator(colors, width));

    let body_width = width.saturating_sub(4);
    for (section, shortcuts) in SHORTCUT_SECTIONS {
        let header = format!("{}{section}{}", colors.heading, colors.reset);
        lines.push(framed_row(colors, width, &header, display_width(section)));
        for shortcut in *shortcuts {
            let key_column = format!("  {:<11}", shortcut.key);
            let plain = format!("{key_column} {}", shortcut.description);
            let clipped = truncate_display(&plain, body_width);
            let clipped_width = display_width(&clipped);
            let content = match clipped.strip_prefix(&key_column) {
                Some(rest) => format!(
                    "{}{key_column}{}{rest}",
                    colors.accent, colors.reset
                ),
                None => clipped.clone(),
            };
            lines.push(framed_row(colors, width, &content, clipped_width));
        }
    }

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
    fn help_rows_match_declared_height() {
        let panel = format_help_overlay(&THEME_PLAIN, 80);
        assert_eq!(panel.lines().count(), help_overlay_height());
    }

    #[test]
    fn help_rows_share_exact_width() {
        let panel = format_help_overlay(&THEME_PLAIN, 80);
        let width = help_width_for_terminal(80);
        for line in panel.lines() {
            assert_eq!(display_width(line), width, "line: {line:?}");
        }
    }

    #[test]
    fn help_mentions_every_section() {
        let panel = format_help_overlay(&THEME_PLAIN, 80);
        assert!(panel.contains("Shortcuts"));
        assert!(panel.contains("Page"));
        assert!(panel.contains("Gallery"));
        assert!(panel.contains("Order form"));
        assert!(panel.contains("Ctrl+T"));
    }

    #[test]
    fn width_is_clamped() {
        assert_eq!(help_width_for_terminal(20), 34);
        assert_eq!(help_width_for_terminal(300), 58);
    }
}
