//! Display modes and color palettes so rendering code references semantic
//! colors, not raw escapes.

use vitrine::storage::{KeyValueStore, THEME_KEY};

/// Border character set for framed panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BorderSet {
    pub(crate) horizontal: char,
    pub(crate) vertical: char,
    pub(crate) top_left: char,
    pub(crate) top_right: char,
    pub(crate) bottom_left: char,
    pub(crate) bottom_right: char,
    pub(crate) t_left: char,
    pub(crate) t_right: char,
}

pub(crate) const BORDER_ROUNDED: BorderSet = BorderSet {
    horizontal: '─',
    vertical: '│',
    top_left: '╭',
    top_right: '╮',
    bottom_left: '╰',
    bottom_right: '╯',
    t_left: '├',
    t_right: '┤',
};

pub(crate) const BORDER_SINGLE: BorderSet = BorderSet {
    horizontal: '─',
    vertical: '│',
    top_left: '┌',
    top_right: '┐',
    bottom_left: '└',
    bottom_right: '┘',
    t_left: '├',
    t_right: '┤',
};

pub(crate) const BORDER_ASCII: BorderSet = BorderSet {
    horizontal: '-',
    vertical: '|',
    top_left: '+',
    top_right: '+',
    bottom_left: '+',
    bottom_right: '+',
    t_left: '+',
    t_right: '+',
};

/// Glyph family selection for icon rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum GlyphSet {
    #[default]
    Unicode,
    Ascii,
}

/// How much color the terminal gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum ColorDepth {
    #[default]
    True,
    Plain,
}

/// The page's display mode. This is the persisted preference; palettes
/// derive from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum DisplayMode {
    #[default]
    Light,
    Dark,
}

impl DisplayMode {
    /// Parse a mode from its persisted or CLI name.
    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// Name written to storage and shown in `--list-themes`.
    #[must_use]
    pub(crate) fn storage_name(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Flip to the other mode.
    #[must_use]
    pub(crate) fn toggled(&self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Masthead button label: names the mode the button switches *to*.
    #[must_use]
    pub(crate) fn toggle_label(&self, glyphs: GlyphSet) -> &'static str {
        match (self, glyphs) {
            (Self::Light, GlyphSet::Unicode) => "☾ Dark mode",
            (Self::Dark, GlyphSet::Unicode) => "☀ Light mode",
            (Self::Light, GlyphSet::Ascii) => "Dark mode",
            (Self::Dark, GlyphSet::Ascii) => "Light mode",
        }
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.storage_name())
    }
}

/// Read the persisted display mode. Anything but `"dark"` (including a
/// missing or unreadable record) is the Light default.
pub(crate) fn load_display_mode(store: &dyn KeyValueStore) -> DisplayMode {
    match store.get(THEME_KEY).as_deref() {
        Some("dark") => DisplayMode::Dark,
        _ => DisplayMode::Light,
    }
}

/// Persist the display mode under the `theme` key.
pub(crate) fn persist_display_mode(store: &mut dyn KeyValueStore, mode: DisplayMode) {
    store.set(THEME_KEY, mode.storage_name());
}

/// ANSI color tokens for one display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ThemeColors {
    /// Masthead and section headings
    pub(crate) heading: &'static str,
    /// Primary accent (buttons, counters)
    pub(crate) accent: &'static str,
    /// Success states (form acknowledgment, valid markers)
    pub(crate) success: &'static str,
    /// Error states (invalid markers, field messages)
    pub(crate) error: &'static str,
    /// Dim/muted text for secondary copy
    pub(crate) dim: &'static str,
    /// Border/frame color
    pub(crate) border: &'static str,
    /// Transient highlight (counter flash, card highlight)
    pub(crate) highlight: &'static str,
    /// Reset code
    pub(crate) reset: &'static str,
    /// Border character set
    pub(crate) borders: BorderSet,
    /// Icon glyph profile
    pub(crate) glyph_set: GlyphSet,
}

/// Light mode - warm neutrals on the terminal's default background.
pub(crate) const THEME_LIGHT: ThemeColors = ThemeColors {
    heading: "\x1b[38;2;121;58;21m",   // Umber #793a15
    accent: "\x1b[38;2;51;102;153m",   // Steel blue #336699
    success: "\x1b[38;2;46;125;50m",   // Green #2e7d32
    error: "\x1b[38;2;183;28;28m",     // Red #b71c1c
    dim: "\x1b[38;2;110;104;98m",      // Warm gray #6e6862
    border: "\x1b[38;2;158;134;110m",  // Sand #9e866e
    highlight: "\x1b[38;2;191;114;0m", // Amber #bf7200
    reset: "\x1b[0m",
    borders: BORDER_ROUNDED,
    glyph_set: GlyphSet::Unicode,
};

/// Dark mode - the same page under lamplight.
pub(crate) const THEME_DARK: ThemeColors = ThemeColors {
    heading: "\x1b[38;2;240;200;130m",   // Candle gold #f0c882
    accent: "\x1b[38;2;124;178;232m",    // Sky #7cb2e8
    success: "\x1b[38;2;129;199;132m",   // Green #81c784
    error: "\x1b[38;2;239;120;120m",     // Red #ef7878
    dim: "\x1b[38;2;140;140;148m",       // Slate #8c8c94
    border: "\x1b[38;2;112;98;128m",     // Dusk #706280
    highlight: "\x1b[38;2;255;213;100m", // Amber #ffd564
    reset: "\x1b[0m",
    borders: BORDER_SINGLE,
    glyph_set: GlyphSet::Unicode,
};

/// No colors - plain text output.
pub(crate) const THEME_PLAIN: ThemeColors = ThemeColors {
    heading: "",
    accent: "",
    success: "",
    error: "",
    dim: "",
    border: "",
    highlight: "",
    reset: "",
    borders: BORDER_ASCII,
    glyph_set: GlyphSet::Ascii,
};

/// Resolve the palette for a mode, honoring `--no-color` and `--ascii`.
#[must_use]
pub(crate) fn resolve_colors(mode: DisplayMode, depth: ColorDepth, ascii: bool) -> ThemeColors {
    let mut colors = match (mode, depth) {
        (_, ColorDepth::Plain) => THEME_PLAIN,
        (DisplayMode::Light, ColorDepth::True) => THEME_LIGHT,
        (DisplayMode::Dark, ColorDepth::True) => THEME_DARK,
    };
    if ascii {
        colors.glyph_set = GlyphSet::Ascii;
        colors.borders = BORDER_ASCII;
    }
    colors
}
