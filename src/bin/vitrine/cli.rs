//! CLI flag schema so showcase startup behavior is explicit and discoverable.

use clap::Parser;

use vitrine::config::AppConfig;

use crate::theme::{ColorDepth, DisplayMode};

#[derive(Debug, Parser, Clone)]
#[command(
    name = "vitrine",
    about = "Interactive terminal showcase for the Omoro jewelry studio",
    author,
    version
)]
pub(crate) struct ShowcaseConfig {
    #[command(flatten)]
    pub(crate) app: AppConfig,

    /// Visitor name shown in the masthead greeting
    #[arg(long = "name", default_value = "Guest")]
    pub(crate) name: String,

    /// Display mode override (light, dark); defaults to the persisted preference
    #[arg(long = "theme")]
    pub(crate) theme_name: Option<String>,

    /// Disable colors in all output
    #[arg(long = "no-color", default_value_t = false)]
    pub(crate) no_color: bool,

    /// ASCII-safe glyphs for terminals without good Unicode fonts
    #[arg(long = "ascii", default_value_t = false)]
    pub(crate) ascii: bool,

    /// List display modes and exit
    #[arg(long = "list-themes", default_value_t = false)]
    pub(crate) list_themes: bool,
}

impl ShowcaseConfig {
    /// Display mode forced by `--theme`, if it names a known mode.
    #[must_use]
    pub(crate) fn mode_override(&self) -> Option<DisplayMode> {
        self.theme_name
            .as_deref()
            .and_then(DisplayMode::from_name)
    }

    #[must_use]
    pub(crate) fn color_depth(&self) -> ColorDepth {
        if self.no_color {
            ColorDepth::Plain
        } else {
            ColorDepth::True
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_interactive_and_colored() {
        let cfg = ShowcaseConfig::parse_from(["test-app"]);
        assert_eq!(cfg.name, "Guest");
        assert_eq!(cfg.theme_name, None);
        assert_eq!(cfg.mode_override(), None);
        assert_eq!(cfg.color_depth(), ColorDepth::True);
        assert!(!cfg.ascii);
        assert!(!cfg.list_themes);
    }

    #[test]
    fn theme_flag_overrides_persisted_mode() {
        let cfg = ShowcaseConfig::parse_from(["test-app", "--theme", "dark"]);
        assert_eq!(cfg.mode_override(), Some(DisplayMode::Dark));

        let cfg = ShowcaseConfig::parse_from(["test-app", "--theme", "mauve"]);
        assert_eq!(cfg.mode_override(), None);
    }

    #[test]
    fn no_color_selects_plain_depth() {
        let cfg = ShowcaseConfig::parse_from(["test-app", "--no-color"]);
        assert_eq!(cfg.color_depth(), ColorDepth::Plain);
    }

    #[test]
    fn name_flag_is_passed_through_verbatim() {
        let cfg = ShowcaseConfig::parse_from(["test-app", "--name", "  Ada  "]);
        assert_eq!(cfg.name, "  Ada  ");
    }

    #[test]
    fn app_flags_flatten_into_the_schema() {
        let cfg = ShowcaseConfig::parse_from(["test-app", "--logs", "--storage-dir", "/tmp/x"]);
        assert!(cfg.app.logs);
        assert_eq!(
            cfg.app.storage_dir.as_deref(),
            Some(std::path::Path::new("/tmp/x"))
        );
    }
}
