use crate::color::Color;
use crate::config::types::Theme;

/// Detected terminal background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Dark,
    Light,
}

impl Background {
    /// Detect whether the terminal has a dark or light background.
    ///
    /// Heuristic: check `COLORFGBG` (format "fg;bg"), fall back to dark.
    pub fn detect() -> Self {
        if let Ok(val) = std::env::var("COLORFGBG")
            && let Some(bg) = val.rsplit(';').next()
            && let Ok(n) = bg.parse::<u8>()
        {
            // ANSI colors 0-6 and 8 are typically dark backgrounds.
            if n > 6 && n != 8 {
                return Background::Light;
            }
        }
        Background::Dark
    }
}

/// A fully resolved theme: every color slot used by the UI has a concrete
/// `Color` value, from user config or from the defaults for the detected
/// background.
#[derive(Debug, Clone)]
pub struct ResolvedTheme {
    // Text
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_faint: Color,
    pub text_warning: Color,
    pub text_success: Color,
    pub text_error: Color,
    pub text_actor: Color,
    // Background
    pub bg_selected: Color,
    // Border
    pub border_primary: Color,
    pub border_secondary: Color,
    pub border_faint: Color,
    // Search bar
    pub search_prompt: Color,
    pub search_highlight: Color,
}

impl ResolvedTheme {
    /// Build a resolved theme from user config and detected background.
    pub fn resolve(theme: &Theme, bg: Background) -> Self {
        let d = Defaults::for_background(bg);
        let c = &theme.colors;

        Self {
            text_primary: c.text.primary.unwrap_or(d.text_primary),
            text_secondary: c.text.secondary.unwrap_or(d.text_secondary),
            text_faint: c.text.faint.unwrap_or(d.text_faint),
            text_warning: c.text.warning.unwrap_or(d.text_warning),
            text_success: c.text.success.unwrap_or(d.text_success),
            text_error: c.text.error.unwrap_or(d.text_error),
            text_actor: c.text.actor.unwrap_or(d.text_actor),
            bg_selected: c.background.selected.unwrap_or(d.bg_selected),
            border_primary: c.border.primary.unwrap_or(d.border_primary),
            border_secondary: c.border.secondary.unwrap_or(d.border_secondary),
            border_faint: c.border.faint.unwrap_or(d.border_faint),
            search_prompt: c.search.prompt.unwrap_or(d.search_prompt),
            search_highlight: c.search.highlight.unwrap_or(d.search_highlight),
        }
    }

    /// Hardcoded fallback for contexts with no config at all.
    pub fn fallback() -> Self {
        Self::resolve(&Theme::default(), Background::Dark)
    }
}

/// Default color values for a given terminal background.
struct Defaults {
    text_primary: Color,
    text_secondary: Color,
    text_faint: Color,
    text_warning: Color,
    text_success: Color,
    text_error: Color,
    text_actor: Color,
    bg_selected: Color,
    border_primary: Color,
    border_secondary: Color,
    border_faint: Color,
    search_prompt: Color,
    search_highlight: Color,
}

impl Defaults {
    fn for_background(bg: Background) -> Self {
        let a = Color::Ansi256;
        match bg {
            Background::Dark => Self {
                text_primary: a(7),
                text_secondary: a(245),
                text_faint: a(243),
                text_warning: a(11),
                text_success: a(10),
                text_error: a(1),
                text_actor: a(6),
                bg_selected: a(237),
                border_primary: a(244),
                border_secondary: a(243),
                border_faint: a(241),
                search_prompt: a(14),    // cyan
                search_highlight: a(12), // bright blue
            },
            Background::Light => Self {
                text_primary: a(0),
                text_secondary: a(240),
                text_faint: a(248),
                text_warning: a(3),
                text_success: a(2),
                text_error: a(1),
                text_actor: a(4),
                bg_selected: a(254),
                border_primary: a(240),
                border_secondary: a(248),
                border_faint: a(252),
                search_prompt: a(6),
                search_highlight: a(4),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_uses_defaults_when_unset() {
        let theme = ResolvedTheme::resolve(&Theme::default(), Background::Dark);
        assert_eq!(theme.text_primary, Color::Ansi256(7));
        assert_eq!(theme.search_prompt, Color::Ansi256(14));
    }

    #[test]
    fn resolve_prefers_configured_slots() {
        let mut cfg = Theme::default();
        cfg.colors.search.prompt = Some(Color::Rgb {
            r: 0xff,
            g: 0x00,
            b: 0xaa,
        });
        cfg.colors.text.primary = Some(Color::Ansi256(123));
        let theme = ResolvedTheme::resolve(&cfg, Background::Dark);
        assert_eq!(theme.text_primary, Color::Ansi256(123));
        assert_eq!(
            theme.search_prompt,
            Color::Rgb {
                r: 0xff,
                g: 0x00,
                b: 0xaa
            }
        );
        // Untouched slots still fall back.
        assert_eq!(theme.text_faint, Color::Ansi256(243));
    }

    #[test]
    fn light_background_flips_text_defaults() {
        let theme = ResolvedTheme::resolve(&Theme::default(), Background::Light);
        assert_eq!(theme.text_primary, Color::Ansi256(0));
    }
}
