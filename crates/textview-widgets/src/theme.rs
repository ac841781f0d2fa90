//! Theme palettes for widget chrome.

use textview_core::Theme;

/// Colors applied to the text surface and pattern inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Surface background.
    pub background: &'static str,
    /// Text color.
    pub foreground: &'static str,
    /// Surface border.
    pub border: &'static str,
}

/// Dark palette.
pub const DARK: Palette = Palette {
    background: "#1e1e1e",
    foreground: "#d4d4d4",
    border: "#3e3e3e",
};

/// Light palette.
pub const LIGHT: Palette = Palette {
    background: "#ffffff",
    foreground: "#000000",
    border: "#cccccc",
};

/// The palette for a theme.
pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Dark => &DARK,
        Theme::Light => &LIGHT,
    }
}
