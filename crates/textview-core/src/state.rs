//! Viewer state model.
//!
//! [`ViewerState`] is the single persisted/working state of one viewer
//! instance. Every field is written by value on serialize and restored by
//! value on configure; the displayed projection is *derived* from this state
//! (see [`pipeline`](crate::pipeline)) and is never stored here.
//!
//! # Invariants
//!
//! - `original_text` is the canonical source. It is set only by explicit
//!   "set text" operations and never mutated by a view transform.
//! - `pretty_text` caches the pretty-printed projection of `original_text`.
//!   It is invalidated (cleared) whenever `original_text` changes. It may be
//!   non-empty while `pretty_mode` is off: the cache survives toggling so a
//!   later re-enable does not re-parse.
//! - Exactly one of `original_text` / `pretty_text` is the active source,
//!   selected by `pretty_mode` (see [`ViewerState::active_source`]).
//! - `font_size` stays within [`FONT_SIZE_MIN`]..=[`FONT_SIZE_MAX`];
//!   out-of-range writes are rejected, not clamped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest accepted font size, in pixels.
pub const FONT_SIZE_MIN: u32 = 6;
/// Largest accepted font size, in pixels.
pub const FONT_SIZE_MAX: u32 = 72;
/// Font size a freshly created viewer starts with.
pub const FONT_SIZE_DEFAULT: u32 = 14;

/// Line height as a multiple of the font size (14px text renders at 21px
/// lines).
pub const LINE_HEIGHT_FACTOR: f32 = 1.5;

/// Color theme selector for the viewer chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    /// Dark background, light text.
    #[default]
    Dark,
    /// Light background, dark text.
    Light,
}

impl Theme {
    /// Returns the other theme (a toggle helper).
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// State mutation errors.
#[derive(Debug, Error)]
pub enum StateError {
    /// A font size outside [`FONT_SIZE_MIN`]..=[`FONT_SIZE_MAX`] was rejected.
    #[error("font size {0} is outside the accepted range {FONT_SIZE_MIN}..={FONT_SIZE_MAX}")]
    FontSizeOutOfRange(u32),
}

/// The persisted/working state of one viewer instance.
///
/// Field semantics match the property bag written by the persistence adapter
/// (see [`persist`](crate::persist)); absent fields deserialize to the
/// creation defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerState {
    /// Canonical source text. Never mutated by any view transform.
    pub original_text: String,
    /// Cached pretty-printed projection of `original_text`; empty when no
    /// successful pretty-print has run since the text last changed.
    pub pretty_text: String,
    /// Whether the pretty-printed variant is the active source.
    pub pretty_mode: bool,
    /// Soft-wrap preference for the host's text surface.
    pub word_wrap: bool,
    /// Chrome color theme.
    pub theme: Theme,
    /// Text size in pixels, within [`FONT_SIZE_MIN`]..=[`FONT_SIZE_MAX`].
    pub font_size: u32,
    /// Whether substring highlighting is active.
    pub highlight_mode: bool,
    /// Highlight regex source (case-insensitive). Kept verbatim even while
    /// `highlight_mode` is off.
    pub highlight_pattern: String,
    /// Whether line filtering is active.
    pub line_filter_mode: bool,
    /// Line-filter regex source (case-insensitive). Kept verbatim even while
    /// `line_filter_mode` is off.
    pub line_filter_pattern: String,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            original_text: String::new(),
            pretty_text: String::new(),
            pretty_mode: false,
            word_wrap: false,
            theme: Theme::Dark,
            font_size: FONT_SIZE_DEFAULT,
            highlight_mode: false,
            highlight_pattern: String::new(),
            line_filter_mode: false,
            line_filter_pattern: String::new(),
        }
    }
}

impl ViewerState {
    /// Create a state with creation defaults (all modes off, empty text,
    /// `font_size = 14`, `theme = Dark`).
    pub fn new() -> Self {
        Self::default()
    }

    /// The text the view pipeline starts from: the pretty-printed cache when
    /// `pretty_mode` is on, the canonical source otherwise.
    pub fn active_source(&self) -> &str {
        if self.pretty_mode {
            &self.pretty_text
        } else {
            &self.original_text
        }
    }

    /// Replace the canonical source text.
    ///
    /// Clears the pretty-print cache and forces `pretty_mode` off: the cache
    /// is a projection of the *previous* text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.original_text = text.into();
        self.pretty_text.clear();
        self.pretty_mode = false;
    }

    /// Replace the canonical source from a sequence of lines, joined with
    /// `'\n'`.
    pub fn set_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = lines
            .into_iter()
            .map(|l| l.as_ref().to_string())
            .collect::<Vec<_>>()
            .join("\n");
        self.set_text(joined);
    }

    /// Clear everything a "delete all" gesture clears: text, pretty cache and
    /// mode, and both pattern inputs. Mode flags for filtering/highlighting
    /// are left as-is (their control rows stay open, now empty).
    pub fn clear(&mut self) {
        self.set_text("");
        self.highlight_pattern.clear();
        self.line_filter_pattern.clear();
    }

    /// Set the font size, rejecting out-of-range values.
    pub fn set_font_size(&mut self, size: u32) -> Result<(), StateError> {
        if !(FONT_SIZE_MIN..=FONT_SIZE_MAX).contains(&size) {
            return Err(StateError::FontSizeOutOfRange(size));
        }
        self.font_size = size;
        Ok(())
    }

    /// Line height in pixels derived from the current font size.
    pub fn line_height(&self) -> f32 {
        self.font_size as f32 * LINE_HEIGHT_FACTOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_defaults() {
        let state = ViewerState::new();
        assert_eq!(state.font_size, 14);
        assert_eq!(state.theme, Theme::Dark);
        assert!(!state.pretty_mode);
        assert!(!state.word_wrap);
        assert!(!state.highlight_mode);
        assert!(!state.line_filter_mode);
        assert!(state.original_text.is_empty());
        assert!(state.pretty_text.is_empty());
    }

    #[test]
    fn test_set_text_invalidates_pretty_cache() {
        let mut state = ViewerState::new();
        state.pretty_text = "{\n  \"a\": 1\n}".to_string();
        state.pretty_mode = true;

        state.set_text("new text");

        assert_eq!(state.original_text, "new text");
        assert!(state.pretty_text.is_empty());
        assert!(!state.pretty_mode);
    }

    #[test]
    fn test_set_lines_joins_with_newline() {
        let mut state = ViewerState::new();
        state.set_lines(["a", "b", "c"]);
        assert_eq!(state.original_text, "a\nb\nc");
    }

    #[test]
    fn test_active_source_selection() {
        let mut state = ViewerState::new();
        state.original_text = "raw".to_string();
        state.pretty_text = "pretty".to_string();

        assert_eq!(state.active_source(), "raw");
        state.pretty_mode = true;
        assert_eq!(state.active_source(), "pretty");
    }

    #[test]
    fn test_font_size_rejects_out_of_range() {
        let mut state = ViewerState::new();
        assert!(state.set_font_size(5).is_err());
        assert!(state.set_font_size(73).is_err());
        assert_eq!(state.font_size, 14);

        state.set_font_size(6).unwrap();
        assert_eq!(state.font_size, 6);
        state.set_font_size(72).unwrap();
        assert_eq!(state.font_size, 72);
    }

    #[test]
    fn test_line_height_tracks_font_size() {
        let mut state = ViewerState::new();
        assert_eq!(state.line_height(), 21.0);
        state.set_font_size(20).unwrap();
        assert_eq!(state.line_height(), 30.0);
    }

    #[test]
    fn test_clear_resets_patterns_and_text() {
        let mut state = ViewerState::new();
        state.set_text("hello");
        state.highlight_pattern = "h".to_string();
        state.line_filter_pattern = "e".to_string();
        state.highlight_mode = true;

        state.clear();

        assert!(state.original_text.is_empty());
        assert!(state.highlight_pattern.is_empty());
        assert!(state.line_filter_pattern.is_empty());
        // The mode flag itself is a UI affordance and survives.
        assert!(state.highlight_mode);
    }
}
