//! The text-viewer controller.
//!
//! [`TextViewer`] owns one [`ViewerState`], its derived [`Projection`], and
//! the [`MatchNavigator`] over the current match set, and keeps the three
//! consistent: every mutation runs synchronously to completion (state update
//! → pipeline recompute → navigator rebuild) before control returns, so a
//! host driving it from discrete events never observes a half-applied change.
//!
//! # Change notifications
//!
//! Mutations increment a version counter and notify subscribers; the host
//! uses this as its redraw signal.
//!
//! # Example
//!
//! ```rust
//! use textview_core::TextViewer;
//!
//! let mut viewer = TextViewer::new();
//! viewer.set_text("foo bar foo");
//!
//! viewer.set_highlight_mode(true);
//! viewer.set_highlight_pattern("foo");
//! assert_eq!(viewer.match_counter(), (0, 2));
//!
//! viewer.next_match();
//! assert_eq!(viewer.match_counter(), (1, 2));
//! ```

use crate::navigator::{MatchNavigator, ScrollTarget};
use crate::persist::{self, PropertyBag};
use crate::pipeline::{self, PrettyPrintError, Projection};
use crate::sizer::{self, NodeSize};
use crate::state::{StateError, Theme, ViewerState};
use crate::stats::TextStats;

/// What kind of change a notification reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerChangeType {
    /// The canonical source text was replaced (set text, clear, restore).
    TextReplaced,
    /// A view transform changed the displayed projection.
    DisplayChanged,
    /// The selected match changed (navigation only; the match set itself is
    /// covered by the other variants).
    MatchSelectionChanged,
    /// A presentation preference changed (theme, word wrap, font size).
    AppearanceChanged,
}

/// A change notification record.
#[derive(Debug, Clone, Copy)]
pub struct ViewerChange {
    /// Change type.
    pub change_type: ViewerChangeType,
    /// Version before the change.
    pub old_version: u64,
    /// Version after the change.
    pub new_version: u64,
}

/// Change callback type. The viewer is single-threaded by contract, so
/// callbacks need not be `Send`.
pub type ChangeCallback = Box<dyn FnMut(&ViewerChange)>;

/// Controller for one viewer instance: source text, view transforms, match
/// navigation, sizing, and persistence.
pub struct TextViewer {
    state: ViewerState,
    projection: Projection,
    navigator: MatchNavigator,
    version: u64,
    callbacks: Vec<ChangeCallback>,
}

impl Default for TextViewer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextViewer {
    /// Create a viewer with creation defaults and an empty projection.
    pub fn new() -> Self {
        let state = ViewerState::new();
        let projection = pipeline::recompute(&state);
        Self {
            state,
            projection,
            navigator: MatchNavigator::new(),
            version: 0,
            callbacks: Vec::new(),
        }
    }

    /// The current persisted/working state.
    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    /// The current displayed projection.
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// The displayed text (undecorated; this is what copy/export operate on).
    pub fn displayed_text(&self) -> &str {
        &self.projection.displayed_text
    }

    /// The match navigator (read-only; navigate through the viewer so
    /// subscribers are notified).
    pub fn navigator(&self) -> &MatchNavigator {
        &self.navigator
    }

    /// Counter stats of the displayed text.
    pub fn stats(&self) -> TextStats {
        TextStats::of(&self.projection.displayed_text)
    }

    /// Current version number.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether the state has changed since a version.
    pub fn has_changed_since(&self, version: u64) -> bool {
        self.version > version
    }

    /// Subscribe to change notifications.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&ViewerChange) + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    // ---- text store ----

    /// Replace the source text. Clears the pretty cache, forces pretty mode
    /// off, and recomputes the projection before returning.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.state.set_text(text);
        self.recompute(ViewerChangeType::TextReplaced);
    }

    /// Replace the source text from a sequence of lines joined with `'\n'`.
    pub fn set_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.state.set_lines(lines);
        self.recompute(ViewerChangeType::TextReplaced);
    }

    /// Clear the text and both pattern inputs in one operation.
    pub fn clear(&mut self) {
        self.state.clear();
        self.recompute(ViewerChangeType::TextReplaced);
    }

    // ---- view transforms ----

    /// Toggle pretty-print mode.
    ///
    /// Enabling parses the source (strict JSON, then the permissive literal
    /// fallback) unless a still-valid cache exists. On parse failure the mode
    /// stays off and the error is returned — the caller gets an explicit
    /// failure signal, not a silent revert. Disabling keeps the cache so a
    /// later re-enable does not re-parse.
    pub fn set_pretty_mode(&mut self, enabled: bool) -> Result<(), PrettyPrintError> {
        if !enabled {
            if self.state.pretty_mode {
                self.state.pretty_mode = false;
                self.recompute(ViewerChangeType::DisplayChanged);
            }
            return Ok(());
        }

        if self.state.pretty_mode {
            return Ok(());
        }

        if self.state.pretty_text.is_empty() {
            match pipeline::pretty_print(&self.state.original_text) {
                Ok(pretty) => self.state.pretty_text = pretty,
                Err(err) => {
                    self.state.pretty_mode = false;
                    return Err(err);
                }
            }
        }

        self.state.pretty_mode = true;
        self.recompute(ViewerChangeType::DisplayChanged);
        Ok(())
    }

    /// Toggle line filtering. Turning it off clears the pattern input.
    pub fn set_line_filter_mode(&mut self, enabled: bool) {
        self.state.line_filter_mode = enabled;
        if !enabled {
            self.state.line_filter_pattern.clear();
        }
        self.recompute(ViewerChangeType::DisplayChanged);
    }

    /// Update the line-filter pattern and recompute.
    pub fn set_line_filter_pattern(&mut self, pattern: impl Into<String>) {
        self.state.line_filter_pattern = pattern.into();
        self.recompute(ViewerChangeType::DisplayChanged);
    }

    /// Toggle highlighting. Turning it off clears the pattern input; turning
    /// it on leaves the match selection empty until the caller navigates.
    pub fn set_highlight_mode(&mut self, enabled: bool) {
        self.state.highlight_mode = enabled;
        if !enabled {
            self.state.highlight_pattern.clear();
        }
        self.recompute(ViewerChangeType::DisplayChanged);
    }

    /// Update the highlight pattern and recompute. The match selection
    /// resets; navigation is explicit.
    pub fn set_highlight_pattern(&mut self, pattern: impl Into<String>) {
        self.state.highlight_pattern = pattern.into();
        self.recompute(ViewerChangeType::DisplayChanged);
    }

    // ---- appearance ----

    /// Set the soft-wrap preference.
    pub fn set_word_wrap(&mut self, enabled: bool) {
        self.state.word_wrap = enabled;
        self.notify(ViewerChangeType::AppearanceChanged);
    }

    /// Set the theme.
    pub fn set_theme(&mut self, theme: Theme) {
        self.state.theme = theme;
        self.notify(ViewerChangeType::AppearanceChanged);
    }

    /// Flip between dark and light.
    pub fn toggle_theme(&mut self) -> Theme {
        self.state.theme = self.state.theme.toggled();
        self.notify(ViewerChangeType::AppearanceChanged);
        self.state.theme
    }

    /// Set the font size; out-of-range values are rejected and nothing
    /// changes.
    pub fn set_font_size(&mut self, size: u32) -> Result<(), StateError> {
        self.state.set_font_size(size)?;
        self.notify(ViewerChangeType::AppearanceChanged);
        Ok(())
    }

    // ---- match navigation ----

    /// Advance to the next match and return its scroll target. No-op when
    /// there are no matches.
    pub fn next_match(&mut self) -> Option<ScrollTarget> {
        self.navigator.next()?;
        self.notify(ViewerChangeType::MatchSelectionChanged);
        self.navigator.scroll_target(self.state.line_height())
    }

    /// Retreat to the previous match and return its scroll target. No-op when
    /// there are no matches.
    pub fn previous_match(&mut self) -> Option<ScrollTarget> {
        self.navigator.previous()?;
        self.notify(ViewerChangeType::MatchSelectionChanged);
        self.navigator.scroll_target(self.state.line_height())
    }

    /// Select a match by index and return its scroll target; `None` when the
    /// index is out of range.
    pub fn goto_match(&mut self, index: usize) -> Option<ScrollTarget> {
        if !self.navigator.goto(index) {
            return None;
        }
        self.notify(ViewerChangeType::MatchSelectionChanged);
        self.navigator.scroll_target(self.state.line_height())
    }

    /// One-based current match index and total count, for counter display.
    pub fn match_counter(&self) -> (usize, usize) {
        self.navigator.counter()
    }

    /// Number of lines kept by the line filter in the current projection.
    pub fn line_match_count(&self) -> usize {
        self.projection.line_match_count
    }

    // ---- sizing, copy, persistence ----

    /// Recommended node size for the current displayed text (advisory; called
    /// on explicit user actions only).
    pub fn content_size(&self) -> NodeSize {
        sizer::calculate_content_size(&self.projection.displayed_text)
    }

    /// Text for a copy gesture: the selected character range of the displayed
    /// text, or all of it when there is no selection.
    pub fn text_for_copy(&self, selection: Option<std::ops::Range<usize>>) -> String {
        let displayed = &self.projection.displayed_text;
        match selection {
            Some(range) if range.start < range.end => displayed
                .chars()
                .skip(range.start)
                .take(range.end - range.start)
                .collect(),
            _ => displayed.clone(),
        }
    }

    /// Capture the full state into a property bag (host serialize hook).
    pub fn serialize(&self) -> PropertyBag {
        persist::capture(&self.state)
    }

    /// Restore state from a property bag and replay the pipeline (host
    /// configure hook). Idempotent: configuring twice from the same bag
    /// yields the same projection and match set.
    ///
    /// A bag claiming pretty mode without a cached pretty text re-derives it
    /// from the source; if that parse fails, pretty mode is turned off so the
    /// mode flag and the displayed text always agree.
    pub fn configure(&mut self, bag: &PropertyBag) {
        let mut state = persist::restore(bag);

        if state.pretty_mode && state.pretty_text.is_empty() {
            match pipeline::pretty_print(&state.original_text) {
                Ok(pretty) => state.pretty_text = pretty,
                Err(_) => state.pretty_mode = false,
            }
        }

        self.state = state;
        self.recompute(ViewerChangeType::TextReplaced);
    }

    // ---- internals ----

    fn recompute(&mut self, change_type: ViewerChangeType) {
        self.projection = pipeline::recompute(&self.state);
        self.navigator.rebuild(self.projection.matches.clone());
        self.notify(change_type);
    }

    fn notify(&mut self, change_type: ViewerChangeType) {
        let old_version = self.version;
        self.version += 1;
        let change = ViewerChange {
            change_type,
            old_version,
            new_version: self.version,
        };
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }
}
