//! Cyclic navigation over highlight matches.
//!
//! The navigator owns the match set for the *currently displayed* text and a
//! "current match" cursor. It is rebuilt whenever the displayed text or the
//! highlight pattern changes; rebuilding clears the cursor, and the caller
//! navigates explicitly (entering highlight mode never auto-selects a match).

use crate::pipeline::MatchPos;

/// Scroll destination for a selected match, derived from its line number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTarget {
    /// Zero-based line of the match in the displayed text.
    pub line: usize,
    /// Vertical pixel offset of that line (`line × line_height`).
    pub offset_px: f32,
}

/// Tracks highlight match positions and supports cyclic forward/backward
/// navigation.
#[derive(Debug, Clone, Default)]
pub struct MatchNavigator {
    matches: Vec<MatchPos>,
    current: Option<usize>,
}

impl MatchNavigator {
    /// Create an empty navigator (no matches, no selection).
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the match set and clear the current selection.
    pub fn rebuild(&mut self, matches: Vec<MatchPos>) {
        self.matches = matches;
        self.current = None;
    }

    /// All matches, in document order.
    pub fn matches(&self) -> &[MatchPos] {
        &self.matches
    }

    /// Number of matches.
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Returns `true` when there are no matches.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Index of the currently selected match, if one is selected.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// The currently selected match position, if any.
    pub fn current_match(&self) -> Option<&MatchPos> {
        self.current.and_then(|i| self.matches.get(i))
    }

    /// One-based index for counter display (`0` when nothing is selected),
    /// paired with the total count.
    pub fn counter(&self) -> (usize, usize) {
        (self.current.map_or(0, |i| i + 1), self.matches.len())
    }

    /// Advance to the next match cyclically. From the unselected state this
    /// selects the first match. No-op (returns `None`) when there are no
    /// matches.
    pub fn next(&mut self) -> Option<usize> {
        if self.matches.is_empty() {
            return None;
        }
        let next = match self.current {
            Some(i) => (i + 1) % self.matches.len(),
            None => 0,
        };
        self.current = Some(next);
        self.current
    }

    /// Retreat to the previous match cyclically. From the unselected state
    /// this selects the *last* match (the exact inverse of [`next`](Self::next)).
    /// No-op when there are no matches.
    pub fn previous(&mut self) -> Option<usize> {
        if self.matches.is_empty() {
            return None;
        }
        let len = self.matches.len();
        let prev = match self.current {
            Some(i) => (i + len - 1) % len,
            None => len - 1,
        };
        self.current = Some(prev);
        self.current
    }

    /// Select a match by index. Returns `false` (and leaves the selection
    /// unchanged) when the index is out of range.
    pub fn goto(&mut self, index: usize) -> bool {
        if index >= self.matches.len() {
            return false;
        }
        self.current = Some(index);
        true
    }

    /// Clear the selection without touching the match set.
    pub fn clear_selection(&mut self) {
        self.current = None;
    }

    /// Scroll destination of the current match for the given line height, or
    /// `None` when nothing is selected.
    pub fn scroll_target(&self, line_height: f32) -> Option<ScrollTarget> {
        self.current_match().map(|m| ScrollTarget {
            line: m.line,
            offset_px: m.line as f32 * line_height,
        })
    }
}
