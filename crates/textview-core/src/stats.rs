//! Displayed-text counters.

use std::fmt;

/// Character/word/line counts of a displayed text.
///
/// Rendered as the viewer's counter row: `"12 chars | 3 words | 2 lines"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    /// Character count (Unicode scalar values).
    pub chars: usize,
    /// Whitespace-separated word count.
    pub words: usize,
    /// Newline-separated line count; zero for empty text.
    pub lines: usize,
}

impl TextStats {
    /// Count a text.
    pub fn of(text: &str) -> Self {
        Self {
            chars: text.chars().count(),
            words: text.split_whitespace().count(),
            lines: if text.is_empty() {
                0
            } else {
                text.split('\n').count()
            },
        }
    }
}

impl fmt::Display for TextStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} chars | {} words | {} lines",
            self.chars, self.words, self.lines
        )
    }
}
