//! The text viewer widget.
//!
//! [`TextViewerWidget`] wires a [`TextViewer`] engine into the host's
//! [`NodeWidget`] lifecycle and adds the purely presentational pieces the
//! engine deliberately does not know about: node chrome measurements,
//! pattern-input sizing, and splitting displayed text into highlight spans
//! for rendering.

use textview_core::{
    DEFAULT_SIZE, MIN_NODE_WIDTH, MatchPos, NodeSize, PropertyBag, TextViewer, sizer,
};

use crate::host::NodeWidget;

/// Vertical chrome around the text surface: header plus control strip.
pub const CHROME_HEIGHT: f32 = 49.0;
/// Extra chrome when a pattern control row (highlight or filter) is open.
pub const CONTROL_ROW_HEIGHT: f32 = 32.0;

/// Pixels of input width budgeted per pattern character.
const PATTERN_CHAR_WIDTH: usize = 8;
/// Padding added to a pattern input beyond its text.
const PATTERN_INPUT_PADDING: usize = 50;
/// Narrowest a pattern input gets.
const PATTERN_INPUT_MIN: usize = 200;
/// Widest a pattern input gets.
const PATTERN_INPUT_MAX: usize = 600;

/// Width for a pattern input holding `pattern`, grown with the text so long
/// regexes stay readable.
pub fn pattern_input_width(pattern: &str) -> usize {
    (pattern.chars().count() * PATTERN_CHAR_WIDTH + PATTERN_INPUT_PADDING)
        .clamp(PATTERN_INPUT_MIN, PATTERN_INPUT_MAX)
}

/// How a span of displayed text should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// Ordinary text.
    Plain,
    /// Inside a highlight match.
    Match,
    /// Inside the currently selected match.
    CurrentMatch,
}

/// A run of displayed text with uniform rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Span<'a> {
    /// The text of the run.
    pub text: &'a str,
    /// How to render it.
    pub kind: SpanKind,
}

/// Split `displayed` into render runs around the given matches.
///
/// `matches` must be sorted by offset and non-overlapping, which is what the
/// engine's match scan produces. Offsets are character offsets into
/// `displayed`; `current` is an index into `matches`.
pub fn highlight_spans<'a>(
    displayed: &'a str,
    matches: &[MatchPos],
    current: Option<usize>,
) -> Vec<Span<'a>> {
    // Match offsets are nondecreasing, so one forward walk over the char
    // indices maps every char offset to its byte offset.
    let mut chars = displayed.char_indices().peekable();
    let mut pos = 0usize;
    let mut advance_to = |target: usize| {
        while pos < target && chars.next().is_some() {
            pos += 1;
        }
        chars.peek().map_or(displayed.len(), |&(b, _)| b)
    };

    let mut spans = Vec::new();
    let mut cursor = 0usize;
    for (i, m) in matches.iter().enumerate() {
        let start = advance_to(m.offset);
        let end = advance_to(m.offset + m.len);
        if start > cursor {
            spans.push(Span {
                text: &displayed[cursor..start],
                kind: SpanKind::Plain,
            });
        }
        spans.push(Span {
            text: &displayed[start..end],
            kind: if current == Some(i) {
                SpanKind::CurrentMatch
            } else {
                SpanKind::Match
            },
        });
        cursor = end;
    }
    if cursor < displayed.len() {
        spans.push(Span {
            text: &displayed[cursor..],
            kind: SpanKind::Plain,
        });
    }
    spans
}

/// The node-canvas text viewer.
///
/// Owns the [`TextViewer`] engine plus the node-level presentation state the
/// engine does not track: the node's current size, the text surface carved
/// out of it, and whether the node auto-resizes to fit pasted content.
pub struct TextViewerWidget {
    viewer: TextViewer,
    node_size: NodeSize,
    auto_resize: bool,
}

impl TextViewerWidget {
    /// Create a widget with an empty viewer.
    pub fn new() -> Self {
        Self {
            viewer: TextViewer::new(),
            node_size: DEFAULT_SIZE,
            auto_resize: false,
        }
    }

    /// The wrapped engine, for driving display toggles and navigation.
    pub fn viewer(&self) -> &TextViewer {
        &self.viewer
    }

    /// Mutable access to the wrapped engine.
    pub fn viewer_mut(&mut self) -> &mut TextViewer {
        &mut self.viewer
    }

    /// The node's current outer size.
    pub fn node_size(&self) -> NodeSize {
        self.node_size
    }

    /// The text surface available inside the current node size.
    pub fn text_area(&self) -> NodeSize {
        sizer::fit_inner(self.node_size)
    }

    /// Whether pasting grows the node to fit the content.
    pub fn auto_resize(&self) -> bool {
        self.auto_resize
    }

    /// Toggle content-fit resizing on paste.
    pub fn set_auto_resize(&mut self, enabled: bool) {
        self.auto_resize = enabled;
    }

    /// Vertical chrome above the text surface given the open control rows.
    pub fn chrome_height(&self) -> f32 {
        let state = self.viewer.state();
        let mut height = CHROME_HEIGHT;
        if state.highlight_mode || state.line_filter_mode {
            height += CONTROL_ROW_HEIGHT;
        }
        height
    }

    /// Handle pasted text: replace the content and, when auto-resize is on,
    /// grow the node to fit. Returns the new node size if it changed.
    pub fn paste(&mut self, text: &str) -> Option<NodeSize> {
        self.viewer.set_text(text);
        if !self.auto_resize {
            return None;
        }
        let fitted = self.viewer.content_size();
        if fitted == self.node_size {
            return None;
        }
        self.node_size = fitted;
        Some(fitted)
    }
}

impl Default for TextViewerWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeWidget for TextViewerWidget {
    fn on_create(&mut self) -> NodeSize {
        self.node_size = NodeSize::new(DEFAULT_SIZE.width.max(MIN_NODE_WIDTH), DEFAULT_SIZE.height);
        self.node_size
    }

    /// The backend delivers the node's text as a one-element list.
    fn on_backend_result(&mut self, lines: &[String]) {
        if let Some(text) = lines.first() {
            self.viewer.set_text(text);
        }
    }

    fn on_resize(&mut self, size: NodeSize) {
        self.node_size = NodeSize::new(size.width.max(MIN_NODE_WIDTH), size.height);
    }

    fn on_serialize(&self) -> PropertyBag {
        self.viewer.serialize()
    }

    fn on_configure(&mut self, bag: &PropertyBag) {
        self.viewer.configure(bag);
    }

    fn on_remove(&mut self) {}
}
