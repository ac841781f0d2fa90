//! Content-driven widget sizing.
//!
//! Computes a recommended node size from word-wrapped visual line counts of
//! the displayed text. Sizing is advisory: it runs only on explicit user
//! actions (paste with auto-resize enabled), never on every keystroke or
//! backend update.
//!
//! Line lengths are measured in display cells (UAX #11 width), so CJK and
//! other wide characters count double. Width is clamped first; the wrapped
//! visual-line count is then derived from the *clamped* width, which is what
//! keeps a single very long line from demanding unbounded width — it degrades
//! to more wrapped lines instead.

use unicode_width::UnicodeWidthChar;

/// Assumed monospace advance width, in pixels per cell.
pub const CHAR_WIDTH: f32 = 8.5;
/// Assumed rendered line height, in pixels.
pub const BASE_LINE_HEIGHT: f32 = 21.0;

/// Node header height reserved above the content.
pub const HEADER_HEIGHT: f32 = 35.0;
/// Height reserved for the widget row below the header.
pub const WIDGET_HEIGHT: f32 = 40.0;
/// Outer margin on each side of the text surface.
pub const MARGIN: f32 = 15.0;
/// Inner padding of the text surface.
pub const TEXTAREA_PADDING: f32 = 10.0;

/// Width bounds of a computed size.
pub const MIN_WIDTH: f32 = 400.0;
/// Maximum recommended width.
pub const MAX_WIDTH: f32 = 2000.0;
/// Height bounds of a computed size.
pub const MIN_HEIGHT: f32 = 300.0;
/// Maximum recommended height.
pub const MAX_HEIGHT: f32 = 2000.0;

/// Size a freshly created viewer node starts at (also the recommendation for
/// empty text).
pub const DEFAULT_SIZE: NodeSize = NodeSize {
    width: 500.0,
    height: 200.0,
};

/// Minimum width a viewer or overlay node is created with.
pub const MIN_NODE_WIDTH: f32 = 400.0;

/// A node size in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodeSize {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl NodeSize {
    /// Create a size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Display-cell width of a line.
fn line_cells(line: &str) -> usize {
    line.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Compute the recommended node size for a displayed text, using the default
/// font metrics.
pub fn calculate_content_size(text: &str) -> NodeSize {
    calculate_content_size_with_metrics(text, CHAR_WIDTH, BASE_LINE_HEIGHT)
}

/// Compute the recommended node size with explicit font metrics.
///
/// Bounded to `[MIN_WIDTH, MAX_WIDTH] × [MIN_HEIGHT, MAX_HEIGHT]`; empty
/// text yields [`DEFAULT_SIZE`].
pub fn calculate_content_size_with_metrics(
    text: &str,
    char_width: f32,
    base_line_height: f32,
) -> NodeSize {
    if text.is_empty() {
        return DEFAULT_SIZE;
    }

    let lines: Vec<&str> = text.split('\n').collect();
    let longest_line = lines.iter().map(|l| line_cells(l)).max().unwrap_or(1).max(1);

    let raw_width = longest_line as f32 * char_width + TEXTAREA_PADDING * 2.0 + MARGIN * 2.0;
    let content_width = raw_width.clamp(MIN_WIDTH, MAX_WIDTH);

    // Wrap against the clamped width, not the raw longest-line width.
    let usable_width = content_width - MARGIN * 2.0 - TEXTAREA_PADDING * 2.0;
    let chars_per_line = ((usable_width / char_width).floor() as usize).max(1);

    let total_visual_lines: usize = lines
        .iter()
        .map(|line| {
            let cells = line_cells(line);
            if cells == 0 { 1 } else { cells.div_ceil(chars_per_line) }
        })
        .sum();

    let raw_height = total_visual_lines as f32 * base_line_height
        + HEADER_HEIGHT
        + WIDGET_HEIGHT
        + MARGIN
        + TEXTAREA_PADDING * 2.0;
    let content_height = raw_height.clamp(MIN_HEIGHT, MAX_HEIGHT);

    NodeSize::new(content_width, content_height)
}

/// Fit the inner text surface to the node bounds, subtracting fixed chrome
/// (header, widget row, margins) and flooring at a usable minimum.
pub fn fit_inner(node: NodeSize) -> NodeSize {
    const HEADER: f32 = 30.0;
    const WIDGET_ROW: f32 = 15.0;
    const SIDE_MARGIN: f32 = 10.0;
    const BOTTOM_MARGIN: f32 = 5.0;

    NodeSize::new(
        (node.width - SIDE_MARGIN * 2.0).max(50.0),
        (node.height - HEADER - WIDGET_ROW - BOTTOM_MARGIN).max(40.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_yields_default_size() {
        assert_eq!(calculate_content_size(""), DEFAULT_SIZE);
    }

    #[test]
    fn test_short_text_hits_minimum_bounds() {
        let size = calculate_content_size("hi");
        assert_eq!(size.width, MIN_WIDTH);
        assert_eq!(size.height, MIN_HEIGHT);
    }

    #[test]
    fn test_long_single_line_clamps_width_and_wraps() {
        let line = "x".repeat(1000);
        let size = calculate_content_size(&line);
        assert_eq!(size.width, MAX_WIDTH);

        // 1000 cells at 8.5px wrap into multiple visual lines against the
        // clamped width, so the height exceeds a single line's worth.
        let usable = MAX_WIDTH - MARGIN * 2.0 - TEXTAREA_PADDING * 2.0;
        let chars_per_line = (usable / CHAR_WIDTH).floor() as usize;
        let wrapped = 1000usize.div_ceil(chars_per_line);
        assert!(wrapped > 1);
        assert!(size.height >= MIN_HEIGHT);
    }

    #[test]
    fn test_height_grows_with_line_count() {
        let text = "line\n".repeat(50);
        let size = calculate_content_size(&text);
        assert!(size.height > MIN_HEIGHT);
        assert!(size.height <= MAX_HEIGHT);
    }

    #[test]
    fn test_height_clamps_at_maximum() {
        let text = "line\n".repeat(500);
        let size = calculate_content_size(&text);
        assert_eq!(size.height, MAX_HEIGHT);
    }

    #[test]
    fn test_empty_lines_count_one_visual_line() {
        let sparse = calculate_content_size("a\n\n\n\nb");
        let dense = calculate_content_size("a\nb");
        assert!(sparse.height >= dense.height);
    }

    #[test]
    fn test_wide_characters_count_double() {
        let wide = calculate_content_size(&"界".repeat(60));
        let narrow = calculate_content_size(&"x".repeat(60));
        assert!(wide.width > narrow.width);
    }

    #[test]
    fn test_fit_inner_subtracts_chrome() {
        let inner = fit_inner(NodeSize::new(500.0, 200.0));
        assert_eq!(inner.width, 480.0);
        assert_eq!(inner.height, 150.0);
    }

    #[test]
    fn test_fit_inner_floors_tiny_nodes() {
        let inner = fit_inner(NodeSize::new(40.0, 30.0));
        assert_eq!(inner.width, 50.0);
        assert_eq!(inner.height, 40.0);
    }
}
