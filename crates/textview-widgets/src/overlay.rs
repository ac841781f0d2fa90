//! On-canvas metadata overlays.
//!
//! These are the simple collaborators next to the full text viewer: they keep
//! the backend's metadata lines and lay them out as positioned text for the
//! host to draw on the node canvas. No state machine — just stored lines, a
//! show-mode selector, and persistence of the lines themselves.

use serde_json::{Value, json};
use textview_core::{MIN_NODE_WIDTH, NodeSize, PropertyBag};

use crate::host::NodeWidget;
use crate::poll::ValueWatcher;

/// Horizontal text offset inside the node, in pixels.
pub const OVERLAY_TEXT_X: f32 = 10.0;
/// Vertical distance between overlay lines, in pixels.
pub const OVERLAY_LINE_HEIGHT: f32 = 18.0;
/// Baseline of the first overlay line, in pixels from the node top.
pub const OVERLAY_START_Y: f32 = 25.0;
/// Extra gap between the properties and metadata sections.
pub const SECTION_GAP: f32 = 5.0;

/// Which sections of the image overlay to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowMode {
    /// Properties followed by metadata.
    #[default]
    Both,
    /// Properties only (resolution, ratio, file size).
    Properties,
    /// Metadata only (model, seed, sampler, ...).
    Metadata,
    /// Draw nothing.
    None,
}

impl ShowMode {
    /// Parse the host widget's dropdown value; unknown values mean "both".
    pub fn from_widget_value(value: &str) -> Self {
        match value {
            "properties" => Self::Properties,
            "metadata" => Self::Metadata,
            "none" => Self::None,
            _ => Self::Both,
        }
    }
}

/// One positioned line of overlay text.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLine {
    /// The text to draw.
    pub text: String,
    /// X position in node-local pixels.
    pub x: f32,
    /// Baseline Y position in node-local pixels.
    pub y: f32,
}

fn read_lines(bag: &PropertyBag, key: &str) -> Vec<String> {
    bag.get(key)
        .and_then(Value::as_array)
        .map(|lines| {
            lines
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Image metadata overlay: two line sections delivered by the backend and
/// drawn in a fixed layout.
#[derive(Debug, Clone, Default)]
pub struct ImageOverlay {
    /// Resolution / ratio / file-size lines (backend lines 0..3).
    properties: Vec<String>,
    /// Model / seed / sampler lines (backend lines 4..).
    metadata: Vec<String>,
}

impl ImageOverlay {
    /// Create an empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stored properties lines.
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    /// The stored metadata lines.
    pub fn metadata(&self) -> &[String] {
        &self.metadata
    }

    /// Lay out the visible lines for the given show mode.
    pub fn layout(&self, mode: ShowMode) -> Vec<OverlayLine> {
        let mut lines = Vec::new();
        let mut y = OVERLAY_START_Y;

        let show_properties = matches!(mode, ShowMode::Both | ShowMode::Properties);
        let show_metadata = matches!(mode, ShowMode::Both | ShowMode::Metadata);

        if show_properties {
            for text in &self.properties {
                lines.push(OverlayLine {
                    text: text.clone(),
                    x: OVERLAY_TEXT_X,
                    y,
                });
                y += OVERLAY_LINE_HEIGHT;
            }
            if mode == ShowMode::Both && !self.metadata.is_empty() {
                y += SECTION_GAP;
            }
        }

        if show_metadata {
            for text in &self.metadata {
                lines.push(OverlayLine {
                    text: text.clone(),
                    x: OVERLAY_TEXT_X,
                    y,
                });
                y += OVERLAY_LINE_HEIGHT;
            }
        }

        lines
    }
}

impl NodeWidget for ImageOverlay {
    fn on_create(&mut self) -> NodeSize {
        NodeSize::new(MIN_NODE_WIDTH, 0.0)
    }

    /// The backend sends one flat array: lines 0..3 are image properties,
    /// line 3 is a blank separator, lines 4.. are metadata.
    fn on_backend_result(&mut self, lines: &[String]) {
        self.properties = lines.iter().take(3).cloned().collect();
        self.metadata = lines.iter().skip(4).cloned().collect();
    }

    fn on_resize(&mut self, _size: NodeSize) {}

    fn on_serialize(&self) -> PropertyBag {
        let mut bag = PropertyBag::new();
        bag.insert("properties_text".to_string(), json!(self.properties));
        bag.insert("metadata_text".to_string(), json!(self.metadata));
        bag
    }

    fn on_configure(&mut self, bag: &PropertyBag) {
        self.properties = read_lines(bag, "properties_text");
        self.metadata = read_lines(bag, "metadata_text");
    }

    fn on_remove(&mut self) {}
}

/// Video metadata overlay: draws the backend's parameter lines, and between
/// executions previews basic dimensions whenever the watched video selection
/// changes.
#[derive(Debug, Clone, Default)]
pub struct VideoOverlay {
    params: Vec<String>,
    watcher: ValueWatcher<String>,
}

impl VideoOverlay {
    /// Create an empty overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// The lines currently drawn.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// One poll tick with the video widget's current value. When the value
    /// changed, the host should load the video's dimensions and call
    /// [`set_preview`](Self::set_preview); returns `true` in that case.
    pub fn poll_video_value(&mut self, value: &str) -> bool {
        self.watcher.poll(&value.to_string())
    }

    /// Replace the drawn lines with a dimensions preview until the node runs.
    pub fn set_preview(&mut self, width: u32, height: u32) {
        let megapixels = (width as f64 * height as f64) / 1_000_000.0;
        self.params = vec![
            format!("{width}x{height} | {megapixels:.2}MP"),
            "Ratio: Calculating...".to_string(),
            "(Run node to see full metadata)".to_string(),
        ];
    }

    /// Lay out the lines for drawing.
    pub fn layout(&self) -> Vec<OverlayLine> {
        self.params
            .iter()
            .enumerate()
            .map(|(i, text)| OverlayLine {
                text: text.clone(),
                x: OVERLAY_TEXT_X,
                y: OVERLAY_START_Y + i as f32 * OVERLAY_LINE_HEIGHT,
            })
            .collect()
    }
}

impl NodeWidget for VideoOverlay {
    fn on_create(&mut self) -> NodeSize {
        NodeSize::new(MIN_NODE_WIDTH, 0.0)
    }

    fn on_backend_result(&mut self, lines: &[String]) {
        self.params = lines.to_vec();
    }

    fn on_resize(&mut self, _size: NodeSize) {}

    fn on_serialize(&self) -> PropertyBag {
        let mut bag = PropertyBag::new();
        bag.insert("params_text".to_string(), json!(self.params));
        bag
    }

    fn on_configure(&mut self, bag: &PropertyBag) {
        self.params = read_lines(bag, "params_text");
    }

    /// Cancels the poll so the recurring task dies with the node.
    fn on_remove(&mut self) {
        self.watcher.cancel();
    }
}
